use crate::run::write_meta;
use crate::{system_time_as_millis, RunInfo, RunStatus};
use anyhow::Result;
use chrono::{DateTime, Duration, Local};
use keel_core::record::{AggregateRecorder, Record, RecordStorage, RecordValue, Recorder};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct MetricRow<'a> {
    key: &'a String,
    value: f64,
    epoch: i64,
    timestamp: i64,
}

/// Record metrics of a run to the local file system during training.
///
/// Before training, you can use [`TrackingRun::log_params()`] to log parameters
/// of the run like hyperparameters of the algorithm, the name of the dataset on
/// which the policy is trained, etc.
///
/// [`TrackingRun::write()`] appends [`RecordValue::Scalar`] values in the record
/// as rows of `metrics.csv`. As an exception, `epoch` is treated as the `epoch`
/// column of the rows.
///
/// Other types of values like [`RecordValue::Array1`] will be ignored.
///
/// When dropped, this struct updates the run's status to [`RunStatus::Finished`].
///
/// [`TrackingRun::write()`]: keel_core::record::Recorder::write
pub struct TrackingRun {
    run_dir: PathBuf,
    info: RunInfo,
    start_time: DateTime<Local>,
    storage: RecordStorage,
    finished: bool,
}

impl TrackingRun {
    /// Create the files of a new run in `run_dir`.
    pub(crate) fn create(run_dir: PathBuf, run_id: String, run_name: String) -> Result<Self> {
        let info = RunInfo {
            run_id,
            run_name,
            status: RunStatus::Running,
            start_time: system_time_as_millis() as i64,
            end_time: None,
        };
        write_meta(&run_dir, &info)?;

        let mut writer = csv::Writer::from_path(run_dir.join("metrics.csv"))?;
        writer.write_record(&["key", "value", "epoch", "timestamp"])?;
        writer.flush()?;

        Ok(Self {
            run_dir,
            info,
            start_time: Local::now(),
            storage: RecordStorage::new(),
            finished: false,
        })
    }

    /// Identifier of the run.
    pub fn run_id(&self) -> &str {
        &self.info.run_id
    }

    /// Name of the run.
    pub fn run_name(&self) -> &str {
        &self.info.run_name
    }

    /// Metadata of the run.
    pub fn info(&self) -> &RunInfo {
        &self.info
    }

    /// Directory holding the files of the run.
    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Directory to which model checkpoints of the run are saved.
    pub fn model_dir(&self) -> PathBuf {
        self.run_dir.join("models")
    }

    /// Log parameters of the run into `params.json`.
    ///
    /// Nested parameters will be flattened, logged like `hyper_params.param1`,
    /// `hyper_params.param2`.
    pub fn log_params(&self, params: impl Serialize) -> Result<()> {
        let flatten_map = {
            let map = match serde_json::to_value(params).unwrap() {
                Value::Object(map) => map,
                _ => panic!("Failed to parse object"),
            };
            flatten_serde_json::flatten(&map)
        };
        let json = serde_json::to_string_pretty(&flatten_map)?;
        std::fs::write(self.run_dir.join("params.json"), json)?;

        Ok(())
    }

    /// Mark the run as finished and update `meta.json`.
    ///
    /// Does nothing if the run has already been finished.
    pub fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }

        let end_time = Local::now();
        let duration = end_time.signed_duration_since(self.start_time);
        self.info.status = RunStatus::Finished;
        self.info.end_time = Some(end_time.timestamp_millis());
        write_meta(&self.run_dir, &self.info)?;
        self.finished = true;
        info!(
            "Run '{}' finished in {}",
            self.info.run_name,
            format_duration(&duration)
        );

        Ok(())
    }

    fn append_metrics(&self, record: &Record) -> Result<()> {
        let timestamp = system_time_as_millis() as i64;
        let epoch = record.get_scalar("epoch")? as i64;
        let file = OpenOptions::new()
            .append(true)
            .open(self.run_dir.join("metrics.csv"))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        for (key, value) in record.iter() {
            if *key != "epoch" {
                match value {
                    RecordValue::Scalar(v) => {
                        writer.serialize(MetricRow {
                            key,
                            value: *v as f64,
                            epoch,
                            timestamp,
                        })?;
                    }
                    _ => {} // ignore record value
                }
            }
        }
        writer.flush()?;

        Ok(())
    }
}

impl Recorder for TrackingRun {
    fn write(&mut self, record: Record) {
        if let Err(e) = self.append_metrics(&record) {
            warn!(
                "Failed to write metrics of run '{}': {}",
                self.info.run_name, e
            );
        }
    }
}

impl AggregateRecorder for TrackingRun {
    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, epoch: i64) {
        let mut record = self.storage.aggregate();
        record.insert("epoch", RecordValue::Scalar(epoch as _));
        self.write(record);
    }
}

impl Drop for TrackingRun {
    /// Update the run's status to [`RunStatus::Finished`] when dropped.
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            warn!("Failed to finish run '{}': {}", self.info.run_name, e);
        }
    }
}

fn format_duration(dt: &Duration) -> String {
    let mut seconds = dt.num_seconds();
    let mut minutes = seconds / 60;
    seconds %= 60;
    let hours = minutes / 60;
    minutes %= 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
