//! Run context for training algorithms.
mod config;
use crate::{
    base::{Algorithm, ReplayBufferBase},
    record::{AggregateRecorder, Record},
};
use anyhow::Result;
pub use config::SessionConfig;
use log::info;
use std::path::{Path, PathBuf};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Tracks one training run: records, flushes and checkpoints.
///
/// An [`Algorithm`] owns its optimization loop and reports to the session
/// once per epoch with [`TrainSession::log_epoch`]. The session stores the
/// epoch record in the recorder, flushes aggregated records every
/// `flush_interval` epochs, saves a checkpoint `(model_dir)/(epoch).bin`
/// every `save_interval` epochs and keeps `(model_dir)/best.bin` updated
/// whenever the `eval_return` entry of the record improves.
///
/// ```mermaid
/// graph LR
///     A[Algorithm]-->|Record|B[TrainSession]
///     B -->|store, flush|C[AggregateRecorder]
///     B -->|save_model|D[model_dir]
/// ```
///
/// Record flushing inserts the current epoch under the `epoch` key, so
/// every flushed record carries its step.
pub struct TrainSession {
    recorder: Box<dyn AggregateRecorder>,
    model_dir: PathBuf,
    config: SessionConfig,
    max_eval_return: f32,
}

impl TrainSession {
    /// Creates a session writing records to `recorder` and checkpoints
    /// under `model_dir`.
    ///
    /// The checkpoint directory is created when missing.
    pub fn new(
        recorder: Box<dyn AggregateRecorder>,
        model_dir: impl Into<PathBuf>,
        config: SessionConfig,
    ) -> Result<Self> {
        let model_dir = model_dir.into();
        std::fs::create_dir_all(&model_dir)?;

        Ok(Self {
            recorder,
            model_dir,
            config,
            max_eval_return: f32::MIN,
        })
    }

    /// The checkpoint directory of the session.
    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// The configuration of the session.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The best `eval_return` seen so far, if any epoch carried one.
    pub fn best_eval_return(&self) -> Option<f32> {
        if self.max_eval_return == f32::MIN {
            None
        } else {
            Some(self.max_eval_return)
        }
    }

    fn save_model<A, R>(algo: &A, path: PathBuf)
    where
        A: Algorithm<R>,
        R: ReplayBufferBase,
    {
        match algo.save_model(&path) {
            Ok(()) => info!("Saved the model in {:?}.", &path),
            Err(_) => info!("Failed to save model in {:?}.", &path),
        }
    }

    /// Logs the record of an epoch.
    ///
    /// The record is written to the log, stored in the recorder, and the
    /// interval-driven work runs: flushing, checkpointing and best-model
    /// tracking, as configured in [`SessionConfig`].
    pub fn log_epoch<A, R>(&mut self, algo: &A, epoch: usize, record: Record) -> Result<()>
    where
        A: Algorithm<R>,
        R: ReplayBufferBase,
    {
        info!("Epoch: {}", epoch);
        for (k, v) in record.iter() {
            info!("{}: {:?}", k, v);
        }

        let eval_return = record.get_scalar("eval_return").ok();
        self.recorder.store(record);

        if (self.config.flush_interval > 0) && (epoch % self.config.flush_interval == 0) {
            self.recorder.flush(epoch as _);
        }

        if (self.config.save_interval > 0) && (epoch % self.config.save_interval == 0) {
            Self::save_model(algo, self.model_dir.join(format!("{}.bin", epoch)));
        }

        // Save the best model up to the current epoch
        if self.config.keep_best {
            if let Some(eval_return) = eval_return {
                if eval_return > self.max_eval_return {
                    self.max_eval_return = eval_return;
                    Self::save_model(algo, self.model_dir.join("best.bin"));
                }
            }
        }

        Ok(())
    }

    /// Flushes records remaining in the recorder.
    ///
    /// Algorithms call this once at the end of training when their epoch
    /// count is not a multiple of `flush_interval`.
    pub fn flush(&mut self, epoch: usize) {
        self.recorder.flush(epoch as _);
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionConfig, TrainSession};
    use crate::{
        dummy::{DummyAlgorithm, DummyBuffer, DummyPolicy},
        record::{NullRecorder, Record},
        Algorithm, ReplayBufferBase,
    };
    use anyhow::Result;
    use tempdir::TempDir;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_saves_checkpoint_every_epoch() -> Result<()> {
        init();
        let dir = TempDir::new("session")?;
        let model_dir = dir.path().join("models");

        let mut session =
            TrainSession::new(Box::new(NullRecorder {}), &model_dir, SessionConfig::default())?;
        let mut buffer = DummyBuffer::build(&4);
        let mut algo = DummyAlgorithm::new(3);
        algo.train(&mut buffer, &mut session, None)?;

        for epoch in 1..=3 {
            assert!(model_dir.join(format!("{}.bin", epoch)).exists());
        }
        assert!(!model_dir.join("best.bin").exists());
        assert_eq!(session.best_eval_return(), None);
        Ok(())
    }

    #[test]
    fn test_save_interval() -> Result<()> {
        init();
        let dir = TempDir::new("session")?;
        let model_dir = dir.path().join("models");

        let mut session = TrainSession::new(
            Box::new(NullRecorder {}),
            &model_dir,
            SessionConfig::default().save_interval(2),
        )?;
        let mut buffer = DummyBuffer::build(&4);
        let mut algo = DummyAlgorithm::new(4);
        algo.train(&mut buffer, &mut session, None)?;

        assert!(!model_dir.join("1.bin").exists());
        assert!(model_dir.join("2.bin").exists());
        assert!(!model_dir.join("3.bin").exists());
        assert!(model_dir.join("4.bin").exists());
        Ok(())
    }

    #[test]
    fn test_keeps_best_model() -> Result<()> {
        init();
        let dir = TempDir::new("session")?;
        let model_dir = dir.path().join("models");

        let mut session =
            TrainSession::new(Box::new(NullRecorder {}), &model_dir, SessionConfig::default())?;
        let mut buffer = DummyBuffer::build(&4);
        let mut algo = DummyAlgorithm::new(4);

        // Peaks at the second epoch
        let mut evaluator = |policy: &DummyPolicy| -> Result<Record> {
            Ok(Record::from_scalar(
                "eval_return",
                -(policy.weights[0] - 2.0).abs(),
            ))
        };
        algo.train(&mut buffer, &mut session, Some(&mut evaluator))?;

        let best: DummyPolicy =
            <DummyAlgorithm as Algorithm<DummyBuffer>>::load_model(&model_dir.join("best.bin"))?;
        assert_eq!(best.weights, vec![2.0]);
        assert_eq!(session.best_eval_return(), Some(0.0));
        Ok(())
    }

    #[test]
    fn test_keep_best_disabled() -> Result<()> {
        init();
        let dir = TempDir::new("session")?;
        let model_dir = dir.path().join("models");

        let mut session = TrainSession::new(
            Box::new(NullRecorder {}),
            &model_dir,
            SessionConfig::default().keep_best(false),
        )?;
        let mut buffer = DummyBuffer::build(&4);
        let mut algo = DummyAlgorithm::new(2);

        let mut evaluator = |policy: &DummyPolicy| -> Result<Record> {
            Ok(Record::from_scalar("eval_return", policy.weights[0]))
        };
        algo.train(&mut buffer, &mut session, Some(&mut evaluator))?;

        assert!(!model_dir.join("best.bin").exists());
        Ok(())
    }
}
