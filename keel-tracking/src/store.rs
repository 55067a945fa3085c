use crate::run::load_meta;
use crate::{RunInfo, TrackingRun};
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Provides access to runs stored on the local file system.
///
/// A store owns a root directory and keeps each run in its own
/// subdirectory of `<root>/runs`.
pub struct TrackingStore {
    root: PathBuf,
}

impl TrackingStore {
    /// Open a store rooted at `root`.
    ///
    /// The directory is created if it does not exist.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("runs"))?;
        Ok(Self { root })
    }

    /// Open a store rooted at `.keel` in the home directory.
    pub fn new_in_home_dir() -> Result<Self> {
        let root = dirs::home_dir()
            .context("Couldn't find home directory")?
            .join(".keel");
        Self::new(root)
    }

    /// Directory of the run with the given ID.
    pub fn run_dir(&self, run_id: impl AsRef<str>) -> PathBuf {
        self.root.join("runs").join(run_id.as_ref())
    }

    /// Create a [`TrackingRun`] corresponding to a new run.
    ///
    /// If `run_name` is empty (`""`), a run name is generated from the run ID.
    pub fn create_run(&self, run_name: impl AsRef<str>) -> Result<TrackingRun> {
        let not_given_name = run_name.as_ref().len() == 0;
        let run_id = format!("{:016x}", fastrand::u64(..));
        let run_name = if not_given_name {
            let run_name = format!("run_{}", &run_id[..12]);
            info!("Run name '{}' has been automatically generated", run_name);
            run_name
        } else {
            run_name.as_ref().to_string()
        };
        let run_dir = self.run_dir(&run_id);
        fs::create_dir_all(run_dir.join("models"))?;
        TrackingRun::create(run_dir, run_id, run_name)
    }

    /// Metadata of the run with the given ID.
    pub fn load_run_info(&self, run_id: impl AsRef<str>) -> Result<RunInfo> {
        load_meta(&self.run_dir(run_id))
    }

    /// Metadata of all runs in the store, ordered by start time.
    pub fn runs(&self) -> Result<Vec<RunInfo>> {
        let mut runs = vec![];
        for entry in fs::read_dir(self.root.join("runs"))? {
            runs.push(load_meta(&entry?.path())?);
        }
        runs.sort_by_key(|info| info.start_time);
        Ok(runs)
    }
}
