//! Configuration of [`TrainSession`](super::TrainSession).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`TrainSession`](super::TrainSession).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct SessionConfig {
    /// Interval of saving checkpoints in epochs.
    pub save_interval: usize,

    /// Interval of flushing records in epochs.
    pub flush_interval: usize,

    /// Keeps `best.bin` updated whenever the `eval_return` entry of an
    /// epoch record improves.
    pub keep_best: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            save_interval: 1,
            flush_interval: 1,
            keep_best: true,
        }
    }
}

impl SessionConfig {
    /// Sets the interval of saving checkpoints in epochs.
    pub fn save_interval(mut self, save_interval: usize) -> Self {
        self.save_interval = save_interval;
        self
    }

    /// Sets the interval of flushing records in epochs.
    pub fn flush_interval(mut self, flush_interval: usize) -> Self {
        self.flush_interval = flush_interval;
        self
    }

    /// Sets whether the best model is kept.
    pub fn keep_best(mut self, keep_best: bool) -> Self {
        self.keep_best = keep_best;
        self
    }

    /// Constructs [`SessionConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`SessionConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
