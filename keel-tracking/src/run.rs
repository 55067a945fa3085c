use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Status of a run, as stored in `meta.json`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// The run is logging records.
    Running,

    /// The run has been finished.
    Finished,
}

/// Metadata of a run, as stored in `meta.json`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RunInfo {
    /// Identifier of the run, unique within a store.
    pub run_id: String,

    /// Name of the run.
    pub run_name: String,

    /// Status of the run.
    pub status: RunStatus,

    /// Start time of the run in milliseconds since the epoch.
    pub start_time: i64,

    /// End time of the run in milliseconds since the epoch.
    pub end_time: Option<i64>,
}

pub(crate) fn write_meta(run_dir: &Path, info: &RunInfo) -> Result<()> {
    let path = run_dir.join("meta.json");
    let json = serde_json::to_string_pretty(info)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

pub(crate) fn load_meta(run_dir: &Path) -> Result<RunInfo> {
    let path = run_dir.join("meta.json");
    let json = fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
    Ok(serde_json::from_str(&json)?)
}
