//! A file-based experiment tracker for keel-core.
//!
//! Runs are stored under a root directory on the local file system:
//!
//! ```text
//! <root>/runs/<run_id>/meta.json     run name, status and timestamps
//! <root>/runs/<run_id>/params.json   flattened run parameters
//! <root>/runs/<run_id>/metrics.csv   scalar metrics, one row per value
//! <root>/runs/<run_id>/models/       model checkpoints
//! ```
//!
//! Training configurations and metrics can be logged to a run.
//! The following code is an example. Nested configuration parameters will be flattened,
//! logged like `hyper_params.param1`, `hyper_params.param2`.
//!
//! ```no_run
//! use anyhow::Result;
//! use keel_core::record::{Record, RecordValue, Recorder};
//! use keel_tracking::TrackingStore;
//! use serde::Serialize;
//!
//! // Nested Configuration struct
//! #[derive(Debug, Serialize)]
//! struct Config {
//!     buffer_params: String,
//!     hyper_params: HyperParameters,
//! }
//!
//! #[derive(Debug, Serialize)]
//! struct HyperParameters {
//!     param1: i64,
//!     param2: Param2,
//!     param3: Param3,
//! }
//!
//! #[derive(Debug, Serialize)]
//! enum Param2 {
//!     Variant1,
//!     Variant2(f32),
//! }
//!
//! #[derive(Debug, Serialize)]
//! struct Param3 {
//!     dataset_name: String,
//! }
//!
//! fn main() -> Result<()> {
//!     env_logger::init();
//!
//!     let config1 = Config {
//!         buffer_params: "buffer1".to_string(),
//!         hyper_params: HyperParameters {
//!             param1: 0,
//!             param2: Param2::Variant1,
//!             param3: Param3 {
//!                 dataset_name: "a".to_string(),
//!             },
//!         },
//!     };
//!     let config2 = Config {
//!         buffer_params: "buffer2".to_string(),
//!         hyper_params: HyperParameters {
//!             param1: 0,
//!             param2: Param2::Variant2(3.0),
//!             param3: Param3 {
//!                 dataset_name: "a".to_string(),
//!             },
//!         },
//!     };
//!
//!     // Open a store for runs
//!     let store = TrackingStore::new("./keel_store")?;
//!
//!     // Create runs for logging
//!     let mut run1 = store.create_run("")?;
//!     let mut run2 = store.create_run("")?;
//!     run1.log_params(&config1)?;
//!     run2.log_params(&config2)?;
//!
//!     // Logging while training
//!     for epoch in 0..100 {
//!         let epoch = epoch as f32;
//!
//!         // Create a record
//!         let mut record = Record::empty();
//!         record.insert("epoch", RecordValue::Scalar(epoch));
//!         record.insert("loss", RecordValue::Scalar((-1f32 * epoch).exp()));
//!
//!         // Log metrics in the record
//!         run1.write(record);
//!     }
//!
//!     // Logging while training
//!     for epoch in 0..100 {
//!         let epoch = epoch as f32;
//!
//!         // Create a record
//!         let mut record = Record::empty();
//!         record.insert("epoch", RecordValue::Scalar(epoch));
//!         record.insert("loss", RecordValue::Scalar((-0.5f32 * epoch).exp()));
//!
//!         // Log metrics in the record
//!         run2.write(record);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! When a [`TrackingRun`] is dropped, the status of the run in `meta.json` is updated
//! to `FINISHED`.
mod run;
mod store;
mod writer;
pub use run::{RunInfo, RunStatus};
pub use store::TrackingStore;
use std::time::{SystemTime, UNIX_EPOCH};
pub use writer::TrackingRun;

/// Code adapted from <https://stackoverflow.com/questions/26593387>.
fn system_time_as_millis() -> u128 {
    let time = SystemTime::now();
    time.duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis()
}
