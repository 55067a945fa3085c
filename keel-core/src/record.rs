//! Types and traits for recording training metrics.
//!
//! Metrics travel as [`Record`]s, maps from string keys to [`RecordValue`]s.
//! A [`Recorder`] writes records to some destination; an
//! [`AggregateRecorder`] additionally buffers records in a
//! [`RecordStorage`] and writes an aggregated record on flush.
//!
//! ```rust
//! use keel_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("epoch", RecordValue::Scalar(1.0));
//! record.insert("loss", RecordValue::Scalar(0.5));
//! assert_eq!(record.get_scalar("loss").unwrap(), 0.5);
//! ```
//!
//! The `epoch` key has a special meaning: recorders treat it as the step of
//! the flushed record. [`AggregateRecorder::flush`] implementations insert it
//! from the epoch they are given.
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::{AggregateRecorder, Recorder};
pub use storage::RecordStorage;
