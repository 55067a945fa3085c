//! A training scaffold for offline reinforcement learning in Rust.
//!
//! Keel consists of the following crates:
//!
//! * [keel-core](https://crates.io/crates/keel-core) provides basic traits and
//!   functions generic to replay buffers and training algorithms, including soft
//!   synchronization of parameter sets between online and target models.
//! * [keel-tensorboard](https://crates.io/crates/keel-tensorboard) has
//!   `TensorboardRecorder` struct to write records which can be shown in Tensorboard.
//!   It is based on [tensorboard-rs](https://crates.io/crates/tensorboard-rs).
//! * [keel-tracking](https://crates.io/crates/keel-tracking) logs run metadata,
//!   parameters and metrics of training runs to directories on the local file system.
//! * [keel](https://crates.io/crates/keel) is just a collection of examples.

pub mod util;
