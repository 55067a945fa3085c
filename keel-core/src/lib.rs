#![warn(missing_docs)]
//! Core abstractions of a training scaffold for offline reinforcement learning.
//!
//! Algorithms implement [`Algorithm`] and drive their own optimization loop,
//! reporting progress to a [`TrainSession`] once per epoch. Network weights
//! live in [`param::ParamSet`]s; [`param::soft_update`] keeps a target set
//! tracking an online set. Metrics travel as [`record::Record`]s through
//! [`record::Recorder`] implementations.
pub mod dummy;
pub mod error;
pub mod param;
pub mod record;

mod base;
pub use base::{
    Algorithm, Evaluator, ExperienceBufferBase, NullReplayBuffer, ReplayBufferBase,
};

mod session;
pub use session::{SessionConfig, TrainSession};
