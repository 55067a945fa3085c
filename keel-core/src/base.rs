//! Core functionalities.
mod algorithm;
mod buffer;
mod evaluator;
pub use algorithm::Algorithm;
pub use buffer::{ExperienceBufferBase, NullReplayBuffer, ReplayBufferBase};
pub use evaluator::Evaluator;
