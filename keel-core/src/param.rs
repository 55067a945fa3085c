//! Named parameter sets and their synchronization.
//!
//! A [`ParamSet`] holds the weights of a network as named `ndarray` tensors.
//! Algorithms typically keep two sets, an online set updated by the
//! optimizer and a target set trailing it through [`soft_update`].
mod base;
mod stats;
mod sync;
pub use base::{tensor_from_vec, ParamSet};
pub use stats::param_stats;
pub use sync::{copy_from, soft_update};
