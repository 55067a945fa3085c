//! Training algorithm interface.
use super::{Evaluator, ReplayBufferBase};
use crate::session::TrainSession;
use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    io::{BufReader, BufWriter},
    path::Path,
};

/// Represents a training algorithm over a replay buffer of type `R`.
///
/// The optimization loop belongs to the implementation: [`Algorithm::train`]
/// runs it to completion, sampling from the buffer and reporting each epoch
/// to the [`TrainSession`]. The session takes care of recording, checkpoint
/// intervals and best-model tracking.
///
/// [`Algorithm::Policy`] is the deployable artifact of training. It must be
/// serializable; the provided [`Algorithm::save_model`] and
/// [`Algorithm::load_model`] store it in binary form.
pub trait Algorithm<R: ReplayBufferBase> {
    /// The deployable artifact produced by training.
    type Policy: Serialize + DeserializeOwned;

    /// Runs the optimization loop over experiences in `buffer`.
    ///
    /// When an evaluator is given, implementations are expected to evaluate
    /// the current policy each epoch and merge the returned record into the
    /// epoch record before passing it to
    /// [`TrainSession::log_epoch`](crate::TrainSession::log_epoch).
    fn train(
        &mut self,
        buffer: &mut R,
        session: &mut TrainSession,
        evaluator: Option<&mut dyn Evaluator<Self::Policy>>,
    ) -> Result<()>;

    /// Returns the current policy.
    fn policy(&self) -> &Self::Policy;

    /// Saves the current policy to the given path.
    ///
    /// Parent directories are created when missing.
    fn save_model(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(path)?;
        bincode::serialize_into(BufWriter::new(file), self.policy())?;
        Ok(())
    }

    /// Loads a policy back from the given path.
    fn load_model(path: &Path) -> Result<Self::Policy> {
        let file = fs::File::open(path)?;
        Ok(bincode::deserialize_from(BufReader::new(file))?)
    }
}

#[cfg(test)]
mod tests {
    use super::Algorithm;
    use crate::{
        base::NullReplayBuffer,
        dummy::{DummyAlgorithm, DummyPolicy},
    };
    use anyhow::Result;
    use tempdir::TempDir;

    #[test]
    fn test_save_load_roundtrip() -> Result<()> {
        let dir = TempDir::new("algorithm")?;
        let path = dir.path().join("models").join("1.bin");

        let algo = DummyAlgorithm::new(1);
        <DummyAlgorithm as Algorithm<NullReplayBuffer>>::save_model(&algo, &path)?;
        assert!(path.exists());

        let policy: DummyPolicy =
            <DummyAlgorithm as Algorithm<NullReplayBuffer>>::load_model(&path)?;
        assert_eq!(policy, DummyPolicy { weights: vec![0.0] });
        Ok(())
    }
}
