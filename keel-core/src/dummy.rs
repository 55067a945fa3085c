//! This module is used for tests.
use crate::{
    base::{Algorithm, Evaluator, ExperienceBufferBase, ReplayBufferBase},
    record::Record,
    session::TrainSession,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Dummy policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DummyPolicy {
    /// Flat weights of the policy.
    pub weights: Vec<f32>,
}

/// Dummy in-memory buffer of scalar experiences.
pub struct DummyBuffer {
    items: Vec<f32>,
}

impl ExperienceBufferBase for DummyBuffer {
    type Item = f32;

    fn push(&mut self, tr: f32) -> Result<()> {
        self.items.push(tr);
        Ok(())
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

impl ReplayBufferBase for DummyBuffer {
    type Config = usize;
    type Batch = Vec<f32>;

    fn build(config: &Self::Config) -> Self {
        Self {
            items: Vec::with_capacity(*config),
        }
    }

    fn batch(&mut self, size: usize) -> Result<Self::Batch> {
        Ok(self.items.iter().rev().take(size).cloned().collect())
    }
}

/// Dummy algorithm emitting a decreasing loss for a fixed number of epochs.
///
/// The policy weight is set to the epoch number, so checkpoints written at
/// different epochs differ.
pub struct DummyAlgorithm {
    n_epochs: usize,
    policy: DummyPolicy,
}

impl DummyAlgorithm {
    /// Creates a dummy algorithm running for the given number of epochs.
    pub fn new(n_epochs: usize) -> Self {
        Self {
            n_epochs,
            policy: DummyPolicy {
                weights: vec![0.0],
            },
        }
    }
}

impl<R: ReplayBufferBase> Algorithm<R> for DummyAlgorithm {
    type Policy = DummyPolicy;

    fn train(
        &mut self,
        _buffer: &mut R,
        session: &mut TrainSession,
        mut evaluator: Option<&mut dyn Evaluator<Self::Policy>>,
    ) -> Result<()> {
        for epoch in 1..=self.n_epochs {
            self.policy.weights[0] = epoch as f32;

            let mut record = Record::from_scalar("loss", 1.0 / epoch as f32);
            if let Some(evaluator) = evaluator.as_mut() {
                record.merge_inplace(evaluator.evaluate(&self.policy)?);
            }

            session.log_epoch::<Self, R>(self, epoch, record)?;
        }
        Ok(())
    }

    fn policy(&self) -> &DummyPolicy {
        &self.policy
    }
}
