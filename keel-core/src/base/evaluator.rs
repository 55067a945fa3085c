//! Evaluate policies produced during training.
use crate::record::Record;
use anyhow::Result;

/// Evaluates a policy.
///
/// Implementations own whatever they need for evaluation, typically held-out
/// data. Any `FnMut(&P) -> Result<Record>` closure is an evaluator:
///
/// ```rust
/// use anyhow::Result;
/// use keel_core::{record::Record, Evaluator};
///
/// let mut evaluator = |policy: &Vec<f32>| -> Result<Record> {
///     Ok(Record::from_scalar("eval_return", -policy[0].abs()))
/// };
/// let record = evaluator.evaluate(&vec![0.5f32]).unwrap();
/// assert_eq!(record.get_scalar("eval_return").unwrap(), -0.5);
/// ```
pub trait Evaluator<P> {
    /// Evaluate the given policy.
    ///
    /// The returned record is merged into the epoch record by convention;
    /// an `eval_return` scalar drives best-model tracking in
    /// [`TrainSession`](crate::TrainSession).
    fn evaluate(&mut self, policy: &P) -> Result<Record>;
}

impl<P, F> Evaluator<P> for F
where
    F: FnMut(&P) -> Result<Record>,
{
    fn evaluate(&mut self, policy: &P) -> Result<Record> {
        self(policy)
    }
}
