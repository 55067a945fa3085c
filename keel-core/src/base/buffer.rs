//! Experience buffer interfaces.
use anyhow::Result;

/// Interface for buffers that store experiences.
///
/// ```ignore
/// struct SimpleBuffer<T> {
///     items: Vec<T>,
/// }
///
/// impl<T> ExperienceBufferBase for SimpleBuffer<T> {
///     type Item = T;
///
///     fn push(&mut self, tr: T) -> Result<()> {
///         self.items.push(tr);
///         Ok(())
///     }
///
///     fn len(&self) -> usize {
///         self.items.len()
///     }
/// }
/// ```
pub trait ExperienceBufferBase {
    /// The type of items stored in the buffer.
    type Item;

    /// Pushes an experience into the buffer.
    fn push(&mut self, tr: Self::Item) -> Result<()>;

    /// The number of experiences in the buffer.
    fn len(&self) -> usize;
}

/// Interface for replay buffers that generate batches for training.
///
/// Independent of [`ExperienceBufferBase`]: filling the buffer and sampling
/// from it are separate concerns.
pub trait ReplayBufferBase {
    /// Configuration of the replay buffer.
    ///
    /// `Clone` supports building multiple instances with the same
    /// configuration.
    type Config: Clone;

    /// The type of batches generated for training.
    type Batch;

    /// Builds a replay buffer from the given configuration.
    fn build(config: &Self::Config) -> Self;

    /// Constructs a batch of experiences for an optimization step.
    fn batch(&mut self, size: usize) -> Result<Self::Batch>;
}

/// A dummy replay buffer that does nothing.
///
/// This struct is used as a placeholder when a replay buffer is not needed.
pub struct NullReplayBuffer;

impl ReplayBufferBase for NullReplayBuffer {
    type Batch = ();
    type Config = ();

    #[allow(unused_variables)]
    fn build(config: &Self::Config) -> Self {
        Self
    }

    #[allow(unused_variables)]
    fn batch(&mut self, size: usize) -> Result<Self::Batch> {
        unimplemented!();
    }
}
