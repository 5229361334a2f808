//! Replay buffer interfaces.
//!
//! A training loop pushes transitions through [`ExperienceBufferBase`] and
//! draws minibatches through [`ReplayBufferBase`]. The two traits are kept
//! apart so that a process which only collects experiences does not need to
//! know how batches are built.

use anyhow::Result;
use rand::Rng;

/// Interface for buffers that store experiences from environments.
///
/// # Examples
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

    /// Pushes a new experience into the buffer.
    fn push(&mut self, tr: Self::Item) -> Result<()>;

    /// Returns the current number of experiences in the buffer.
    fn len(&self) -> usize;
}

/// Interface for replay buffers that generate batches for training.
pub trait ReplayBufferBase: Sized {
    /// Configuration parameters for the replay buffer.
    type Config: Clone;

    /// The type of batch generated for training.
    type Batch;

    /// Builds a new replay buffer from the given configuration.
    fn build(config: &Self::Config) -> Result<Self>;

    /// Constructs a batch of experiences for training.
    ///
    /// Randomness is drawn from `rng` only, so a seeded generator gives
    /// reproducible batches.
    fn batch<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Self::Batch>;
}
