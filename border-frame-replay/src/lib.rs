#![warn(missing_docs)]
//! Replay memory of stacked frames for reinforcement learning.
//!
//! [`ReplayMemory`] keeps the last `capacity` transitions of an Atari-like
//! environment in pre-allocated parallel arrays: one grayscale frame, the
//! action, the reward and the terminal flag of each step. Stacked states of
//! `history_length` frames are assembled on demand when a minibatch is
//! sampled, so each frame is stored exactly once.
//!
//! ```no_run
//! use border_frame_replay::{ReplayMemory, ReplayMemoryConfig};
//! use ndarray::Array3;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ReplayMemoryConfig::default().capacity(10_000);
//! let mut memory = ReplayMemory::new(&config)?;
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! for step in 0..1_000 {
//!     let frame = Array3::<u8>::zeros((84, 84, 1));
//!     memory.append(0, frame.view(), 0.0, step % 100 == 99)?;
//! }
//!
//! let batch = memory.get_minibatch(&mut rng)?;
//! assert_eq!(batch.states.shape(), &[32, 84, 84, 4]);
//! # Ok(())
//! # }
//! ```
//!
//! The memory is a single-threaded structure. Writers need `&mut self`; when
//! several threads produce transitions, feed a single writer through a bounded
//! channel and guard the memory with a `RwLock`.
pub mod error;
pub mod replay_memory;

mod base;
pub use base::{ExperienceBufferBase, ReplayBufferBase};
pub use error::ReplayMemoryError;
pub use replay_memory::{
    Episode, Minibatch, ReplayMemory, ReplayMemoryConfig, Snapshot, Transition,
};
