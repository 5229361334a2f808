//! Circular replay memory of single frames.
//!
//! # Key Components
//!
//! - [`ReplayMemory`]: the transition store, with sampling, state assembly and
//!   episode extraction
//! - [`ReplayMemoryConfig`]: construction parameters
//! - [`Minibatch`]: stacked states and the transitions sampled for training
//! - [`Episode`]: one complete episode cut out of the memory
//! - [`Snapshot`]: the four parallel arrays a memory can be loaded from
//!
//! A stacked state ending at index `i` consists of the frames
//! `i - history_length + 1 ..= i`. The sampler only returns indices whose
//! lookback window neither contains a terminal flag nor straddles the write
//! cursor, so the states of a minibatch are temporally coherent.
mod base;
mod batch;
mod config;
mod episode;
mod sampler;
mod snapshot;
mod state;
mod transition;
pub use base::ReplayMemory;
pub use batch::Minibatch;
pub use config::ReplayMemoryConfig;
pub use episode::Episode;
pub use snapshot::Snapshot;
pub use transition::Transition;
