//! Transition store.
use super::{Minibatch, ReplayMemoryConfig, Transition};
use crate::{
    error::{ReplayMemoryError, Result},
    ExperienceBufferBase, ReplayBufferBase,
};
use log::{info, trace};
use ndarray::{s, Array4, ArrayView3};
use rand::Rng;

/// Replay memory that stores the last `capacity` transitions.
///
/// Actions, rewards, frames and terminal flags live in parallel arrays of
/// length `capacity`; slot `i` of every array belongs to the same transition.
/// The arrays are allocated once in [`ReplayMemory::new`] and overwritten
/// circularly by [`ReplayMemory::append`].
///
/// Slots `len()..capacity()` have never been written while the memory is
/// filling up and are never read.
#[derive(Debug, Clone)]
pub struct ReplayMemory {
    /// Configuration the memory was built from.
    pub(super) config: ReplayMemoryConfig,

    /// Number of committed slots.
    pub(super) count: usize,

    /// Slot overwritten by the next append.
    pub(super) cursor: usize,

    pub(super) actions: Vec<i32>,

    pub(super) rewards: Vec<f32>,

    /// Frames of shape `(capacity, height, width, 1)`.
    pub(super) frames: Array4<u8>,

    pub(super) terminals: Vec<bool>,
}

impl ReplayMemory {
    /// Builds an empty replay memory.
    ///
    /// Fails with [`ReplayMemoryError::InvalidConfig`] if a size parameter is
    /// zero or the history length leaves no room for a window in the memory.
    pub fn new(config: &ReplayMemoryConfig) -> Result<Self> {
        Self::check_config(config)?;
        let capacity = config.capacity;
        info!(
            "Construct replay memory with capacity = {}, frame = {}x{}, history length = {}",
            capacity, config.frame_height, config.frame_width, config.history_length
        );

        Ok(Self {
            config: config.clone(),
            count: 0,
            cursor: 0,
            actions: vec![0; capacity],
            rewards: vec![0.; capacity],
            frames: Array4::zeros((capacity, config.frame_height, config.frame_width, 1)),
            terminals: vec![false; capacity],
        })
    }

    fn check_config(config: &ReplayMemoryConfig) -> Result<()> {
        let invalid = |msg: &str| Err(ReplayMemoryError::InvalidConfig(msg.to_string()));

        if config.capacity == 0 {
            return invalid("capacity must be positive");
        }
        if config.frame_height == 0 || config.frame_width == 0 {
            return invalid("frame dimensions must be positive");
        }
        if config.history_length == 0 {
            return invalid("history_length must be positive");
        }
        if config.batch_size == 0 {
            return invalid("batch_size must be positive");
        }
        if config.max_sample_attempts == 0 {
            return invalid("max_sample_attempts must be positive");
        }
        if config.history_length >= config.capacity {
            return invalid("history_length must be smaller than capacity");
        }
        Ok(())
    }

    /// Adds a transition.
    ///
    /// * `action` - index of the action the agent performed
    /// * `frame` - grayscale frame of shape `(height, width, 1)`
    /// * `reward` - reward the agent received for the action
    /// * `terminal` - whether the episode terminated
    ///
    /// Fails with [`ReplayMemoryError::Shape`] for a frame of any other
    /// shape, in which case the memory is left untouched.
    pub fn append(
        &mut self,
        action: i32,
        frame: ArrayView3<u8>,
        reward: f32,
        terminal: bool,
    ) -> Result<()> {
        let expected = self.frame_shape();
        if frame.shape() != &expected[..] {
            return Err(ReplayMemoryError::Shape {
                expected: expected.to_vec(),
                got: frame.shape().to_vec(),
            });
        }
        trace!("ReplayMemory::append(), slot = {}", self.cursor);

        let i = self.cursor;
        self.actions[i] = action;
        self.frames.slice_mut(s![i, .., .., ..]).assign(&frame);
        self.rewards[i] = reward;
        self.terminals[i] = terminal;
        self.count = self.count.max(i + 1);
        self.cursor = (i + 1) % self.capacity();

        Ok(())
    }

    /// Returns the maximum number of transitions.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Returns the number of stored transitions.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no transition has been stored.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the slot overwritten by the next append.
    pub fn write_cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the number of frames in a stacked state.
    pub fn history_length(&self) -> usize {
        self.config.history_length
    }

    /// Returns the number of transitions in a minibatch.
    pub fn batch_size(&self) -> usize {
        self.config.batch_size
    }

    /// Returns the shape `(height, width, 1)` of an appended frame.
    pub fn frame_shape(&self) -> [usize; 3] {
        [self.config.frame_height, self.config.frame_width, 1]
    }

    /// Returns the configuration of the memory.
    pub fn config(&self) -> &ReplayMemoryConfig {
        &self.config
    }

    /// Returns the action stored in slot `ix`.
    pub fn action(&self, ix: usize) -> Option<i32> {
        self.committed(ix).map(|ix| self.actions[ix])
    }

    /// Returns the reward stored in slot `ix`.
    pub fn reward(&self, ix: usize) -> Option<f32> {
        self.committed(ix).map(|ix| self.rewards[ix])
    }

    /// Returns the terminal flag stored in slot `ix`.
    pub fn is_terminal(&self, ix: usize) -> Option<bool> {
        self.committed(ix).map(|ix| self.terminals[ix])
    }

    fn committed(&self, ix: usize) -> Option<usize> {
        if ix < self.count {
            Some(ix)
        } else {
            None
        }
    }
}

impl ExperienceBufferBase for ReplayMemory {
    type Item = Transition;

    fn push(&mut self, tr: Self::Item) -> anyhow::Result<()> {
        self.append(tr.action, tr.frame.view(), tr.reward, tr.terminal)?;
        Ok(())
    }

    fn len(&self) -> usize {
        self.count
    }
}

impl ReplayBufferBase for ReplayMemory {
    type Config = ReplayMemoryConfig;
    type Batch = Minibatch;

    fn build(config: &Self::Config) -> anyhow::Result<Self> {
        Ok(Self::new(config)?)
    }

    fn batch<R: Rng + ?Sized>(&mut self, rng: &mut R) -> anyhow::Result<Self::Batch> {
        Ok(self.get_minibatch(rng)?)
    }
}
