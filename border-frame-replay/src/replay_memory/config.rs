//! Configuration of [`ReplayMemory`](super::ReplayMemory).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`ReplayMemory`](super::ReplayMemory).
///
/// All parameters are fixed for the lifetime of the memory built from it.
///
/// # Examples
///
/// ```rust
/// use border_frame_replay::ReplayMemoryConfig;
///
/// let config = ReplayMemoryConfig::default()
///     .capacity(100_000)
///     .history_length(4)
///     .batch_size(32);
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ReplayMemoryConfig {
    /// Maximum number of transitions that can be stored.
    /// When the memory is full, new transitions replace the oldest ones.
    pub capacity: usize,

    /// Height of a frame.
    pub frame_height: usize,

    /// Width of a frame.
    pub frame_width: usize,

    /// Number of frames stacked together to create a state.
    pub history_length: usize,

    /// Number of transitions returned in a minibatch.
    pub batch_size: usize,

    /// Number of candidates drawn for one minibatch slot before the sampler
    /// gives up.
    pub max_sample_attempts: usize,
}

impl Default for ReplayMemoryConfig {
    fn default() -> Self {
        Self {
            capacity: 1_000_000,
            frame_height: 84,
            frame_width: 84,
            history_length: 4,
            batch_size: 32,
            max_sample_attempts: 10_000,
        }
    }
}

impl ReplayMemoryConfig {
    /// Sets the capacity of the replay memory.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the height of a frame.
    pub fn frame_height(mut self, frame_height: usize) -> Self {
        self.frame_height = frame_height;
        self
    }

    /// Sets the width of a frame.
    pub fn frame_width(mut self, frame_width: usize) -> Self {
        self.frame_width = frame_width;
        self
    }

    /// Sets the number of stacked frames.
    pub fn history_length(mut self, history_length: usize) -> Self {
        self.history_length = history_length;
        self
    }

    /// Sets the minibatch size.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the retry budget of the sampler.
    pub fn max_sample_attempts(mut self, max_sample_attempts: usize) -> Self {
        self.max_sample_attempts = max_sample_attempts;
        self
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
