//! Loading the memory from externally supplied arrays.
use super::ReplayMemory;
use crate::error::{ReplayMemoryError, Result};
use log::info;
use ndarray::{s, Array4};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// Four parallel arrays of transitions.
///
/// The arrays are serialized under the names `arr_0` (actions), `arr_1`
/// (rewards), `arr_2` (frames of shape `(n, height, width, 1)`) and `arr_3`
/// (terminal flags).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Actions.
    #[serde(rename = "arr_0")]
    pub actions: Vec<i32>,

    /// Rewards.
    #[serde(rename = "arr_1")]
    pub rewards: Vec<f32>,

    /// Frames.
    #[serde(rename = "arr_2")]
    pub frames: Array4<u8>,

    /// Terminal flags.
    #[serde(rename = "arr_3")]
    pub terminals: Vec<bool>,
}

impl Snapshot {
    /// Reads a snapshot written by [`Snapshot::save`].
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let rdr = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(rdr)?)
    }

    /// Writes the snapshot to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let wtr = BufWriter::new(File::create(path)?);
        bincode::serialize_into(wtr, self)?;
        Ok(())
    }

    /// Returns the number of transitions, i.e., the length of the action array.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if the snapshot holds no transition.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ReplayMemory {
    /// Replaces the content of the memory with the transitions in `snapshot`.
    ///
    /// The transitions fill slots `0..snapshot.len()`. The write cursor is set
    /// to the last loaded slot, so the next append overwrites the last loaded
    /// transition.
    ///
    /// The arrays must have equal lengths, the frames must have the configured
    /// shape, and the snapshot must fit in the memory. Otherwise the memory is
    /// left untouched.
    pub fn load(&mut self, snapshot: &Snapshot) -> Result<()> {
        let n = snapshot.len();
        let n_frames = snapshot.frames.shape()[0];
        if snapshot.rewards.len() != n || n_frames != n || snapshot.terminals.len() != n {
            return Err(ReplayMemoryError::SnapshotLengthMismatch {
                actions: n,
                rewards: snapshot.rewards.len(),
                frames: n_frames,
                terminals: snapshot.terminals.len(),
            });
        }
        let expected = self.frame_shape();
        if snapshot.frames.shape()[1..] != expected[..] {
            return Err(ReplayMemoryError::Shape {
                expected: expected.to_vec(),
                got: snapshot.frames.shape()[1..].to_vec(),
            });
        }
        if n > self.capacity() {
            return Err(ReplayMemoryError::SnapshotTooLarge {
                len: n,
                capacity: self.capacity(),
            });
        }

        self.actions[..n].copy_from_slice(&snapshot.actions);
        self.rewards[..n].copy_from_slice(&snapshot.rewards);
        self.frames.slice_mut(s![..n, .., .., ..]).assign(&snapshot.frames);
        self.terminals[..n].copy_from_slice(&snapshot.terminals);
        self.count = n;
        self.cursor = n.saturating_sub(1);
        info!(
            "Loaded {} transitions into replay memory, write cursor = {}",
            n, self.cursor
        );

        Ok(())
    }

    /// Returns the stored transitions in slot order.
    pub fn snapshot(&self) -> Snapshot {
        let n = self.count;
        Snapshot {
            actions: self.actions[..n].to_vec(),
            rewards: self.rewards[..n].to_vec(),
            frames: self.frames.slice(s![..n, .., .., ..]).to_owned(),
            terminals: self.terminals[..n].to_vec(),
        }
    }
}
