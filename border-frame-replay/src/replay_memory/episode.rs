//! Extraction of whole episodes.
use super::ReplayMemory;
use crate::error::{ReplayMemoryError, Result};
use ndarray::{s, Array3};
use rand::Rng;

/// An episode cut out of [`ReplayMemory`].
///
/// All fields have the same length. `next_states[i]` is the frame following
/// `states[i]`. The terminal transition closing the episode is not part of
/// it, so `terminals` is all `false`.
#[derive(Clone, Debug, PartialEq)]
pub struct Episode {
    /// Frames of shape `(len, height, width)`.
    pub states: Array3<u8>,

    /// Actions.
    pub actions: Vec<i32>,

    /// Rewards.
    pub rewards: Vec<f32>,

    /// Frames of shape `(len, height, width)`, shifted by one step.
    pub next_states: Array3<u8>,

    /// Terminal flags.
    pub terminals: Vec<bool>,
}

impl Episode {
    /// Returns the number of steps.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if the episode has no step.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ReplayMemory {
    /// Returns the episode containing a uniformly drawn index.
    pub fn random_episode<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Episode> {
        if self.count == 0 {
            return Err(ReplayMemoryError::EmptyBuffer);
        }
        let ix = rng.gen_range(0..self.count);
        self.episode_at(ix)
    }

    /// Returns the episode containing index `ix`.
    ///
    /// The episode starts right after the nearest terminal flag before `ix`
    /// (or at slot 0) and ends right before the nearest terminal flag at or
    /// after `ix`. If no terminal follows, the episode is still open and runs
    /// to the last stored transition, which is dropped because its next frame
    /// does not exist yet.
    pub fn episode_at(&self, ix: usize) -> Result<Episode> {
        if self.count == 0 {
            return Err(ReplayMemoryError::EmptyBuffer);
        }
        if ix >= self.count {
            return Err(ReplayMemoryError::IndexOutOfRange {
                index: ix,
                count: self.count,
            });
        }

        let start = self.terminals[..ix]
            .iter()
            .rposition(|&t| t)
            .map_or(0, |l| l + 1);
        let end = match self.terminals[ix..self.count].iter().position(|&t| t) {
            Some(r) => ix + r,
            None => self.count - 1,
        };

        Ok(Episode {
            states: self.frames.slice(s![start..end, .., .., 0]).to_owned(),
            actions: self.actions[start..end].to_vec(),
            rewards: self.rewards[start..end].to_vec(),
            next_states: self.frames.slice(s![start + 1..end + 1, .., .., 0]).to_owned(),
            terminals: self.terminals[start..end].to_vec(),
        })
    }
}
