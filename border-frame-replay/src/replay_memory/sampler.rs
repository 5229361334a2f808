//! Sampling of valid indices.
use super::ReplayMemory;
use crate::error::{ReplayMemoryError, Result};
use log::{debug, warn};
use rand::Rng;

impl ReplayMemory {
    /// Samples `batch_size` indices whose states can be stacked.
    ///
    /// Each index `ix` is drawn uniformly from `history_length..count` and
    /// redrawn until
    ///
    /// - the window `ix - history_length..=ix` does not straddle the write
    ///   cursor, where freshly written frames meet stale ones, and
    /// - none of the flags `ix - history_length..ix` is terminal, so that both
    ///   `state_at(ix - 1)` and `state_at(ix)` lie in a single episode.
    ///
    /// Slots are drawn independently; an index may appear more than once.
    ///
    /// Fails with [`ReplayMemoryError::InsufficientData`] while fewer than
    /// `history_length` transitions are stored, and with
    /// [`ReplayMemoryError::NoValidWindow`] when a slot exhausts
    /// `max_sample_attempts` draws.
    pub fn sample_indices<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<usize>> {
        let history_length = self.history_length();
        if self.count < history_length {
            return Err(ReplayMemoryError::InsufficientData {
                count: self.count,
                history_length,
            });
        }
        if self.count == history_length {
            // No candidate in history_length..count.
            return Err(ReplayMemoryError::NoValidWindow { attempts: 0 });
        }

        (0..self.batch_size())
            .map(|_| self.sample_index(rng))
            .collect()
    }

    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
        let max_attempts = self.config.max_sample_attempts;

        for attempt in 1..=max_attempts {
            let ix = rng.gen_range(self.history_length()..self.count);
            if self.is_valid_index(ix) {
                if attempt > 100 {
                    debug!("Sampled index {} after {} attempts", ix, attempt);
                }
                return Ok(ix);
            }
        }

        warn!(
            "No valid window in {} transitions after {} attempts",
            self.count, max_attempts
        );
        Err(ReplayMemoryError::NoValidWindow {
            attempts: max_attempts,
        })
    }

    /// Returns `true` if `ix` can be the last index of a sampled transition.
    fn is_valid_index(&self, ix: usize) -> bool {
        let history_length = self.history_length();
        if ix < history_length || ix >= self.count {
            return false;
        }
        if ix >= self.cursor && ix - history_length <= self.cursor {
            return false;
        }
        !self.terminals[ix - history_length..ix].iter().any(|&t| t)
    }
}
