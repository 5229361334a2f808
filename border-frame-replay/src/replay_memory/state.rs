//! Assembly of stacked states.
use super::ReplayMemory;
use crate::error::{ReplayMemoryError, Result};
use ndarray::{s, ArrayView3};

impl ReplayMemory {
    /// Returns the stacked state ending at `index`.
    ///
    /// The state is a view of the frames `index - history_length + 1 ..= index`
    /// with shape `(history_length, height, width)`; the channel axis of the
    /// stored frames is dropped.
    pub fn state_at(&self, index: usize) -> Result<ArrayView3<u8>> {
        if self.count == 0 {
            return Err(ReplayMemoryError::EmptyBuffer);
        }
        let min = self.history_length() - 1;
        if index < min {
            return Err(ReplayMemoryError::IndexTooSmall { index, min });
        }
        if index >= self.count {
            return Err(ReplayMemoryError::IndexOutOfRange {
                index,
                count: self.count,
            });
        }

        Ok(self.frames.slice(s![index - min..=index, .., .., 0]))
    }
}
