//! Errors in the library.
use thiserror::Error;

/// Result type of the operations of [`ReplayMemory`](crate::ReplayMemory).
pub type Result<T> = std::result::Result<T, ReplayMemoryError>;

/// Errors raised by [`ReplayMemory`](crate::ReplayMemory).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReplayMemoryError {
    /// The frame does not have the configured `(height, width, 1)` shape.
    #[error("Dimension of frame is wrong: expected {expected:?}, got {got:?}")]
    Shape {
        /// Expected shape.
        expected: Vec<usize>,
        /// Shape of the given frame.
        got: Vec<usize>,
    },

    /// The replay memory holds no transition.
    #[error("The replay memory is empty")]
    EmptyBuffer,

    /// Not enough transitions to stack a state.
    #[error("Not enough memories to get a minibatch: {count} stored, history length {history_length}")]
    InsufficientData {
        /// Number of stored transitions.
        count: usize,
        /// Number of stacked frames.
        history_length: usize,
    },

    /// The index leaves no room for a full lookback window.
    #[error("Index must be at least {min}, got {index}")]
    IndexTooSmall {
        /// Requested index.
        index: usize,
        /// Smallest admissible index.
        min: usize,
    },

    /// The index points past the committed transitions.
    #[error("Index {index} out of range for {count} stored transitions")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of stored transitions.
        count: usize,
    },

    /// No valid window was found within the retry budget.
    #[error("No valid state window found after {attempts} attempts")]
    NoValidWindow {
        /// Number of candidates drawn before giving up.
        attempts: usize,
    },

    /// The arrays of a snapshot differ in length.
    #[error("Snapshot arrays differ in length: actions {actions}, rewards {rewards}, frames {frames}, terminals {terminals}")]
    SnapshotLengthMismatch {
        /// Length of the action array.
        actions: usize,
        /// Length of the reward array.
        rewards: usize,
        /// Number of frames.
        frames: usize,
        /// Length of the terminal flag array.
        terminals: usize,
    },

    /// The snapshot holds more transitions than the memory can.
    #[error("Snapshot of {len} transitions exceeds capacity {capacity}")]
    SnapshotTooLarge {
        /// Number of transitions in the snapshot.
        len: usize,
        /// Capacity of the memory.
        capacity: usize,
    },

    /// The configuration cannot be used to build a memory.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
