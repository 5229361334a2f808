//! A single environment step.
use ndarray::Array3;

/// One environment step as pushed through
/// [`ExperienceBufferBase`](crate::ExperienceBufferBase).
///
/// The memory does not keep `Transition` values; their fields are spread over
/// its parallel arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Index of the action taken.
    pub action: i32,

    /// Grayscale frame of shape `(height, width, 1)` observed after the action.
    pub frame: Array3<u8>,

    /// Reward received.
    pub reward: f32,

    /// `true` if the step ended the episode.
    pub terminal: bool,
}

impl Transition {
    /// Creates a transition.
    pub fn new(action: i32, frame: Array3<u8>, reward: f32, terminal: bool) -> Self {
        Self {
            action,
            frame,
            reward,
            terminal,
        }
    }
}
