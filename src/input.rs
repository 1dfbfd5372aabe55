//! Backend-neutral snapshot of the keys driving the camera.

/// Which camera actions are currently held down.
///
/// The windowing layer fills this in each frame; [`CameraController`] reads it.
///
/// [`CameraController`]: crate::camera::CameraController
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    // Movement
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,

    // Turning
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub roll_left: bool,
    pub roll_right: bool,

    /// Restore the default camera.
    pub reset: bool,
}

impl InputState {
    /// True when no action is held.
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}
