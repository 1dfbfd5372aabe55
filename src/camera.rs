//! Free-flying camera
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer
//!
//! Camera space puts the eye at the origin looking down -Z with +Y up.
//!
//! # Orientation
//!
//! Orientation is stored as a look vector and an up vector, neither of which
//! needs to be unit length. Turning the camera rotates both in place, so any
//! orientation is reachable. [`Camera::angle_to_norm`] recovers the Euler
//! angles that carry the current pair back to the canonical look (0, 0, -1)
//! and up (0, 1, 0); rotating the world by those angles re-expresses it in
//! camera space.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::input::InputState;
use crate::math::vec3::Vec3;
use crate::mesh::WireframeMesh;

pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 0.0, 3.0);
pub const DEFAULT_SCREEN_DISTANCE: f32 = 2.0;
pub const DEFAULT_CLIP_DISTANCE: f32 = 0.1;

/// Camera with position and look/up orientation.
///
/// `look` and `up` must not be parallel or zero length. This is not checked:
/// a degenerate pair yields a meaningless right vector and normalizing
/// rotation, but never panics.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    look: Vec3,
    up: Vec3,
    /// Distance from the eye to the projection plane, along `look`.
    screen_distance: f32,
    /// Distance from the eye to the near clip plane, along `look`.
    clip_distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            DEFAULT_POSITION,
            Vec3::FORWARD,
            Vec3::UP,
            DEFAULT_SCREEN_DISTANCE,
            DEFAULT_CLIP_DISTANCE,
        )
    }
}

impl Camera {
    pub fn new(
        position: Vec3,
        look: Vec3,
        up: Vec3,
        screen_distance: f32,
        clip_distance: f32,
    ) -> Self {
        Self {
            position,
            look,
            up,
            screen_distance,
            clip_distance,
        }
    }

    /// Creates a camera at `position` looking toward `target`, with the default
    /// screen and clip distances.
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            look: target - position,
            up,
            position,
            ..Self::default()
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look(&self) -> Vec3 {
        self.look
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn screen_distance(&self) -> f32 {
        self.screen_distance
    }

    pub fn clip_distance(&self) -> f32 {
        self.clip_distance
    }

    /// `look × up`, not normalized.
    pub fn right(&self) -> Vec3 {
        self.look.cross(self.up)
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Rotates the look and up vectors by Euler `angles` (X, then Y, then Z).
    pub fn rotate(&mut self, angles: Vec3) {
        self.look = self.look.rotate(angles);
        self.up = self.up.rotate(angles);
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position = self.position.translate(delta);
    }

    // =========================================================================
    // Projection
    // =========================================================================

    /// Euler angles that rotate the current look/up pair onto the canonical
    /// look (0, 0, -1) and up (0, 1, 0).
    ///
    /// Solved one axis at a time: X zeroes the look's Y component, Y then
    /// zeroes its X component, and Z finally brings up onto +Y. Each step
    /// branches on the sign of the denominator so `atan` stays finite and the
    /// result lands in the right quadrant. The zero tests are exact.
    pub fn angle_to_norm(&self) -> Vec3 {
        let look = self.look;

        // look.y -> 0 with look.z <= 0
        let x = if look.z > 0.0 {
            PI + (look.y / look.z).atan()
        } else if look.z == 0.0 {
            if look.y > 0.0 {
                -FRAC_PI_2
            } else {
                FRAC_PI_2
            }
        } else {
            (look.y / look.z).atan()
        };
        let l = look.rotate(Vec3::new(x, 0.0, 0.0));

        // l.x -> 0
        let y = if l.z == 0.0 {
            if l.x > 0.0 {
                FRAC_PI_2
            } else {
                -FRAC_PI_2
            }
        } else {
            -(l.x / l.z).atan()
        };

        // up -> +Y
        let u = self.up.rotate(Vec3::new(x, y, 0.0));
        let z = if u.y < 0.0 {
            PI + (u.x / u.y).atan()
        } else if u.y == 0.0 {
            if l.x > 0.0 {
                FRAC_PI_2
            } else {
                -FRAC_PI_2
            }
        } else {
            (u.x / u.y).atan()
        };

        Vec3::new(x, y, z)
    }

    /// Moves `mesh` into camera space, clips it at the near plane and projects
    /// it onto the plane `z = -screen_distance`.
    pub fn project(&self, mesh: &WireframeMesh) -> WireframeMesh {
        mesh.translate(-self.position)
            .rotate(self.angle_to_norm())
            .clip_z(-self.clip_distance)
            .project_z(-self.screen_distance)
    }
}

// =============================================================================
// Camera Controller
// =============================================================================

/// Configuration and input handling for fly-through camera movement.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Movement speed, in multiples of the camera vectors per second.
    pub move_speed: f32,
    /// Turning speed, in multiples of the camera vectors (as Euler angles) per second.
    pub turn_speed: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            move_speed: 1.0,
            turn_speed: 1.0,
        }
    }
}

impl CameraController {
    pub fn new(move_speed: f32, turn_speed: f32) -> Self {
        Self {
            move_speed,
            turn_speed,
        }
    }

    /// Updates the camera based on input state.
    ///
    /// Movement follows the camera's own (unnormalized) vectors, so a longer
    /// look vector moves faster. Turning rotates by the right, up or look
    /// vector taken as Euler angles.
    ///
    /// # Input Mapping
    /// - W/S: Move along look
    /// - A/D: Strafe along right
    /// - Space/C: Move along up
    /// - Up/Down: Pitch (rotate by right)
    /// - Left/Right: Yaw (rotate by up)
    /// - PageUp/PageDown: Roll (rotate by look)
    /// - R: Reset to the default camera
    pub fn update(&self, camera: &mut Camera, input: &InputState, delta_time: f32) {
        let step = self.move_speed * delta_time;
        let turn = self.turn_speed * delta_time;

        let moves = [
            (input.left, -camera.right() * step),
            (input.right, camera.right() * step),
            (input.back, -camera.look() * step),
            (input.forward, camera.look() * step),
            (input.down, -camera.up() * step),
            (input.up, camera.up() * step),
        ];
        for (held, delta) in moves {
            if held {
                camera.translate(delta);
            }
        }

        if input.pitch_up {
            camera.rotate(camera.right() * turn);
        }
        if input.pitch_down {
            camera.rotate(-camera.right() * turn);
        }
        if input.yaw_left {
            camera.rotate(camera.up() * turn);
        }
        if input.yaw_right {
            camera.rotate(-camera.up() * turn);
        }
        if input.roll_left {
            camera.rotate(-camera.look() * turn);
        }
        if input.roll_right {
            camera.rotate(camera.look() * turn);
        }

        if input.reset {
            log::debug!("camera reset from {:?}", camera);
            *camera = Camera::default();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
