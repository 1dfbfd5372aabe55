//! A wireframe 3D viewer with a free-flying camera.
//!
//! Meshes are point clouds plus edge lists. The camera re-expresses them in
//! camera space, clips them at the near plane (splitting edges that cross it)
//! and projects them onto a screen plane; the result maps to pixels and is
//! drawn as lines. SDL2 is used only for the window and keyboard.
//!
//! # Quick Start
//!
//! ```
//! use wirecam::prelude::*;
//!
//! let cube = WireframeMesh::cube(Attributes::new()).scale(0.5);
//! let camera = Camera::default();
//! let screen = camera.project(&cube).to_screen(ScreenSize::new(640, 480));
//! assert_eq!(screen.lines().len(), 12);
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod engine;
pub mod error;
pub mod input;
pub mod math;
pub mod mesh;
pub mod render;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::{Camera, CameraController};
pub use engine::{Engine, SceneObject};
pub use error::{Error, Result};
pub use mesh::{LoadError, MeshError, WireframeMesh};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use wirecam::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, CameraController};
    pub use crate::input::InputState;

    // Engine
    pub use crate::engine::{Engine, SceneObject};

    // Mesh
    pub use crate::mesh::{AttributeValue, Attributes, Edge, WireframeMesh};

    // Math
    pub use crate::math::{Axes, ScreenSize, Vec3};

    // Window
    #[cfg(feature = "window")]
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}
