//! Vector algebra.

pub mod size;
pub mod vec3;

pub use size::ScreenSize;
pub use vec3::{Axes, Vec3};
