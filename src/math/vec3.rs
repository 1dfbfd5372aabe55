//! Three-component vector used for points, directions and Euler angle triples.
//!
//! # Coordinate System
//!
//! Right-handed:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer (the default camera looks down -Z)

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::size::ScreenSize;

/// Per-axis selection flags, used to pick which components [`Vec3::mirror`] negates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Axes {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl Axes {
    pub const NONE: Self = Self::new(false, false, false);
    pub const X: Self = Self::new(true, false, false);
    pub const Y: Self = Self::new(false, true, false);
    pub const Z: Self = Self::new(false, false, true);
    pub const ALL: Self = Self::new(true, true, true);

    pub const fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    /// Default viewing direction (into the screen).
    pub const FORWARD: Self = Self::new(0.0, 0.0, -1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Same value in every component.
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    pub fn translate(&self, delta: Self) -> Self {
        *self + delta
    }

    /// Component-wise scaling.
    pub fn scale_by(&self, factors: Self) -> Self {
        Self {
            x: self.x * factors.x,
            y: self.y * factors.y,
            z: self.z * factors.z,
        }
    }

    /// Uniform scaling.
    pub fn scale(&self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }

    /// Negates the components selected by `axes`.
    pub fn mirror(&self, axes: Axes) -> Self {
        Self {
            x: if axes.x { -self.x } else { self.x },
            y: if axes.y { -self.y } else { self.y },
            z: if axes.z { -self.z } else { self.z },
        }
    }

    pub fn rotate_x(&self, angle: f32) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        Self {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }

    pub fn rotate_y(&self, angle: f32) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        Self {
            x: self.z * sin + self.x * cos,
            y: self.y,
            z: self.z * cos - self.x * sin,
        }
    }

    pub fn rotate_z(&self, angle: f32) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
            z: self.z,
        }
    }

    /// Rotates about X, then Y, then Z by the components of `angles` (radians).
    ///
    /// A zero angle skips its rotation entirely, so `rotate(Vec3::ZERO)` returns
    /// the input bit-for-bit.
    pub fn rotate(&self, angles: Self) -> Self {
        let mut v = *self;
        if angles.x != 0.0 {
            v = v.rotate_x(angles.x);
        }
        if angles.y != 0.0 {
            v = v.rotate_y(angles.y);
        }
        if angles.z != 0.0 {
            v = v.rotate_z(angles.z);
        }
        v
    }

    /// [`rotate`](Self::rotate) with the angles given in degrees.
    pub fn rotate_degrees(&self, angles: Self) -> Self {
        self.rotate(Self::new(
            angles.x.to_radians(),
            angles.y.to_radians(),
            angles.z.to_radians(),
        ))
    }

    /// Keeps the point if it lies on the visible side of the plane `z = max_z`.
    pub fn clip_z(&self, max_z: f32) -> Option<Self> {
        (self.z <= max_z).then_some(*self)
    }

    /// Perspective divide onto the plane `z = screen_z`, for an eye at the origin
    /// looking down -Z.
    ///
    /// Returns `None` for a point with `z == 0`, which has no projection.
    pub fn project_z(&self, screen_z: f32) -> Option<Self> {
        if self.z == 0.0 {
            return None;
        }
        let r = screen_z / self.z;
        Some(Self::new(self.x * r, self.y * r, screen_z))
    }

    /// Maps a projected point to pixel coordinates.
    ///
    /// The projection-plane origin lands on the window center, one unit spans
    /// half the window height, and screen Y grows downward.
    pub fn to_screen(&self, size: ScreenSize) -> Self {
        let (half_width, half_height) = size.half();
        self.scale(half_height)
            .mirror(Axes::Y)
            .translate(Self::new(half_width, half_height, 0.0))
    }

    pub fn magnitude(&self) -> f32 {
        self.dot(*self).sqrt()
    }

    /// Euclidean distance between two points.
    pub fn distance(&self, other: Self) -> f32 {
        (*self - other).magnitude()
    }

    pub fn normalize(&self) -> Self {
        *self / self.magnitude()
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// Scalar multiplication of a vector.
impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

/// Scalar division of a vector.
impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}
