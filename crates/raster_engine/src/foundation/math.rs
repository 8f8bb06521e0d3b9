//! Math utilities and types
//!
//! Provides the vector foundation for all geometric computation in the
//! engine: camera basis construction, world-to-camera transforms, and the
//! interpolation used by the rasterizer.

use bytemuck::{Pod, Zeroable};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Coarse tolerance used by `PartialEq` on [`Vec3`].
///
/// Two vectors whose components differ by no more than this compare equal.
/// This absorbs floating-point rounding in scene comparisons, but it means
/// vector equality is not transitive across pathological chains; do not use
/// it as the basis of a hashing or deduplication scheme.
pub const EPSILON: f32 = 1.0e-3;

/// Fine tolerance below which a vector is treated as degenerate by
/// [`Vec3::normalize`].
pub const EPSILON_DEGENERATE: f32 = 1.0e-6;

/// Three-component row vector `(x, y, z)`.
///
/// The struct carries a fourth unused lane so that the layout is 16 bytes
/// wide and slices of vectors can be loaded four floats at a time. The lane
/// never participates in arithmetic or comparisons.
///
/// `Vec3` is a plain value type: all operators return new vectors, and the
/// compound-assignment forms mutate in place.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vec3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
    w: f32,
}

impl Vec3 {
    /// Create a vector from its three components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    /// The zero vector.
    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Overwrite all three components.
    pub fn set(&mut self, x: f32, y: f32, z: f32) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Reset to the zero vector.
    pub fn zero(&mut self) {
        self.set(0.0, 0.0, 0.0);
    }

    /// Whether every component is within [`EPSILON`] of zero.
    pub fn is_zero(&self) -> bool {
        self.x.abs() <= EPSILON && self.y.abs() <= EPSILON && self.z.abs() <= EPSILON
    }

    /// Scalar (dot) product.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product, following the right-hand rule.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Vector magnitude.
    ///
    /// A true zero vector has no meaningful length; that indicates degenerate
    /// scene data upstream and is treated as a programming error, not a
    /// recoverable condition.
    pub fn length(&self) -> f32 {
        let sq = self.dot(self);
        debug_assert!(sq > 0.0, "length of a zero vector");
        sq.sqrt()
    }

    /// Return this vector scaled to unit length.
    ///
    /// A vector whose components are all within [`EPSILON_DEGENERATE`] of
    /// zero is returned unchanged rather than divided, so degenerate input
    /// never produces NaNs. Callers must not assume a unit-length result for
    /// such input.
    pub fn normalize(&self) -> Self {
        if self.x.abs() < EPSILON_DEGENERATE
            && self.y.abs() < EPSILON_DEGENERATE
            && self.z.abs() < EPSILON_DEGENERATE
        {
            return *self;
        }
        *self / self.length()
    }

    /// Total order on the X axis alone.
    ///
    /// The per-axis comparators exist to support axis-sorted spatial
    /// partitioning (k-d tree construction sorts by one axis per level);
    /// they deliberately ignore the other two components.
    pub fn compare_x(a: &Self, b: &Self) -> Ordering {
        a.x.total_cmp(&b.x)
    }

    /// Total order on the Y axis alone. See [`Vec3::compare_x`].
    pub fn compare_y(a: &Self, b: &Self) -> Ordering {
        a.y.total_cmp(&b.y)
    }

    /// Total order on the Z axis alone. See [`Vec3::compare_x`].
    pub fn compare_z(a: &Self, b: &Self) -> Ordering {
        a.z.total_cmp(&b.z)
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::zeros()
    }
}

/// Linear interpolation: `a + t * (b - a)`.
///
/// `t = 0` yields `a`, `t = 1` yields `b`; values outside `[0, 1]`
/// extrapolate.
pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Convert degrees to radians.
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

impl PartialEq for Vec3 {
    /// Epsilon-tolerant equality with the coarse [`EPSILON`] tolerance.
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() <= EPSILON
            && (self.y - other.y).abs() <= EPSILON
            && (self.z - other.z).abs() <= EPSILON
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;

    fn div(self, s: f32) -> Self {
        debug_assert!(s.abs() > f32::EPSILON, "division by near-zero scalar");
        Self::new(self.x / s, self.y / s, self.z / s)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, s: f32) {
        *self = *self * s;
    }
}

impl DivAssign<f32> for Vec3 {
    fn div_assign(&mut self, s: f32) {
        *self = *self / s;
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[x: {} y: {} z: {}]", self.x, self.y, self.z)
    }
}

impl approx::AbsDiffEq for Vec3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        f32::abs_diff_eq(&self.x, &other.x, epsilon)
            && f32::abs_diff_eq(&self.y, &other.y, epsilon)
            && f32::abs_diff_eq(&self.z, &other.z, epsilon)
    }
}

impl approx::RelativeEq for Vec3 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        f32::relative_eq(&self.x, &other.x, epsilon, max_relative)
            && f32::relative_eq(&self.y, &other.y, epsilon, max_relative)
            && f32::relative_eq(&self.z, &other.z, epsilon, max_relative)
    }
}
