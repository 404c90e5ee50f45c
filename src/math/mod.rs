//! # Math Module
//!
//! Vectors, matrices, quaternions, Euler angles and the bounding volumes the
//! mesh generators need. Every type is a plain `Copy` value; operations return
//! new values or mutate `&mut self`, never shared scratch state.
//!
//! Conversions to and from `glam` are provided for interop.

mod vector2;
mod vector3;
mod vector4;
mod matrix3;
mod matrix4;
mod quaternion;
mod euler;
mod sphere;
mod box3;
mod triangle;
mod transform;

pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use quaternion::{Quaternion, TrackedQuaternion};
pub use euler::{Euler, EulerOrder};
pub use sphere::Sphere;
pub use box3::Box3;
pub use triangle::Triangle;
pub use transform::Transform;

/// Common math constants and utilities.
pub mod consts {
    /// Pi constant.
    pub const PI: f32 = std::f32::consts::PI;
    /// Two times Pi.
    pub const TWO_PI: f32 = PI * 2.0;
    /// Half of Pi.
    pub const HALF_PI: f32 = PI / 2.0;
    /// Degrees to radians conversion factor.
    pub const DEG2RAD: f32 = PI / 180.0;
    /// Radians to degrees conversion factor.
    pub const RAD2DEG: f32 = 180.0 / PI;
    /// Small epsilon for floating point comparisons.
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * consts::DEG2RAD
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * consts::RAD2DEG
}

/// Clamp a value between min and max.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// `1` for positive values, `-1` for negative ones, `0` for zero.
///
/// Unlike [`f32::signum`], zero maps to zero.
#[inline]
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
