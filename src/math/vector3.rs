//! 3D Vector implementation.

use super::{Euler, Matrix3, Matrix4, Quaternion, Vector2};
use crate::error::{KernelError, Result};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3D vector with x, y, and z components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Vector3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vector3 {
    /// Zero vector (0, 0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    /// One vector (1, 1, 1).
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0 };
    /// Unit X vector (1, 0, 0).
    pub const UNIT_X: Self = Self { x: 1.0, y: 0.0, z: 0.0 };
    /// Unit Y vector (0, 1, 0).
    pub const UNIT_Y: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    /// Unit Z vector (0, 0, 1).
    pub const UNIT_Z: Self = Self { x: 0.0, y: 0.0, z: 1.0 };
    /// Up vector (0, 1, 0).
    pub const UP: Self = Self::UNIT_Y;

    /// Number of components.
    pub const LEN: usize = 3;

    /// Create a new Vector3.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a vector with all components set to the same value.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self { x: a[0], y: a[1], z: a[2] }
    }

    /// Read three consecutive floats starting at `offset`.
    #[inline]
    pub fn from_slice(array: &[f32], offset: usize) -> Self {
        Self {
            x: array[offset],
            y: array[offset + 1],
            z: array[offset + 2],
        }
    }

    /// Convert to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Write the components into `array` starting at `offset`.
    #[inline]
    pub fn write_to_slice(&self, array: &mut [f32], offset: usize) {
        array[offset] = self.x;
        array[offset + 1] = self.y;
        array[offset + 2] = self.z;
    }

    /// Create from a Vector2 and a z value.
    #[inline]
    pub const fn from_vec2(v: Vector2, z: f32) -> Self {
        Self { x: v.x, y: v.y, z }
    }

    /// Get xy components as Vector2.
    #[inline]
    pub const fn xy(&self) -> Vector2 {
        Vector2 { x: self.x, y: self.y }
    }

    /// Set the components of this vector.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Copy from another vector.
    #[inline]
    pub fn copy(&mut self, v: &Vector3) -> &mut Self {
        *self = *v;
        self
    }

    /// Get a component by index (0 = x, 1 = y, 2 = z).
    ///
    /// # Panics
    /// Panics if `index >= 3`.
    #[inline]
    pub fn component(&self, index: usize) -> f32 {
        self[index]
    }

    /// Set a component by index (0 = x, 1 = y, 2 = z).
    ///
    /// # Panics
    /// Panics if `index >= 3`.
    #[inline]
    pub fn set_component(&mut self, index: usize, value: f32) -> &mut Self {
        self[index] = value;
        self
    }

    /// Checked component access.
    #[inline]
    pub fn try_component(&self, index: usize) -> Result<f32> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(KernelError::ComponentIndex { index, len: Self::LEN }),
        }
    }

    /// Get the length (magnitude) of the vector.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Get the squared length of the vector.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Get the Manhattan length of the vector.
    #[inline]
    pub fn manhattan_length(&self) -> f32 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }

    /// Normalize the vector. A zero vector stays zero rather than turning into NaN.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        *self = self.divide_scalar(len);
        self
    }

    /// Return a normalized copy of the vector.
    #[inline]
    pub fn normalized(&self) -> Self {
        let mut v = *self;
        v.normalize();
        v
    }

    /// Set the length of this vector.
    #[inline]
    pub fn set_length(&mut self, length: f32) -> &mut Self {
        *self = self.normalized() * length;
        self
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(&self, other: &Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product `self × other`.
    #[inline]
    pub fn cross(&self, other: &Vector3) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Distance to another vector.
    #[inline]
    pub fn distance_to(&self, other: &Vector3) -> f32 {
        self.distance_to_squared(other).sqrt()
    }

    /// Squared distance to another vector.
    #[inline]
    pub fn distance_to_squared(&self, other: &Vector3) -> f32 {
        (*self - *other).length_squared()
    }

    /// Linear interpolation to another vector.
    #[inline]
    pub fn lerp(&self, other: &Vector3, alpha: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * alpha,
            y: self.y + (other.y - self.y) * alpha,
            z: self.z + (other.z - self.z) * alpha,
        }
    }

    /// Add a scalar to every component.
    #[inline]
    pub fn add_scalar(&self, s: f32) -> Self {
        Self { x: self.x + s, y: self.y + s, z: self.z + s }
    }

    /// Component-wise multiplication.
    #[inline]
    pub fn multiply(&self, other: &Vector3) -> Self {
        Self {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    /// Component-wise division.
    #[inline]
    pub fn divide(&self, other: &Vector3) -> Self {
        Self {
            x: self.x / other.x,
            y: self.y / other.y,
            z: self.z / other.z,
        }
    }

    /// Divide by a scalar; a zero divisor yields the zero vector.
    #[inline]
    pub fn divide_scalar(&self, s: f32) -> Self {
        if s != 0.0 {
            let inv = 1.0 / s;
            Self { x: self.x * inv, y: self.y * inv, z: self.z * inv }
        } else {
            Self::ZERO
        }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(&self, other: &Vector3) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(&self, other: &Vector3) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }

    /// Clamp components between min and max vectors.
    ///
    /// Callers must pass `min <= max` per component; the bounds are not swapped.
    #[inline]
    pub fn clamp(&self, min: &Vector3, max: &Vector3) -> Self {
        Self {
            x: self.x.max(min.x).min(max.x),
            y: self.y.max(min.y).min(max.y),
            z: self.z.max(min.z).min(max.z),
        }
    }

    /// Clamp every component to the same scalar range.
    #[inline]
    pub fn clamp_scalar(&self, min: f32, max: f32) -> Self {
        self.clamp(&Self::splat(min), &Self::splat(max))
    }

    /// Clamp the length of this vector.
    #[inline]
    pub fn clamp_length(&self, min: f32, max: f32) -> Self {
        let len = self.length();
        self.normalized() * len.max(min).min(max)
    }

    /// Floor all components.
    #[inline]
    pub fn floor(&self) -> Self {
        Self { x: self.x.floor(), y: self.y.floor(), z: self.z.floor() }
    }

    /// Ceil all components.
    #[inline]
    pub fn ceil(&self) -> Self {
        Self { x: self.x.ceil(), y: self.y.ceil(), z: self.z.ceil() }
    }

    /// Round all components.
    #[inline]
    pub fn round(&self) -> Self {
        Self { x: self.x.round(), y: self.y.round(), z: self.z.round() }
    }

    /// Round all components toward zero.
    #[inline]
    pub fn round_to_zero(&self) -> Self {
        Self { x: self.x.trunc(), y: self.y.trunc(), z: self.z.trunc() }
    }

    /// Absolute value of all components.
    #[inline]
    pub fn abs(&self) -> Self {
        Self { x: self.x.abs(), y: self.y.abs(), z: self.z.abs() }
    }

    /// Negate all components.
    #[inline]
    pub fn negate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
        self
    }

    /// Reflect this vector off a plane orthogonal to `normal` (unit length).
    #[inline]
    pub fn reflect(&self, normal: &Vector3) -> Self {
        *self - *normal * (2.0 * self.dot(normal))
    }

    /// Angle to another vector in radians.
    ///
    /// The cosine is clamped to `[-1, 1]` so rounding never produces NaN; a
    /// zero-length operand gives π/2.
    #[inline]
    pub fn angle_to(&self, other: &Vector3) -> f32 {
        let denominator = (self.length_squared() * other.length_squared()).sqrt();
        if denominator == 0.0 {
            std::f32::consts::FRAC_PI_2
        } else {
            (self.dot(other) / denominator).clamp(-1.0, 1.0).acos()
        }
    }

    /// Project this vector onto another vector.
    #[inline]
    pub fn project_on_vector(&self, onto: &Vector3) -> Self {
        let denom = onto.length_squared();
        if denom == 0.0 {
            Self::ZERO
        } else {
            *onto * (self.dot(onto) / denom)
        }
    }

    /// Project this vector onto a plane defined by its normal.
    #[inline]
    pub fn project_on_plane(&self, plane_normal: &Vector3) -> Self {
        *self - self.project_on_vector(plane_normal)
    }

    /// Multiply by a 3x3 matrix.
    #[inline]
    pub fn apply_matrix3(&self, m: &Matrix3) -> Self {
        m.transform_vector(self)
    }

    /// Apply a Matrix4 as a point transform, including the perspective divide.
    #[inline]
    pub fn apply_matrix4(&self, m: &Matrix4) -> Self {
        m.transform_point(self)
    }

    /// Rotate by the upper 3x3 of `m` and normalize.
    #[inline]
    pub fn transform_direction(&self, m: &Matrix4) -> Self {
        m.transform_direction(self).normalized()
    }

    /// Apply a Quaternion rotation.
    #[inline]
    pub fn apply_quaternion(&self, q: &Quaternion) -> Self {
        let (qx, qy, qz, qw) = (q.x, q.y, q.z, q.w);

        // q * v
        let ix = qw * self.x + qy * self.z - qz * self.y;
        let iy = qw * self.y + qz * self.x - qx * self.z;
        let iz = qw * self.z + qx * self.y - qy * self.x;
        let iw = -qx * self.x - qy * self.y - qz * self.z;

        // (q * v) * q^-1
        Self {
            x: ix * qw + iw * -qx + iy * -qz - iz * -qy,
            y: iy * qw + iw * -qy + iz * -qx - ix * -qz,
            z: iz * qw + iw * -qz + ix * -qy - iy * -qx,
        }
    }

    /// Rotate by Euler angles.
    #[inline]
    pub fn apply_euler(&self, euler: &Euler) -> Self {
        self.apply_quaternion(&Quaternion::from_euler(euler))
    }

    /// Rotate around a unit axis by `angle` radians.
    #[inline]
    pub fn apply_axis_angle(&self, axis: &Vector3, angle: f32) -> Self {
        self.apply_quaternion(&Quaternion::from_axis_angle(axis, angle))
    }

    /// Translation part of a transform matrix.
    #[inline]
    pub fn from_matrix_position(m: &Matrix4) -> Self {
        m.position()
    }

    /// Per-axis scale encoded in a transform matrix (column lengths).
    #[inline]
    pub fn from_matrix_scale(m: &Matrix4) -> Self {
        Self::new(
            Self::from_matrix_column(m, 0).length(),
            Self::from_matrix_column(m, 1).length(),
            Self::from_matrix_column(m, 2).length(),
        )
    }

    /// First three rows of column `index` of `m`.
    ///
    /// # Panics
    /// Panics if `index >= 4`.
    #[inline]
    pub fn from_matrix_column(m: &Matrix4, index: usize) -> Self {
        assert!(index < 4, "Matrix4 column out of range: {index}");
        Self::from_slice(&m.elements, index * 4)
    }

    /// Check if the vector is approximately equal to another.
    #[inline]
    pub fn approx_eq(&self, other: &Vector3, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

impl Index<usize> for Vector3 {
    type Output = f32;
    #[inline]
    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Vector3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vector3 index out of range: {index}"),
        }
    }
}

// Operator implementations
impl Add for Vector3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl AddAssign for Vector3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vector3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl SubAssign for Vector3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Mul<Vector3> for f32 {
    type Output = Vector3;
    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs * self
    }
}

impl MulAssign<f32> for Vector3 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl Div<f32> for Vector3 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f32) -> Self {
        self.divide_scalar(rhs)
    }
}

impl DivAssign<f32> for Vector3 {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = self.divide_scalar(rhs);
    }
}

impl Neg for Vector3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(a: [f32; 3]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl From<(f32, f32, f32)> for Vector3 {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

impl From<glam::Vec3> for Vector3 {
    fn from(v: glam::Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<Vector3> for glam::Vec3 {
    fn from(v: Vector3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_cross() {
        let z = Vector3::UNIT_X.cross(&Vector3::UNIT_Y);
        assert!(z.approx_eq(&Vector3::UNIT_Z, 1e-6));
    }

    #[test]
    fn test_cross_anticommutes() {
        let a = Vector3::new(1.5, -2.0, 0.25);
        let b = Vector3::new(-0.5, 3.0, 4.0);
        assert!(a.cross(&b).approx_eq(&-b.cross(&a), 1e-6));
    }

    #[test]
    fn test_reflect() {
        let v = Vector3::new(1.0, -1.0, 0.0);
        let r = v.reflect(&Vector3::UNIT_Y);
        assert!(r.approx_eq(&Vector3::new(1.0, 1.0, 0.0), 1e-6));
    }

    #[test]
    fn test_normalize_zero_and_idempotent() {
        assert_eq!(Vector3::ZERO.normalized(), Vector3::ZERO);
        let n = Vector3::new(3.0, 4.0, 12.0).normalized();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!(n.normalized().approx_eq(&n, 1e-7));
    }

    #[test]
    fn test_divide_by_zero_is_zero() {
        assert_eq!(Vector3::new(1.0, 2.0, 3.0) / 0.0, Vector3::ZERO);
    }

    #[test]
    fn test_angle_to_clamps_rounding() {
        let a = Vector3::new(1.0, 1.0, 1.0);
        let b = a * 3.0;
        let angle = a.angle_to(&b);
        assert!(!angle.is_nan());
        assert!(angle.abs() < 1e-3);
        assert!((Vector3::UNIT_X.angle_to(&-Vector3::UNIT_X) - PI).abs() < 1e-6);
        assert!((Vector3::UNIT_X.angle_to(&Vector3::UNIT_Z) - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_component_access() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        v.set_component(2, 9.0);
        assert_eq!(v[2], 9.0);
        assert_eq!(
            v.try_component(3),
            Err(KernelError::ComponentIndex { index: 3, len: 3 })
        );
    }

    #[test]
    #[should_panic]
    fn test_set_component_out_of_range() {
        let mut v = Vector3::ZERO;
        v.set_component(3, 1.0);
    }

    #[test]
    fn test_clamp_length() {
        let v = Vector3::new(0.0, 10.0, 0.0).clamp_length(1.0, 2.0);
        assert!(v.approx_eq(&Vector3::new(0.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn test_project() {
        let v = Vector3::new(2.0, 3.0, 0.0);
        assert!(v.project_on_vector(&Vector3::UNIT_X).approx_eq(&Vector3::new(2.0, 0.0, 0.0), 1e-6));
        assert!(v.project_on_plane(&Vector3::UNIT_X).approx_eq(&Vector3::new(0.0, 3.0, 0.0), 1e-6));
    }

    #[test]
    fn test_axis_angle() {
        let v = Vector3::UNIT_X.apply_axis_angle(&Vector3::UNIT_Z, FRAC_PI_2);
        assert!(v.approx_eq(&Vector3::UNIT_Y, 1e-6));
    }
}
