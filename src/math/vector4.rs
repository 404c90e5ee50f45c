//! 4D Vector implementation.

use super::{Matrix4, Quaternion, Vector3};
use crate::error::{KernelError, Result};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 4D vector with x, y, z, and w components.
/// Used for homogeneous coordinates and axis-angle pairs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Vector4 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W component.
    pub w: f32,
}

impl Vector4 {
    /// Zero vector (0, 0, 0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    /// One vector (1, 1, 1, 1).
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0, w: 1.0 };
    /// Unit X vector (1, 0, 0, 0).
    pub const UNIT_X: Self = Self { x: 1.0, y: 0.0, z: 0.0, w: 0.0 };
    /// Unit Y vector (0, 1, 0, 0).
    pub const UNIT_Y: Self = Self { x: 0.0, y: 1.0, z: 0.0, w: 0.0 };
    /// Unit Z vector (0, 0, 1, 0).
    pub const UNIT_Z: Self = Self { x: 0.0, y: 0.0, z: 1.0, w: 0.0 };
    /// Unit W vector (0, 0, 0, 1).
    pub const UNIT_W: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Number of components.
    pub const LEN: usize = 4;

    /// Create a new Vector4.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a vector with all components set to the same value.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v, w: v }
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(a: [f32; 4]) -> Self {
        Self { x: a[0], y: a[1], z: a[2], w: a[3] }
    }

    /// Read four consecutive floats starting at `offset`.
    #[inline]
    pub fn from_slice(array: &[f32], offset: usize) -> Self {
        Self::new(array[offset], array[offset + 1], array[offset + 2], array[offset + 3])
    }

    /// Convert to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Create from Vector3 with w component.
    #[inline]
    pub const fn from_vec3(v: Vector3, w: f32) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w }
    }

    /// Get xyz components as Vector3.
    #[inline]
    pub const fn xyz(&self) -> Vector3 {
        Vector3 { x: self.x, y: self.y, z: self.z }
    }

    /// Set the components of this vector.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32, w: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self.w = w;
        self
    }

    /// Copy from another vector.
    #[inline]
    pub fn copy(&mut self, v: &Vector4) -> &mut Self {
        *self = *v;
        self
    }

    /// Get a component by index.
    ///
    /// # Panics
    /// Panics if `index >= 4`.
    #[inline]
    pub fn component(&self, index: usize) -> f32 {
        self[index]
    }

    /// Set a component by index.
    ///
    /// # Panics
    /// Panics if `index >= 4`.
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
            3 => Ok(self.w),
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
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Get the Manhattan length of the vector.
    #[inline]
    pub fn manhattan_length(&self) -> f32 {
        self.x.abs() + self.y.abs() + self.z.abs() + self.w.abs()
    }

    /// Normalize the vector. A zero vector stays zero.
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
    pub fn dot(&self, other: &Vector4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Distance to another vector.
    #[inline]
    pub fn distance_to(&self, other: &Vector4) -> f32 {
        self.distance_to_squared(other).sqrt()
    }

    /// Squared distance to another vector.
    #[inline]
    pub fn distance_to_squared(&self, other: &Vector4) -> f32 {
        (*self - *other).length_squared()
    }

    /// Linear interpolation to another vector.
    #[inline]
    pub fn lerp(&self, other: &Vector4, alpha: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * alpha,
            y: self.y + (other.y - self.y) * alpha,
            z: self.z + (other.z - self.z) * alpha,
            w: self.w + (other.w - self.w) * alpha,
        }
    }

    /// Add a scalar to every component.
    #[inline]
    pub fn add_scalar(&self, s: f32) -> Self {
        Self::new(self.x + s, self.y + s, self.z + s, self.w + s)
    }

    /// Component-wise multiplication.
    #[inline]
    pub fn multiply(&self, other: &Vector4) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z, self.w * other.w)
    }

    /// Component-wise division.
    #[inline]
    pub fn divide(&self, other: &Vector4) -> Self {
        Self::new(self.x / other.x, self.y / other.y, self.z / other.z, self.w / other.w)
    }

    /// Divide by a scalar; a zero divisor yields the zero vector.
    #[inline]
    pub fn divide_scalar(&self, s: f32) -> Self {
        if s != 0.0 {
            let inv = 1.0 / s;
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            Self::ZERO
        }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(&self, other: &Vector4) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
            w: self.w.min(other.w),
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(&self, other: &Vector4) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
            w: self.w.max(other.w),
        }
    }

    /// Clamp components between min and max vectors (`min <= max` expected).
    #[inline]
    pub fn clamp(&self, min: &Vector4, max: &Vector4) -> Self {
        Self {
            x: self.x.max(min.x).min(max.x),
            y: self.y.max(min.y).min(max.y),
            z: self.z.max(min.z).min(max.z),
            w: self.w.max(min.w).min(max.w),
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
        Self::new(self.x.floor(), self.y.floor(), self.z.floor(), self.w.floor())
    }

    /// Ceil all components.
    #[inline]
    pub fn ceil(&self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil(), self.z.ceil(), self.w.ceil())
    }

    /// Round all components.
    #[inline]
    pub fn round(&self) -> Self {
        Self::new(self.x.round(), self.y.round(), self.z.round(), self.w.round())
    }

    /// Round all components toward zero.
    #[inline]
    pub fn round_to_zero(&self) -> Self {
        Self::new(self.x.trunc(), self.y.trunc(), self.z.trunc(), self.w.trunc())
    }

    /// Absolute value of all components.
    #[inline]
    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs(), self.w.abs())
    }

    /// Negate all components.
    #[inline]
    pub fn negate(&mut self) -> &mut Self {
        *self = -*self;
        self
    }

    /// Apply a Matrix4 transformation (no perspective divide).
    #[inline]
    pub fn apply_matrix4(&self, m: &Matrix4) -> Self {
        let e = &m.elements;
        Self {
            x: e[0] * self.x + e[4] * self.y + e[8] * self.z + e[12] * self.w,
            y: e[1] * self.x + e[5] * self.y + e[9] * self.z + e[13] * self.w,
            z: e[2] * self.x + e[6] * self.y + e[10] * self.z + e[14] * self.w,
            w: e[3] * self.x + e[7] * self.y + e[11] * self.z + e[15] * self.w,
        }
    }

    /// Axis in xyz, angle in w, from a unit quaternion.
    pub fn from_axis_angle_of_quaternion(q: &Quaternion) -> Self {
        let angle = 2.0 * q.w.clamp(-1.0, 1.0).acos();
        let s = (1.0 - q.w * q.w).max(0.0).sqrt();
        if s < 0.0001 {
            Self::new(1.0, 0.0, 0.0, angle)
        } else {
            Self::new(q.x / s, q.y / s, q.z / s, angle)
        }
    }

    /// Axis in xyz, angle in w, from the upper 3x3 of an unscaled rotation matrix.
    pub fn from_axis_angle_of_rotation_matrix(m: &Matrix4) -> Self {
        // rounding margin, and the margin separating 0 from 180 degrees
        const EPSILON: f32 = 0.01;
        const EPSILON2: f32 = 0.1;
        const HALF_SQRT2: f32 = std::f32::consts::FRAC_1_SQRT_2;

        let te = &m.elements;
        let (m11, m12, m13) = (te[0], te[4], te[8]);
        let (m21, m22, m23) = (te[1], te[5], te[9]);
        let (m31, m32, m33) = (te[2], te[6], te[10]);

        let symmetric = (m12 - m21).abs() < EPSILON
            && (m13 - m31).abs() < EPSILON
            && (m23 - m32).abs() < EPSILON;

        if symmetric {
            if (m12 + m21).abs() < EPSILON2
                && (m13 + m31).abs() < EPSILON2
                && (m23 + m32).abs() < EPSILON2
                && (m11 + m22 + m33 - 3.0).abs() < EPSILON2
            {
                return Self::new(1.0, 0.0, 0.0, 0.0);
            }

            // 180 degree rotation
            let xx = (m11 + 1.0) / 2.0;
            let yy = (m22 + 1.0) / 2.0;
            let zz = (m33 + 1.0) / 2.0;
            let xy = (m12 + m21) / 4.0;
            let xz = (m13 + m31) / 4.0;
            let yz = (m23 + m32) / 4.0;

            let (x, y, z) = if xx > yy && xx > zz {
                if xx < EPSILON {
                    (0.0, HALF_SQRT2, HALF_SQRT2)
                } else {
                    let x = xx.sqrt();
                    (x, xy / x, xz / x)
                }
            } else if yy > zz {
                if yy < EPSILON {
                    (HALF_SQRT2, 0.0, HALF_SQRT2)
                } else {
                    let y = yy.sqrt();
                    (xy / y, y, yz / y)
                }
            } else if zz < EPSILON {
                (HALF_SQRT2, HALF_SQRT2, 0.0)
            } else {
                let z = zz.sqrt();
                (xz / z, yz / z, z)
            };

            return Self::new(x, y, z, std::f32::consts::PI);
        }

        let mut s = ((m32 - m23) * (m32 - m23) + (m13 - m31) * (m13 - m31) + (m21 - m12) * (m21 - m12)).sqrt();
        if s.abs() < 0.001 {
            s = 1.0;
        }

        Self::new(
            (m32 - m23) / s,
            (m13 - m31) / s,
            (m21 - m12) / s,
            ((m11 + m22 + m33 - 1.0) / 2.0).clamp(-1.0, 1.0).acos(),
        )
    }

    /// Check if the vector is approximately equal to another.
    #[inline]
    pub fn approx_eq(&self, other: &Vector4, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
            && (self.w - other.w).abs() < epsilon
    }
}

impl Index<usize> for Vector4 {
    type Output = f32;
    #[inline]
    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Vector4 index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Vector4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Vector4 index out of range: {index}"),
        }
    }
}

// Operator implementations
impl Add for Vector4 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl AddAssign for Vector4 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector4 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl SubAssign for Vector4 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vector4 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Mul<Vector4> for f32 {
    type Output = Vector4;
    #[inline]
    fn mul(self, rhs: Vector4) -> Vector4 {
        rhs * self
    }
}

impl MulAssign<f32> for Vector4 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div<f32> for Vector4 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f32) -> Self {
        self.divide_scalar(rhs)
    }
}

impl DivAssign<f32> for Vector4 {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = self.divide_scalar(rhs);
    }
}

impl Neg for Vector4 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl From<[f32; 4]> for Vector4 {
    fn from(a: [f32; 4]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vector4> for [f32; 4] {
    fn from(v: Vector4) -> Self {
        v.to_array()
    }
}

impl From<(f32, f32, f32, f32)> for Vector4 {
    fn from((x, y, z, w): (f32, f32, f32, f32)) -> Self {
        Self { x, y, z, w }
    }
}

impl From<glam::Vec4> for Vector4 {
    fn from(v: glam::Vec4) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w: v.w }
    }
}

impl From<Vector4> for glam::Vec4 {
    fn from(v: Vector4) -> Self {
        glam::Vec4::new(v.x, v.y, v.z, v.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_normalize_zero() {
        assert_eq!(Vector4::ZERO.normalized(), Vector4::ZERO);
        assert_eq!(Vector4::ONE / 0.0, Vector4::ZERO);
    }

    #[test]
    fn test_components() {
        let mut v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        v.set_component(3, 8.0);
        assert_eq!(v.component(3), 8.0);
        assert!(v.try_component(4).is_err());
        assert_eq!(v.manhattan_length(), 14.0);
    }

    #[test]
    fn test_apply_matrix4_translation() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0));
        let point = Vector4::new(1.0, 1.0, 1.0, 1.0).apply_matrix4(&m);
        assert!(point.approx_eq(&Vector4::new(2.0, 3.0, 4.0, 1.0), 1e-6));
        let dir = Vector4::new(1.0, 1.0, 1.0, 0.0).apply_matrix4(&m);
        assert!(dir.approx_eq(&Vector4::new(1.0, 1.0, 1.0, 0.0), 1e-6));
    }

    #[test]
    fn test_axis_angle_round_trip() {
        let q = Quaternion::from_axis_angle(&Vector3::UNIT_Y, FRAC_PI_2);
        let aa = Vector4::from_axis_angle_of_quaternion(&q);
        assert!(aa.approx_eq(&Vector4::new(0.0, 1.0, 0.0, FRAC_PI_2), 1e-5));

        let m = Matrix4::from_quaternion(&q);
        let aa = Vector4::from_axis_angle_of_rotation_matrix(&m);
        assert!(aa.approx_eq(&Vector4::new(0.0, 1.0, 0.0, FRAC_PI_2), 1e-4));

        let identity = Vector4::from_axis_angle_of_rotation_matrix(&Matrix4::IDENTITY);
        assert_eq!(identity, Vector4::new(1.0, 0.0, 0.0, 0.0));
    }
}
