//! 2D Vector implementation.

use crate::error::{KernelError, Result};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2D vector with x and y components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Vector2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Vector2 {
    /// Zero vector (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    /// One vector (1, 1).
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };
    /// Unit X vector (1, 0).
    pub const UNIT_X: Self = Self { x: 1.0, y: 0.0 };
    /// Unit Y vector (0, 1).
    pub const UNIT_Y: Self = Self { x: 0.0, y: 1.0 };

    /// Number of components.
    pub const LEN: usize = 2;

    /// Create a new Vector2.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a vector with all components set to the same value.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(a: [f32; 2]) -> Self {
        Self { x: a[0], y: a[1] }
    }

    /// Read two consecutive floats starting at `offset`.
    #[inline]
    pub fn from_slice(array: &[f32], offset: usize) -> Self {
        Self { x: array[offset], y: array[offset + 1] }
    }

    /// Convert to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Set the components of this vector.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Copy from another vector.
    #[inline]
    pub fn copy(&mut self, v: &Vector2) -> &mut Self {
        self.x = v.x;
        self.y = v.y;
        self
    }

    /// Get a component by index (0 = x, 1 = y).
    ///
    /// # Panics
    /// Panics if `index >= 2`.
    #[inline]
    pub fn component(&self, index: usize) -> f32 {
        self[index]
    }

    /// Set a component by index (0 = x, 1 = y).
    ///
    /// # Panics
    /// Panics if `index >= 2`.
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
            _ => Err(KernelError::ComponentIndex { index, len: Self::LEN }),
        }
    }

    /// Get the length (magnitude) of the vector.
    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Get the squared length of the vector.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Get the Manhattan length of the vector.
    #[inline]
    pub fn manhattan_length(&self) -> f32 {
        self.x.abs() + self.y.abs()
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
    pub fn dot(&self, other: &Vector2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross product).
    #[inline]
    pub fn cross(&self, other: &Vector2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Distance to another vector.
    #[inline]
    pub fn distance_to(&self, other: &Vector2) -> f32 {
        self.distance_to_squared(other).sqrt()
    }

    /// Squared distance to another vector.
    #[inline]
    pub fn distance_to_squared(&self, other: &Vector2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Linear interpolation to another vector.
    #[inline]
    pub fn lerp(&self, other: &Vector2, alpha: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * alpha,
            y: self.y + (other.y - self.y) * alpha,
        }
    }

    /// Add a scalar to every component.
    #[inline]
    pub fn add_scalar(&self, s: f32) -> Self {
        Self { x: self.x + s, y: self.y + s }
    }

    /// Component-wise multiplication.
    #[inline]
    pub fn multiply(&self, other: &Vector2) -> Self {
        Self { x: self.x * other.x, y: self.y * other.y }
    }

    /// Component-wise division.
    #[inline]
    pub fn divide(&self, other: &Vector2) -> Self {
        Self { x: self.x / other.x, y: self.y / other.y }
    }

    /// Divide by a scalar; a zero divisor yields the zero vector.
    #[inline]
    pub fn divide_scalar(&self, s: f32) -> Self {
        if s != 0.0 {
            let inv = 1.0 / s;
            Self { x: self.x * inv, y: self.y * inv }
        } else {
            Self::ZERO
        }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(&self, other: &Vector2) -> Self {
        Self { x: self.x.min(other.x), y: self.y.min(other.y) }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(&self, other: &Vector2) -> Self {
        Self { x: self.x.max(other.x), y: self.y.max(other.y) }
    }

    /// Clamp components between min and max vectors.
    ///
    /// Callers must pass `min <= max` per component; the bounds are not swapped.
    #[inline]
    pub fn clamp(&self, min: &Vector2, max: &Vector2) -> Self {
        Self {
            x: self.x.max(min.x).min(max.x),
            y: self.y.max(min.y).min(max.y),
        }
    }

    /// Clamp every component to the same scalar range.
    #[inline]
    pub fn clamp_scalar(&self, min: f32, max: f32) -> Self {
        self.clamp(&Self::splat(min), &Self::splat(max))
    }

    /// Floor all components.
    #[inline]
    pub fn floor(&self) -> Self {
        Self { x: self.x.floor(), y: self.y.floor() }
    }

    /// Ceil all components.
    #[inline]
    pub fn ceil(&self) -> Self {
        Self { x: self.x.ceil(), y: self.y.ceil() }
    }

    /// Round all components.
    #[inline]
    pub fn round(&self) -> Self {
        Self { x: self.x.round(), y: self.y.round() }
    }

    /// Round all components toward zero.
    #[inline]
    pub fn round_to_zero(&self) -> Self {
        Self { x: self.x.trunc(), y: self.y.trunc() }
    }

    /// Absolute value of all components.
    #[inline]
    pub fn abs(&self) -> Self {
        Self { x: self.x.abs(), y: self.y.abs() }
    }

    /// Clamp the length of this vector.
    #[inline]
    pub fn clamp_length(&self, min: f32, max: f32) -> Self {
        let len = self.length();
        self.normalized() * len.max(min).min(max)
    }

    /// Negate all components.
    #[inline]
    pub fn negate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self
    }

    /// Angle of this vector relative to the positive x axis, in `[0, 2π)`.
    #[inline]
    pub fn angle(&self) -> f32 {
        let angle = self.y.atan2(self.x);
        if angle < 0.0 {
            angle + std::f32::consts::TAU
        } else {
            angle
        }
    }

    /// Angle between this vector and another, in radians.
    #[inline]
    pub fn angle_to(&self, other: &Vector2) -> f32 {
        let denominator = (self.length_squared() * other.length_squared()).sqrt();
        if denominator == 0.0 {
            std::f32::consts::FRAC_PI_2
        } else {
            (self.dot(other) / denominator).clamp(-1.0, 1.0).acos()
        }
    }

    /// Rotate this vector around `center` by `angle` radians.
    #[inline]
    pub fn rotate_around(&self, center: &Vector2, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let x = self.x - center.x;
        let y = self.y - center.y;
        Self {
            x: x * c - y * s + center.x,
            y: x * s + y * c + center.y,
        }
    }

    /// Check if the vector is approximately equal to another.
    #[inline]
    pub fn approx_eq(&self, other: &Vector2, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Index<usize> for Vector2 {
    type Output = f32;
    #[inline]
    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vector2 index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Vector2 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vector2 index out of range: {index}"),
        }
    }
}

// Operator implementations
impl Add for Vector2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl SubAssign for Vector2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Mul<Vector2> for f32 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: Vector2) -> Vector2 {
        Vector2 { x: self * rhs.x, y: self * rhs.y }
    }
}

impl MulAssign<f32> for Vector2 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f32> for Vector2 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f32) -> Self {
        self.divide_scalar(rhs)
    }
}

impl DivAssign<f32> for Vector2 {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = self.divide_scalar(rhs);
    }
}

impl Neg for Vector2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

impl From<[f32; 2]> for Vector2 {
    fn from(a: [f32; 2]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vector2> for [f32; 2] {
    fn from(v: Vector2) -> Self {
        v.to_array()
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<glam::Vec2> for Vector2 {
    fn from(v: glam::Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vector2> for glam::Vec2 {
    fn from(v: Vector2) -> Self {
        glam::Vec2::new(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_zero_stays_zero() {
        let v = Vector2::ZERO.normalized();
        assert_eq!(v, Vector2::ZERO);
    }

    #[test]
    fn test_components() {
        let mut v = Vector2::new(1.0, 2.0);
        v.set_component(1, 5.0);
        assert_eq!(v.component(0), 1.0);
        assert_eq!(v.component(1), 5.0);
        assert!(v.try_component(2).is_err());
    }

    #[test]
    #[should_panic]
    fn test_component_out_of_range_panics() {
        let v = Vector2::ONE;
        let _ = v.component(2);
    }

    #[test]
    fn test_angle() {
        assert!((Vector2::new(0.0, -1.0).angle() - 1.5 * std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_around() {
        let v = Vector2::UNIT_X.rotate_around(&Vector2::ZERO, std::f32::consts::FRAC_PI_2);
        assert!(v.approx_eq(&Vector2::UNIT_Y, 1e-6));
    }
}
