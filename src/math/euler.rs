//! Euler angles tagged with their rotation order.

use super::{Matrix4, Quaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order of Euler angle rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EulerOrder {
    /// X, then Y, then Z.
    #[default]
    XYZ,
    /// Y, then X, then Z.
    YXZ,
    /// Z, then X, then Y.
    ZXY,
    /// Z, then Y, then X.
    ZYX,
    /// Y, then Z, then X.
    YZX,
    /// X, then Z, then Y.
    XZY,
}

impl EulerOrder {
    /// Every supported order.
    pub const ALL: [EulerOrder; 6] = [
        EulerOrder::XYZ,
        EulerOrder::YXZ,
        EulerOrder::ZXY,
        EulerOrder::ZYX,
        EulerOrder::YZX,
        EulerOrder::XZY,
    ];
}

impl fmt::Display for EulerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Euler angles representation of rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Euler {
    /// Rotation around X axis in radians.
    pub x: f32,
    /// Rotation around Y axis in radians.
    pub y: f32,
    /// Rotation around Z axis in radians.
    pub z: f32,
    /// Order of rotations.
    #[serde(default)]
    pub order: EulerOrder,
}

impl Euler {
    /// Zero rotation.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        order: EulerOrder::XYZ,
    };

    /// Create new Euler angles.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, order: EulerOrder) -> Self {
        Self { x, y, z, order }
    }

    /// Create with default XYZ order.
    #[inline]
    pub const fn xyz(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, EulerOrder::XYZ)
    }

    /// Angles taken from a vector's components.
    #[inline]
    pub const fn from_vector3(v: &Vector3, order: EulerOrder) -> Self {
        Self::new(v.x, v.y, v.z, order)
    }

    /// Set the components.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32, order: EulerOrder) -> &mut Self {
        *self = Self::new(x, y, z, order);
        self
    }

    /// Angles of the rotation part of `m`; scale is divided out first.
    pub fn from_matrix4(m: &Matrix4, order: EulerOrder) -> Self {
        Self::from_rotation_matrix(&Matrix4::extract_rotation(m), order)
    }

    /// Angles of the upper 3x3 of an unscaled rotation matrix.
    ///
    /// Near gimbal lock (|sin| of the middle angle above 0.9999999) the third
    /// angle is fixed at zero.
    pub fn from_rotation_matrix(m: &Matrix4, order: EulerOrder) -> Self {
        const GIMBAL: f32 = 0.9999999;
        let e = &m.elements;
        let (m11, m12, m13) = (e[0], e[4], e[8]);
        let (m21, m22, m23) = (e[1], e[5], e[9]);
        let (m31, m32, m33) = (e[2], e[6], e[10]);
        let clamp = |x: f32| x.clamp(-1.0, 1.0);

        let (x, y, z) = match order {
            EulerOrder::XYZ => {
                let y = clamp(m13).asin();
                if m13.abs() < GIMBAL {
                    ((-m23).atan2(m33), y, (-m12).atan2(m11))
                } else {
                    (m32.atan2(m22), y, 0.0)
                }
            }
            EulerOrder::YXZ => {
                let x = clamp(-m23).asin();
                if m23.abs() < GIMBAL {
                    (x, m13.atan2(m33), m21.atan2(m22))
                } else {
                    (x, (-m31).atan2(m11), 0.0)
                }
            }
            EulerOrder::ZXY => {
                let x = clamp(m32).asin();
                if m32.abs() < GIMBAL {
                    (x, (-m31).atan2(m33), (-m12).atan2(m22))
                } else {
                    (x, 0.0, m21.atan2(m11))
                }
            }
            EulerOrder::ZYX => {
                let y = clamp(-m31).asin();
                if m31.abs() < GIMBAL {
                    (m32.atan2(m33), y, m21.atan2(m11))
                } else {
                    (0.0, y, (-m12).atan2(m22))
                }
            }
            EulerOrder::YZX => {
                let z = clamp(m21).asin();
                if m21.abs() < GIMBAL {
                    ((-m23).atan2(m22), (-m31).atan2(m11), z)
                } else {
                    (0.0, m13.atan2(m33), z)
                }
            }
            EulerOrder::XZY => {
                let z = clamp(-m12).asin();
                if m12.abs() < GIMBAL {
                    (m32.atan2(m22), m13.atan2(m11), z)
                } else {
                    ((-m23).atan2(m33), 0.0, z)
                }
            }
        };

        Self { x, y, z, order }
    }

    /// Create from a quaternion.
    pub fn from_quaternion(q: &Quaternion, order: EulerOrder) -> Self {
        Self::from_rotation_matrix(&Matrix4::from_quaternion(q), order)
    }

    /// Convert to a Vector3 (x, y, z angles).
    #[inline]
    pub const fn to_vector3(&self) -> Vector3 {
        Vector3 {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    /// Same rotation expressed in a different order.
    pub fn reorder(&self, new_order: EulerOrder) -> Self {
        Self::from_quaternion(&Quaternion::from_euler(self), new_order)
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Euler, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
            && self.order == other.order
    }
}
