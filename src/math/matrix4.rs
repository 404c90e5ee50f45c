//! 4x4 Matrix implementation.

use super::{consts::DEG2RAD, Euler, EulerOrder, Matrix3, Quaternion, Vector3};
use crate::error::{KernelError, Result};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A 4x4 matrix stored in column-major order.
/// Used for 3D transformations (model, view, projection matrices).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix4 {
    /// Matrix elements in column-major order.
    /// [m00, m10, m20, m30, m01, m11, m21, m31, m02, m12, m22, m32, m03, m13, m23, m33]
    pub elements: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Zero matrix.
    pub const ZERO: Self = Self {
        elements: [0.0; 16],
    };

    /// Create a new Matrix4 from elements in row-major order.
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m00: f32, m01: f32, m02: f32, m03: f32,
        m10: f32, m11: f32, m12: f32, m13: f32,
        m20: f32, m21: f32, m22: f32, m23: f32,
        m30: f32, m31: f32, m32: f32, m33: f32,
    ) -> Self {
        Self {
            elements: [
                m00, m10, m20, m30,
                m01, m11, m21, m31,
                m02, m12, m22, m32,
                m03, m13, m23, m33,
            ],
        }
    }

    /// Create from column-major array.
    #[inline]
    pub const fn from_cols_array(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    /// Set to identity matrix.
    #[inline]
    pub fn set_identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// Copy from another matrix.
    #[inline]
    pub fn copy(&mut self, m: &Matrix4) -> &mut Self {
        self.elements = m.elements;
        self
    }

    /// Extract the position (translation) component.
    #[inline]
    pub fn position(&self) -> Vector3 {
        Vector3::from_slice(&self.elements, 12)
    }

    /// Set the position (translation) component.
    #[inline]
    pub fn set_position(&mut self, v: &Vector3) -> &mut Self {
        v.write_to_slice(&mut self.elements, 12);
        self
    }

    /// Copy only the translation of `m`.
    #[inline]
    pub fn copy_position(&mut self, m: &Matrix4) -> &mut Self {
        self.set_position(&m.position())
    }

    /// Per-axis scale (basis column lengths).
    pub fn scale_factors(&self) -> Vector3 {
        Vector3::from_matrix_scale(self)
    }

    /// Largest basis column length.
    pub fn max_scale_on_axis(&self) -> f32 {
        let e = &self.elements;
        let sx2 = e[0] * e[0] + e[1] * e[1] + e[2] * e[2];
        let sy2 = e[4] * e[4] + e[5] * e[5] + e[6] * e[6];
        let sz2 = e[8] * e[8] + e[9] * e[9] + e[10] * e[10];
        sx2.max(sy2).max(sz2).sqrt()
    }

    /// Scale the first three columns by `v` in place.
    pub fn scale(&mut self, v: &Vector3) -> &mut Self {
        for (col, s) in [v.x, v.y, v.z].into_iter().enumerate() {
            for e in &mut self.elements[col * 4..col * 4 + 4] {
                *e *= s;
            }
        }
        self
    }

    /// Compose a transformation matrix from position, quaternion, and scale.
    pub fn compose(position: &Vector3, quaternion: &Quaternion, scale: &Vector3) -> Self {
        let mut m = Self::from_quaternion(quaternion);
        m.scale(scale);
        m.set_position(position);
        m
    }

    /// Decompose the matrix into position, quaternion, and scale.
    ///
    /// A negative determinant is attributed to the x axis. Zero-length
    /// basis columns contribute zero to the rotation extraction.
    pub fn decompose(&self) -> (Vector3, Quaternion, Vector3) {
        let e = &self.elements;

        let position = self.position();

        let mut scale = self.scale_factors();
        if self.determinant() < 0.0 {
            scale.x = -scale.x;
        }

        let inv = |s: f32| if s != 0.0 { 1.0 / s } else { 0.0 };
        let (inv_sx, inv_sy, inv_sz) = (inv(scale.x), inv(scale.y), inv(scale.z));

        let quaternion = Quaternion::from_rotation_matrix_elements(
            e[0] * inv_sx, e[4] * inv_sy, e[8] * inv_sz,
            e[1] * inv_sx, e[5] * inv_sy, e[9] * inv_sz,
            e[2] * inv_sx, e[6] * inv_sy, e[10] * inv_sz,
        );

        (position, quaternion, scale)
    }

    /// Rotation part of `m` with the scale divided out; translation cleared.
    pub fn extract_rotation(m: &Matrix4) -> Self {
        let mut out = Self::IDENTITY;
        for col in 0..3 {
            let axis = Vector3::from_matrix_column(m, col);
            let len = axis.length();
            axis.divide_scalar(len).write_to_slice(&mut out.elements, col * 4);
        }
        out
    }

    /// Create a translation matrix.
    pub fn from_translation(v: &Vector3) -> Self {
        Self {
            elements: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                v.x, v.y, v.z, 1.0,
            ],
        }
    }

    /// Create a rotation matrix from a quaternion.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, xy, xz) = (x * x2, x * y2, x * z2);
        let (yy, yz, zz) = (y * y2, y * z2, z * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);

        Self {
            elements: [
                1.0 - (yy + zz), xy + wz, xz - wy, 0.0,
                xy - wz, 1.0 - (xx + zz), yz + wx, 0.0,
                xz + wy, yz - wx, 1.0 - (xx + yy), 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Create a rotation matrix from Euler angles, honouring the rotation order.
    pub fn from_euler(euler: &Euler) -> Self {
        let (a, b) = (euler.x.cos(), euler.x.sin());
        let (c, d) = (euler.y.cos(), euler.y.sin());
        let (e, f) = (euler.z.cos(), euler.z.sin());

        // upper 3x3 in row-major order
        let r: [f32; 9] = match euler.order {
            EulerOrder::XYZ => {
                let (ae, af, be, bf) = (a * e, a * f, b * e, b * f);
                [
                    c * e, -c * f, d,
                    af + be * d, ae - bf * d, -b * c,
                    bf - ae * d, be + af * d, a * c,
                ]
            }
            EulerOrder::YXZ => {
                let (ce, cf, de, df) = (c * e, c * f, d * e, d * f);
                [
                    ce + df * b, de * b - cf, a * d,
                    a * f, a * e, -b,
                    cf * b - de, df + ce * b, a * c,
                ]
            }
            EulerOrder::ZXY => {
                let (ce, cf, de, df) = (c * e, c * f, d * e, d * f);
                [
                    ce - df * b, -a * f, de + cf * b,
                    cf + de * b, a * e, df - ce * b,
                    -a * d, b, a * c,
                ]
            }
            EulerOrder::ZYX => {
                let (ae, af, be, bf) = (a * e, a * f, b * e, b * f);
                [
                    c * e, be * d - af, ae * d + bf,
                    c * f, bf * d + ae, af * d - be,
                    -d, b * c, a * c,
                ]
            }
            EulerOrder::YZX => {
                let (ac, ad, bc, bd) = (a * c, a * d, b * c, b * d);
                [
                    c * e, bd - ac * f, bc * f + ad,
                    f, a * e, -b * e,
                    -d * e, ad * f + bc, ac - bd * f,
                ]
            }
            EulerOrder::XZY => {
                let (ac, ad, bc, bd) = (a * c, a * d, b * c, b * d);
                [
                    c * e, -f, d * e,
                    ac * f + bd, a * e, ad * f - bc,
                    bc * f - ad, b * e, bd * f + ac,
                ]
            }
        };

        Self::new(
            r[0], r[1], r[2], 0.0,
            r[3], r[4], r[5], 0.0,
            r[6], r[7], r[8], 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a scale matrix.
    pub fn from_scale(v: &Vector3) -> Self {
        Self {
            elements: [
                v.x, 0.0, 0.0, 0.0,
                0.0, v.y, 0.0, 0.0,
                0.0, 0.0, v.z, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Create a rotation matrix around the X axis.
    pub fn from_rotation_x(theta: f32) -> Self {
        let c = theta.cos();
        let s = theta.sin();
        Self {
            elements: [
                1.0, 0.0, 0.0, 0.0,
                0.0, c, s, 0.0,
                0.0, -s, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Create a rotation matrix around the Y axis.
    pub fn from_rotation_y(theta: f32) -> Self {
        let c = theta.cos();
        let s = theta.sin();
        Self {
            elements: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Create a rotation matrix around the Z axis.
    pub fn from_rotation_z(theta: f32) -> Self {
        let c = theta.cos();
        let s = theta.sin();
        Self {
            elements: [
                c, s, 0.0, 0.0,
                -s, c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Create a rotation matrix around a unit axis.
    pub fn from_axis_angle(axis: &Vector3, angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let (tx, ty) = (t * x, t * y);

        Self::new(
            tx * x + c, tx * y - s * z, tx * z + s * y, 0.0,
            tx * y + s * z, ty * y + c, ty * z - s * x, 0.0,
            tx * z - s * y, ty * z + s * x, t * z * z + c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Replace with a translation matrix.
    pub fn make_translation(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        *self = Self::from_translation(&Vector3::new(x, y, z));
        self
    }

    /// Replace with a scale matrix.
    pub fn make_scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        *self = Self::from_scale(&Vector3::new(x, y, z));
        self
    }

    /// Replace with a rotation about X.
    pub fn make_rotation_x(&mut self, theta: f32) -> &mut Self {
        *self = Self::from_rotation_x(theta);
        self
    }

    /// Replace with a rotation about Y.
    pub fn make_rotation_y(&mut self, theta: f32) -> &mut Self {
        *self = Self::from_rotation_y(theta);
        self
    }

    /// Replace with a rotation about Z.
    pub fn make_rotation_z(&mut self, theta: f32) -> &mut Self {
        *self = Self::from_rotation_z(theta);
        self
    }

    /// Replace with a rotation about a unit axis.
    pub fn make_rotation_axis(&mut self, axis: &Vector3, angle: f32) -> &mut Self {
        *self = Self::from_axis_angle(axis, angle);
        self
    }

    /// Replace with the rotation for `euler`.
    pub fn make_rotation_from_euler(&mut self, euler: &Euler) -> &mut Self {
        *self = Self::from_euler(euler);
        self
    }

    /// Replace with the rotation for `q`.
    pub fn make_rotation_from_quaternion(&mut self, q: &Quaternion) -> &mut Self {
        *self = Self::from_quaternion(q);
        self
    }

    /// Orient the basis so +Z points from `target` toward `eye`.
    ///
    /// Only the upper 3x3 is written; translation is preserved. A zero
    /// `eye - target` falls back to +Z, and an `up` parallel to the view
    /// direction is nudged off-axis.
    pub fn look_at(&mut self, eye: &Vector3, target: &Vector3, up: &Vector3) -> &mut Self {
        let mut z = (*eye - *target).normalized();
        if z.length_squared() == 0.0 {
            z.z = 1.0;
        }

        let mut x = up.cross(&z).normalized();
        if x.length_squared() == 0.0 {
            z.x += 0.0001;
            z.normalize();
            x = up.cross(&z).normalized();
        }

        let y = z.cross(&x);

        let te = &mut self.elements;
        x.write_to_slice(te, 0);
        y.write_to_slice(te, 4);
        z.write_to_slice(te, 8);
        self
    }

    /// GL frustum projection (clip-space depth -1..1).
    pub fn make_frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let x = 2.0 * near / (right - left);
        let y = 2.0 * near / (top - bottom);

        let a = (right + left) / (right - left);
        let b = (top + bottom) / (top - bottom);
        let c = -(far + near) / (far - near);
        let d = -2.0 * far * near / (far - near);

        Self::new(
            x, 0.0, a, 0.0,
            0.0, y, b, 0.0,
            0.0, 0.0, c, d,
            0.0, 0.0, -1.0, 0.0,
        )
    }

    /// GL perspective projection; `fov_deg` is the vertical field of view in degrees.
    pub fn make_perspective(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let ymax = near * (fov_deg * 0.5 * DEG2RAD).tan();
        let ymin = -ymax;
        Self::make_frustum(ymin * aspect, ymax * aspect, ymin, ymax, near, far)
    }

    /// GL orthographic projection (clip-space depth -1..1).
    pub fn make_orthographic(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        let w = right - left;
        let h = top - bottom;
        let p = far - near;

        let x = (right + left) / w;
        let y = (top + bottom) / h;
        let z = (far + near) / p;

        Self::new(
            2.0 / w, 0.0, 0.0, -x,
            0.0, 2.0 / h, 0.0, -y,
            0.0, 0.0, -2.0 / p, -z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Multiply this matrix by another (`self * other`).
    pub fn multiply(&self, other: &Matrix4) -> Self {
        Self::multiply_matrices(self, other)
    }

    /// Pre-multiply this matrix by another (`other * self`).
    pub fn premultiply(&self, other: &Matrix4) -> Self {
        Self::multiply_matrices(other, self)
    }

    /// Standard product `a * b`.
    pub fn multiply_matrices(a: &Matrix4, b: &Matrix4) -> Self {
        let a = &a.elements;
        let b = &b.elements;
        let mut out = [0.0f32; 16];

        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = a[row] * b[col * 4]
                    + a[4 + row] * b[col * 4 + 1]
                    + a[8 + row] * b[col * 4 + 2]
                    + a[12 + row] * b[col * 4 + 3];
            }
        }

        Self { elements: out }
    }

    /// Multiply by a scalar.
    pub fn multiply_scalar(&mut self, s: f32) -> &mut Self {
        for e in &mut self.elements {
            *e *= s;
        }
        self
    }

    /// Calculate the determinant.
    pub fn determinant(&self) -> f32 {
        let e = &self.elements;

        let n11 = e[0]; let n12 = e[4]; let n13 = e[8]; let n14 = e[12];
        let n21 = e[1]; let n22 = e[5]; let n23 = e[9]; let n24 = e[13];
        let n31 = e[2]; let n32 = e[6]; let n33 = e[10]; let n34 = e[14];
        let n41 = e[3]; let n42 = e[7]; let n43 = e[11]; let n44 = e[15];

        n41 * (n14 * n23 * n32 - n13 * n24 * n32 - n14 * n22 * n33 + n12 * n24 * n33 + n13 * n22 * n34 - n12 * n23 * n34)
            + n42 * (n11 * n23 * n34 - n11 * n24 * n33 + n14 * n21 * n33 - n13 * n21 * n34 + n13 * n24 * n31 - n14 * n23 * n31)
            + n43 * (n11 * n24 * n32 - n11 * n22 * n34 - n14 * n21 * n32 + n12 * n21 * n34 + n14 * n22 * n31 - n12 * n24 * n31)
            + n44 * (-n13 * n22 * n31 - n11 * n23 * n32 + n11 * n22 * n33 + n13 * n21 * n32 - n12 * n21 * n33 + n12 * n23 * n31)
    }

    /// Inverse, or `SingularMatrix` when the determinant is zero.
    pub fn try_inverse(&self) -> Result<Self> {
        let e = &self.elements;

        let n11 = e[0]; let n12 = e[4]; let n13 = e[8]; let n14 = e[12];
        let n21 = e[1]; let n22 = e[5]; let n23 = e[9]; let n24 = e[13];
        let n31 = e[2]; let n32 = e[6]; let n33 = e[10]; let n34 = e[14];
        let n41 = e[3]; let n42 = e[7]; let n43 = e[11]; let n44 = e[15];

        let t11 = n23 * n34 * n42 - n24 * n33 * n42 + n24 * n32 * n43 - n22 * n34 * n43 - n23 * n32 * n44 + n22 * n33 * n44;
        let t12 = n14 * n33 * n42 - n13 * n34 * n42 - n14 * n32 * n43 + n12 * n34 * n43 + n13 * n32 * n44 - n12 * n33 * n44;
        let t13 = n13 * n24 * n42 - n14 * n23 * n42 + n14 * n22 * n43 - n12 * n24 * n43 - n13 * n22 * n44 + n12 * n23 * n44;
        let t14 = n14 * n23 * n32 - n13 * n24 * n32 - n14 * n22 * n33 + n12 * n24 * n33 + n13 * n22 * n34 - n12 * n23 * n34;

        let det = n11 * t11 + n21 * t12 + n31 * t13 + n41 * t14;

        if det == 0.0 {
            return Err(KernelError::SingularMatrix);
        }

        let det_inv = 1.0 / det;

        Ok(Self {
            elements: [
                t11 * det_inv,
                (n24 * n33 * n41 - n23 * n34 * n41 - n24 * n31 * n43 + n21 * n34 * n43 + n23 * n31 * n44 - n21 * n33 * n44) * det_inv,
                (n22 * n34 * n41 - n24 * n32 * n41 + n24 * n31 * n42 - n21 * n34 * n42 - n22 * n31 * n44 + n21 * n32 * n44) * det_inv,
                (n23 * n32 * n41 - n22 * n33 * n41 - n23 * n31 * n42 + n21 * n33 * n42 + n22 * n31 * n43 - n21 * n32 * n43) * det_inv,
                t12 * det_inv,
                (n13 * n34 * n41 - n14 * n33 * n41 + n14 * n31 * n43 - n11 * n34 * n43 - n13 * n31 * n44 + n11 * n33 * n44) * det_inv,
                (n14 * n32 * n41 - n12 * n34 * n41 - n14 * n31 * n42 + n11 * n34 * n42 + n12 * n31 * n44 - n11 * n32 * n44) * det_inv,
                (n12 * n33 * n41 - n13 * n32 * n41 + n13 * n31 * n42 - n11 * n33 * n42 - n12 * n31 * n43 + n11 * n32 * n43) * det_inv,
                t13 * det_inv,
                (n14 * n23 * n41 - n13 * n24 * n41 - n14 * n21 * n43 + n11 * n24 * n43 + n13 * n21 * n44 - n11 * n23 * n44) * det_inv,
                (n12 * n24 * n41 - n14 * n22 * n41 + n14 * n21 * n42 - n11 * n24 * n42 - n12 * n21 * n44 + n11 * n22 * n44) * det_inv,
                (n13 * n22 * n41 - n12 * n23 * n41 - n13 * n21 * n42 + n11 * n23 * n42 + n12 * n21 * n43 - n11 * n22 * n43) * det_inv,
                t14 * det_inv,
                (n13 * n24 * n31 - n14 * n23 * n31 + n14 * n21 * n33 - n11 * n24 * n33 - n13 * n21 * n34 + n11 * n23 * n34) * det_inv,
                (n14 * n22 * n31 - n12 * n24 * n31 - n14 * n21 * n32 + n11 * n24 * n32 + n12 * n21 * n34 - n11 * n22 * n34) * det_inv,
                (n12 * n23 * n31 - n13 * n22 * n31 + n13 * n21 * n32 - n11 * n23 * n32 - n12 * n21 * n33 + n11 * n22 * n33) * det_inv,
            ],
        })
    }

    /// Invert this matrix. A singular matrix becomes the identity.
    pub fn invert(&mut self) -> &mut Self {
        *self = self.inverse();
        self
    }

    /// Return the inverse of this matrix, or the identity when singular.
    pub fn inverse(&self) -> Self {
        match self.try_inverse() {
            Ok(m) => m,
            Err(_) => {
                log::warn!("Matrix4 inverse: determinant is 0, returning identity");
                Self::IDENTITY
            }
        }
    }

    /// Normal matrix for this model matrix.
    pub fn normal_matrix(&self) -> Matrix3 {
        Matrix3::normal_matrix(self)
    }

    /// Transpose this matrix.
    pub fn transpose(&mut self) -> &mut Self {
        self.elements.swap(1, 4);
        self.elements.swap(2, 8);
        self.elements.swap(3, 12);
        self.elements.swap(6, 9);
        self.elements.swap(7, 13);
        self.elements.swap(11, 14);
        self
    }

    /// Return the transpose of this matrix.
    pub fn transposed(&self) -> Self {
        let mut m = *self;
        m.transpose();
        m
    }

    /// Transform a Vector3 as a point (with translation and perspective divide).
    ///
    /// A zero homogeneous w leaves the result undivided.
    pub fn transform_point(&self, v: &Vector3) -> Vector3 {
        let e = &self.elements;
        let w = e[3] * v.x + e[7] * v.y + e[11] * v.z + e[15];
        let inv_w = if w != 0.0 { 1.0 / w } else { 1.0 };
        Vector3 {
            x: (e[0] * v.x + e[4] * v.y + e[8] * v.z + e[12]) * inv_w,
            y: (e[1] * v.x + e[5] * v.y + e[9] * v.z + e[13]) * inv_w,
            z: (e[2] * v.x + e[6] * v.y + e[10] * v.z + e[14]) * inv_w,
        }
    }

    /// Transform a Vector3 as a direction (without translation).
    pub fn transform_direction(&self, v: &Vector3) -> Vector3 {
        let e = &self.elements;
        Vector3 {
            x: e[0] * v.x + e[4] * v.y + e[8] * v.z,
            y: e[1] * v.x + e[5] * v.y + e[9] * v.z,
            z: e[2] * v.x + e[6] * v.y + e[10] * v.z,
        }
    }

    /// Transform every xyz triple of a flat array as points, in place.
    pub fn apply_to_vector3_array(&self, array: &mut [f32]) {
        for chunk in array.chunks_exact_mut(3) {
            let p = self.transform_point(&Vector3::new(chunk[0], chunk[1], chunk[2]));
            chunk.copy_from_slice(&p.to_array());
        }
    }

    /// Check if approximately equal to another matrix.
    pub fn approx_eq(&self, other: &Matrix4, epsilon: f32) -> bool {
        self.elements.iter()
            .zip(other.elements.iter())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }

    /// Convert to column-major 2D array.
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        let e = &self.elements;
        [
            [e[0], e[1], e[2], e[3]],
            [e[4], e[5], e[6], e[7]],
            [e[8], e[9], e[10], e[11]],
            [e[12], e[13], e[14], e[15]],
        ]
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<Vector3> for Matrix4 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform_point(&rhs)
    }
}

impl From<glam::Mat4> for Matrix4 {
    fn from(m: glam::Mat4) -> Self {
        Self {
            elements: m.to_cols_array(),
        }
    }
}

impl From<Matrix4> for glam::Mat4 {
    fn from(m: Matrix4) -> Self {
        glam::Mat4::from_cols_array(&m.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const ORDERS: [EulerOrder; 6] = [
        EulerOrder::XYZ,
        EulerOrder::YXZ,
        EulerOrder::ZXY,
        EulerOrder::ZYX,
        EulerOrder::YZX,
        EulerOrder::XZY,
    ];

    #[test]
    fn test_identity() {
        let m = Matrix4::IDENTITY;
        let v = Vector3::new(1.0, 2.0, 3.0);
        let result = m.transform_point(&v);
        assert!(result.approx_eq(&v, 1e-6));
    }

    #[test]
    fn test_translation() {
        let m = Matrix4::from_translation(&Vector3::new(10.0, 20.0, 30.0));
        let result = m.transform_point(&Vector3::ZERO);
        assert!(result.approx_eq(&Vector3::new(10.0, 20.0, 30.0), 1e-6));
        assert_eq!(m.position(), Vector3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn test_inverse() {
        let m = Matrix4::compose(
            &Vector3::new(1.0, 2.0, 3.0),
            &Quaternion::from_axis_angle(&Vector3::new(1.0, 1.0, 0.0).normalized(), 0.7),
            &Vector3::new(2.0, 0.5, 1.5),
        );
        let result = m.multiply(&m.inverse());
        assert!(result.approx_eq(&Matrix4::IDENTITY, 1e-5));
    }

    #[test]
    fn test_singular_inverse_is_identity() {
        let m = Matrix4::from_scale(&Vector3::new(1.0, 0.0, 1.0));
        assert_eq!(m.try_inverse(), Err(KernelError::SingularMatrix));
        assert_eq!(m.inverse(), Matrix4::IDENTITY);
    }

    #[test]
    fn test_euler_matches_quaternion_for_every_order() {
        for order in ORDERS {
            let euler = Euler::new(0.3, -0.8, 1.1, order);
            let from_euler = Matrix4::from_euler(&euler);
            let from_quat = Matrix4::from_quaternion(&Quaternion::from_euler(&euler));
            assert!(from_euler.approx_eq(&from_quat, 1e-5), "order {order:?}");
        }
    }

    #[test]
    fn test_compose_decompose() {
        let p = Vector3::new(-4.0, 0.5, 9.0);
        let q = Quaternion::from_euler(&Euler::xyz(0.4, 0.2, -1.0));
        let s = Vector3::new(1.0, 2.0, 3.0);
        let (p2, q2, s2) = Matrix4::compose(&p, &q, &s).decompose();
        assert!(p2.approx_eq(&p, 1e-5));
        assert!(s2.approx_eq(&s, 1e-5));
        assert!(q2.approx_eq(&q, 1e-5) || q2.approx_eq(&-q, 1e-5));
    }

    #[test]
    fn test_decompose_negative_scale() {
        let s = Vector3::new(-2.0, 1.0, 1.0);
        let (_, _, s2) = Matrix4::compose(&Vector3::ZERO, &Quaternion::IDENTITY, &s).decompose();
        assert!(s2.approx_eq(&s, 1e-5));
    }

    #[test]
    fn test_rotation_axis_matches_named_axes() {
        let mut m = Matrix4::IDENTITY;
        m.make_rotation_axis(&Vector3::UNIT_Z, FRAC_PI_2);
        assert!(m.approx_eq(&Matrix4::from_rotation_z(FRAC_PI_2), 1e-6));
        let v = m.transform_direction(&Vector3::UNIT_X);
        assert!(v.approx_eq(&Vector3::UNIT_Y, 1e-6));
    }

    #[test]
    fn test_look_at_basis() {
        let mut m = Matrix4::IDENTITY;
        m.look_at(&Vector3::new(0.0, 0.0, 5.0), &Vector3::ZERO, &Vector3::UP);
        assert!(m.approx_eq(&Matrix4::IDENTITY, 1e-6));

        // up parallel to the view direction still yields an orthonormal basis
        m.look_at(&Vector3::new(0.0, 5.0, 0.0), &Vector3::ZERO, &Vector3::UP);
        let x = Vector3::from_matrix_column(&m, 0);
        let z = Vector3::from_matrix_column(&m, 2);
        assert!((x.length() - 1.0).abs() < 1e-4);
        assert!(x.dot(&z).abs() < 1e-4);
    }

    #[test]
    fn test_perspective_maps_near_and_far() {
        let m = Matrix4::make_perspective(90.0, 1.0, 1.0, 10.0);
        let near = m.transform_point(&Vector3::new(0.0, 0.0, -1.0));
        let far = m.transform_point(&Vector3::new(0.0, 0.0, -10.0));
        assert!((near.z + 1.0).abs() < 1e-5);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_orthographic_maps_box() {
        let m = Matrix4::make_orthographic(-2.0, 2.0, 1.0, -1.0, 0.0, 10.0);
        let corner = m.transform_point(&Vector3::new(2.0, 1.0, -10.0));
        assert!(corner.approx_eq(&Vector3::new(1.0, 1.0, 1.0), 1e-5));
    }

    #[test]
    fn test_max_scale_and_extract_rotation() {
        let q = Quaternion::from_axis_angle(&Vector3::UNIT_Y, 0.5);
        let m = Matrix4::compose(&Vector3::ONE, &q, &Vector3::new(1.0, 4.0, 2.0));
        assert!((m.max_scale_on_axis() - 4.0).abs() < 1e-5);
        let r = Matrix4::extract_rotation(&m);
        assert!(r.approx_eq(&Matrix4::from_quaternion(&q), 1e-5));
    }
}
