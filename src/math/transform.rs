//! Position / rotation / scale triple with a lazily recomposed matrix.

use super::{Euler, EulerOrder, Matrix3, Matrix4, Quaternion, TrackedQuaternion, Vector3};

/// TRS transform. The rotation is a [`TrackedQuaternion`]; any mutation of it,
/// direct or through the setters, makes the next [`matrix`](Self::matrix)
/// call recompose.
#[derive(Debug, Clone)]
pub struct Transform {
    /// Local position.
    position: Vector3,
    /// Local rotation.
    rotation: TrackedQuaternion,
    /// Local scale.
    scale: Vector3,
    /// Euler view of the rotation, kept in the order last requested.
    euler: Euler,
    /// Cached composed matrix.
    matrix: Matrix4,
    /// Whether position or scale changed since the last compose.
    dirty: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Identity transform.
    pub fn new() -> Self {
        Self {
            position: Vector3::ZERO,
            rotation: TrackedQuaternion::new(Quaternion::IDENTITY),
            scale: Vector3::ONE,
            euler: Euler::ZERO,
            matrix: Matrix4::IDENTITY,
            dirty: false,
        }
    }

    /// Transform from position, rotation, and scale.
    pub fn from_components(position: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        let mut t = Self::new();
        t.position = position;
        t.rotation.copy(&rotation);
        t.scale = scale;
        t.dirty = true;
        t
    }

    /// Split a matrix back into a transform.
    pub fn from_matrix(m: &Matrix4) -> Self {
        let (position, rotation, scale) = m.decompose();
        Self::from_components(position, rotation, scale)
    }

    /// Local position.
    #[inline]
    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Local scale.
    #[inline]
    pub fn scale(&self) -> Vector3 {
        self.scale
    }

    /// Local rotation.
    #[inline]
    pub fn rotation(&self) -> Quaternion {
        self.rotation.get()
    }

    /// Mutable access to the tracked rotation.
    #[inline]
    pub fn rotation_mut(&mut self) -> &mut TrackedQuaternion {
        &mut self.rotation
    }

    /// Set position.
    #[inline]
    pub fn set_position(&mut self, position: Vector3) -> &mut Self {
        self.position = position;
        self.dirty = true;
        self
    }

    /// Set scale.
    #[inline]
    pub fn set_scale(&mut self, scale: Vector3) -> &mut Self {
        self.scale = scale;
        self.dirty = true;
        self
    }

    /// Set rotation from Euler angles.
    pub fn set_euler(&mut self, euler: Euler) -> &mut Self {
        self.rotation.set_from_euler(&euler);
        self
    }

    /// Rotation as Euler angles in `order`.
    pub fn euler(&mut self, order: EulerOrder) -> Euler {
        if self.euler.order != order || self.rotation.is_changed() {
            self.euler = Euler::from_quaternion(&self.rotation.get(), order);
        }
        self.euler
    }

    /// Translate by a vector.
    #[inline]
    pub fn translate(&mut self, v: &Vector3) -> &mut Self {
        self.position += *v;
        self.dirty = true;
        self
    }

    /// Rotate around a local unit axis.
    pub fn rotate_on_axis(&mut self, axis: &Vector3, angle: f32) -> &mut Self {
        self.rotation.multiply(&Quaternion::from_axis_angle(axis, angle));
        self
    }

    /// Turn so local +Z points from `target` toward the current position.
    pub fn look_at(&mut self, target: &Vector3, up: &Vector3) -> &mut Self {
        let mut m = Matrix4::IDENTITY;
        m.look_at(&self.position, target, up);
        self.rotation.set_from_rotation_matrix(&m);
        self
    }

    /// Whether the next [`matrix`](Self::matrix) call will recompose.
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.dirty || self.rotation.is_changed()
    }

    /// Composed matrix, recomputed only after a change.
    pub fn matrix(&mut self) -> &Matrix4 {
        let rotation_changed = self.rotation.take_changed();
        if self.dirty || rotation_changed {
            if rotation_changed {
                self.euler = Euler::from_quaternion(&self.rotation.get(), self.euler.order);
            }
            self.matrix = Matrix4::compose(&self.position, &self.rotation.get(), &self.scale);
            self.dirty = false;
        }
        &self.matrix
    }

    /// Normal matrix of the composed transform.
    pub fn normal_matrix(&mut self) -> Matrix3 {
        Matrix3::normal_matrix(self.matrix())
    }
}
