//! Axis-aligned bounds of vertex data.

use super::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box. An inverted box (`min > max` on any axis) is
/// empty and absorbs the first point it is expanded by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box3 {
    /// Lower corner.
    pub min: Vector3,
    /// Upper corner.
    pub max: Vector3,
}

impl Default for Box3 {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Box3 {
    /// Inverted box containing nothing.
    pub const EMPTY: Self = Self {
        min: Vector3 { x: f32::INFINITY, y: f32::INFINITY, z: f32::INFINITY },
        max: Vector3 { x: f32::NEG_INFINITY, y: f32::NEG_INFINITY, z: f32::NEG_INFINITY },
    };

    /// Box with the given corners.
    #[inline]
    pub const fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// Bounds of a set of points.
    pub fn from_points(points: &[Vector3]) -> Self {
        points.iter().fold(Self::EMPTY, |mut bounds, p| {
            bounds.expand_by_point(p);
            bounds
        })
    }

    /// Bounds of a flat `[x, y, z, x, y, z, ...]` position array. A trailing
    /// partial triple is ignored.
    pub fn from_flat_positions(positions: &[f32]) -> Self {
        positions
            .chunks_exact(3)
            .fold(Self::EMPTY, |mut bounds, c| {
                bounds.expand_by_point(&Vector3::new(c[0], c[1], c[2]));
                bounds
            })
    }

    /// Whether the box contains no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    /// Midpoint; zero for an empty box.
    pub fn center(&self) -> Vector3 {
        if self.is_empty() {
            return Vector3::ZERO;
        }
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis; zero for an empty box.
    pub fn size(&self) -> Vector3 {
        if self.is_empty() {
            return Vector3::ZERO;
        }
        self.max - self.min
    }

    /// Grow to include `point`.
    #[inline]
    pub fn expand_by_point(&mut self, point: &Vector3) -> &mut Self {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
        self
    }

    /// Whether `point` lies inside or on the boundary.
    pub fn contains_point(&self, point: &Vector3) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Box3) -> Self {
        Self::new(self.min.min(&other.min), self.max.max(&other.max))
    }

    /// The eight corners, `min` first and `max` last.
    pub fn corners(&self) -> [Vector3; 8] {
        let (lo, hi) = (self.min, self.max);
        std::array::from_fn(|i| {
            Vector3::new(
                if i & 4 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 1 == 0 { lo.z } else { hi.z },
            )
        })
    }

    /// Axis-aligned bounds of the box after transforming it by `m`.
    pub fn apply_matrix4(&self, m: &Matrix4) -> Self {
        if self.is_empty() {
            return Self::EMPTY;
        }
        let corners = self.corners().map(|corner| m.transform_point(&corner));
        Self::from_points(&corners)
    }

    /// Per-corner comparison within `epsilon`.
    #[inline]
    pub fn approx_eq(&self, other: &Box3, epsilon: f32) -> bool {
        self.min.approx_eq(&other.min, epsilon) && self.max.approx_eq(&other.max, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_box() {
        let b = Box3::default();
        assert!(b.is_empty());
        assert_eq!(b.center(), Vector3::ZERO);
        assert_eq!(b.size(), Vector3::ZERO);
        assert!(Box3::from_points(&[]).is_empty());
    }

    #[test]
    fn test_from_flat_positions() {
        let b = Box3::from_flat_positions(&[1.0, -2.0, 0.5, -1.0, 3.0, 0.0, 9.0]);
        assert!(b.approx_eq(&Box3::new(Vector3::new(-1.0, -2.0, 0.0), Vector3::new(1.0, 3.0, 0.5)), 1e-6));
        assert!(Box3::from_flat_positions(&[]).is_empty());
    }

    #[test]
    fn test_center_size_contains() {
        let b = Box3::new(Vector3::ZERO, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(b.center(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(b.size(), Vector3::new(2.0, 4.0, 6.0));
        assert!(b.contains_point(&Vector3::new(2.0, 0.0, 3.0)));
        assert!(!b.contains_point(&Vector3::new(2.1, 0.0, 3.0)));
    }

    #[test]
    fn test_corners() {
        let b = Box3::new(Vector3::ZERO, Vector3::ONE);
        let corners = b.corners();
        assert_eq!(corners[0], Vector3::ZERO);
        assert_eq!(corners[7], Vector3::ONE);
        assert_eq!(Box3::from_points(&corners), b);
    }

    #[test]
    fn test_union() {
        let a = Box3::new(Vector3::ZERO, Vector3::ONE);
        let b = Box3::new(Vector3::splat(-1.0), Vector3::splat(0.5));
        assert_eq!(a.union(&b), Box3::new(Vector3::splat(-1.0), Vector3::ONE));
        assert_eq!(a.union(&Box3::EMPTY), a);
    }

    #[test]
    fn test_apply_matrix4_rotation() {
        let b = Box3::new(Vector3::ZERO, Vector3::new(2.0, 1.0, 1.0));
        let rotated = b.apply_matrix4(&Matrix4::from_rotation_z(std::f32::consts::FRAC_PI_2));
        assert!(rotated.approx_eq(&Box3::new(Vector3::new(-1.0, 0.0, 0.0), Vector3::new(0.0, 2.0, 1.0)), 1e-5));
        assert!(Box3::EMPTY.apply_matrix4(&Matrix4::IDENTITY).is_empty());
    }
}
