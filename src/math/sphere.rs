//! Bounding spheres.

use super::{Box3, Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// Sphere given by center and radius. A negative radius marks it empty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sphere {
    /// Center.
    pub center: Vector3,
    /// Radius.
    pub radius: f32,
}

impl Sphere {
    /// Sphere with the given center and radius.
    #[inline]
    pub const fn new(center: Vector3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere centered on the bounding box of `points`, reaching the farthest
    /// point.
    pub fn from_points(points: &[Vector3]) -> Self {
        let bounds = Box3::from_points(points);
        Self::around(bounds, points.iter().copied())
    }

    /// Same as [`from_points`](Self::from_points) for a flat position array.
    pub fn from_flat_positions(positions: &[f32]) -> Self {
        let bounds = Box3::from_flat_positions(positions);
        Self::around(
            bounds,
            positions.chunks_exact(3).map(|c| Vector3::new(c[0], c[1], c[2])),
        )
    }

    fn around(bounds: Box3, points: impl Iterator<Item = Vector3>) -> Self {
        if bounds.is_empty() {
            return Self::default();
        }
        let center = bounds.center();
        let radius_squared = points
            .map(|p| center.distance_to_squared(&p))
            .fold(0.0_f32, f32::max);
        Self::new(center, radius_squared.sqrt())
    }

    /// Whether the radius is negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.radius < 0.0
    }

    /// Whether `point` lies inside or on the surface.
    #[inline]
    pub fn contains_point(&self, point: &Vector3) -> bool {
        self.center.distance_to_squared(point) <= self.radius * self.radius
    }

    /// Box enclosing the sphere.
    pub fn bounding_box(&self) -> Box3 {
        if self.is_empty() {
            return Box3::EMPTY;
        }
        let extent = Vector3::splat(self.radius);
        Box3::new(self.center - extent, self.center + extent)
    }

    /// Transform the center and scale the radius by the largest axis scale.
    pub fn apply_matrix4(&self, m: &Matrix4) -> Self {
        Self::new(m.transform_point(&self.center), self.radius * m.max_scale_on_axis())
    }

    /// Center and radius within `epsilon`.
    #[inline]
    pub fn approx_eq(&self, other: &Sphere, epsilon: f32) -> bool {
        self.center.approx_eq(&other.center, epsilon)
            && (self.radius - other.radius).abs() < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_positions() {
        let s = Sphere::from_flat_positions(&[1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.5, 0.0]);
        assert!(s.center.approx_eq(&Vector3::new(0.0, 0.25, 0.0), 1e-6));
        assert!((s.radius - (1.0f32 + 0.0625).sqrt()).abs() < 1e-6);
        assert_eq!(Sphere::from_flat_positions(&[]), Sphere::default());
    }

    #[test]
    fn test_from_points_matches_flat() {
        let points = [Vector3::new(1.0, 2.0, 3.0), Vector3::new(-4.0, 0.0, 1.0)];
        let flat: Vec<f32> = points.iter().flat_map(|p| p.to_array()).collect();
        assert_eq!(Sphere::from_points(&points), Sphere::from_flat_positions(&flat));
    }

    #[test]
    fn test_contains_point() {
        let s = Sphere::new(Vector3::ZERO, 1.0);
        assert!(s.contains_point(&Vector3::new(0.5, 0.5, 0.0)));
        assert!(s.contains_point(&Vector3::UNIT_X));
        assert!(!s.contains_point(&Vector3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_bounding_box() {
        let s = Sphere::new(Vector3::new(1.0, 0.0, 0.0), 2.0);
        let b = s.bounding_box();
        assert_eq!(b.min, Vector3::new(-1.0, -2.0, -2.0));
        assert_eq!(b.max, Vector3::new(3.0, 2.0, 2.0));
        assert!(Sphere::new(Vector3::ZERO, -1.0).bounding_box().is_empty());
    }

    #[test]
    fn test_apply_matrix4_scales_radius() {
        let s = Sphere::new(Vector3::ZERO, 1.0)
            .apply_matrix4(&Matrix4::from_scale(&Vector3::new(1.0, 3.0, 2.0)));
        assert!((s.radius - 3.0).abs() < 1e-6);
    }
}
