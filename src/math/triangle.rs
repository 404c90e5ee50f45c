//! Triangle helpers shared by normal generation and edge extraction.

use super::{Box3, Vector3};
use serde::{Deserialize, Serialize};

/// Three corners, counter-clockwise when seen from the front.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Triangle {
    /// First corner.
    pub a: Vector3,
    /// Second corner.
    pub b: Vector3,
    /// Third corner.
    pub c: Vector3,
}

impl Triangle {
    /// Triangle from its corners.
    #[inline]
    pub const fn new(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self { a, b, c }
    }

    /// Unnormalized face normal `(c - b) × (a - b)`; its length is twice the area.
    #[inline]
    pub fn scaled_normal(&self) -> Vector3 {
        (self.c - self.b).cross(&(self.a - self.b))
    }

    /// Unit face normal. Degenerate triangles give zero.
    #[inline]
    pub fn normal(&self) -> Vector3 {
        self.scaled_normal().normalized()
    }

    /// Surface area.
    pub fn area(&self) -> f32 {
        self.scaled_normal().length() * 0.5
    }

    /// Average of the corners.
    #[inline]
    pub fn centroid(&self) -> Vector3 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Whether two corners coincide or all three are collinear.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.scaled_normal().length_squared() == 0.0
    }

    /// Bounds of the corners.
    pub fn bounding_box(&self) -> Box3 {
        Box3::from_points(&[self.a, self.b, self.c])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_right() -> Triangle {
        Triangle::new(Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Y)
    }

    #[test]
    fn test_area() {
        assert!((unit_right().area() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_normal_follows_winding() {
        let t = unit_right();
        assert!(t.normal().approx_eq(&Vector3::UNIT_Z, 1e-6));
        let flipped = Triangle::new(t.a, t.c, t.b);
        assert!(flipped.normal().approx_eq(&-Vector3::UNIT_Z, 1e-6));
    }

    #[test]
    fn test_degenerate_normal_is_zero() {
        let t = Triangle::new(Vector3::ZERO, Vector3::UNIT_X, Vector3::new(2.0, 0.0, 0.0));
        assert!(t.is_degenerate());
        assert_eq!(t.normal(), Vector3::ZERO);
        assert_eq!(t.area(), 0.0);
    }

    #[test]
    fn test_centroid_and_bounds() {
        let t = Triangle::new(Vector3::ZERO, Vector3::new(3.0, 0.0, 0.0), Vector3::new(0.0, 3.0, 3.0));
        assert!(t.centroid().approx_eq(&Vector3::new(1.0, 1.0, 1.0), 1e-6));
        assert_eq!(t.bounding_box().max, Vector3::new(3.0, 3.0, 3.0));
    }
}
