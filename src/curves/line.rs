//! Straight segment between two points.

use super::{Curve, CurvePoint};
use crate::math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Straight segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineCurve<P> {
    /// Point at `t = 0`.
    pub start: P,
    /// Point at `t = 1`.
    pub end: P,
}

/// Segment in the plane.
pub type LineCurve2 = LineCurve<Vector2>;
/// Segment in space.
pub type LineCurve3 = LineCurve<Vector3>;

impl<P: CurvePoint> LineCurve<P> {
    /// Create a segment.
    #[inline]
    pub const fn new(start: P, end: P) -> Self {
        Self { start, end }
    }
}

impl<P: CurvePoint> Curve for LineCurve<P> {
    type Point = P;

    #[inline]
    fn point(&self, t: f32) -> P {
        self.start.lerp(&self.end, t)
    }

    fn length(&self) -> f32 {
        self.start.distance_to(&self.end)
    }

    // Already uniform in arc length.
    fn u_to_t(&self, u: f32) -> f32 {
        u.clamp(0.0, 1.0)
    }

    fn point_at(&self, u: f32) -> P {
        self.point(u)
    }

    fn tangent(&self, _t: f32) -> P {
        (self.end - self.start).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_length_and_midpoint() {
        let line = LineCurve3::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 4.0, 3.0));
        assert!((line.length() - 5.0).abs() < 1e-6);
        assert!(line.point_at(0.5).approx_eq(&Vector3::new(1.0, 2.0, 1.5), 1e-6));
        assert!(line.tangent_at(0.9).approx_eq(&Vector3::new(0.0, 0.8, 0.6), 1e-6));
    }

    #[test]
    fn test_line_2d_points() {
        let line = LineCurve2::new(Vector2::ZERO, Vector2::new(2.0, 0.0));
        let points = line.spaced_points(4);
        assert_eq!(points.len(), 5);
        assert!(points[3].approx_eq(&Vector2::new(1.5, 0.0), 1e-5));
    }

    #[test]
    fn test_degenerate_line_tangent_is_zero() {
        let line = LineCurve3::new(Vector3::ONE, Vector3::ONE);
        assert_eq!(line.tangent(0.5), Vector3::ZERO);
        assert_eq!(line.length(), 0.0);
    }
}
