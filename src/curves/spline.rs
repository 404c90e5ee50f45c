//! Uniform Catmull-Rom spline in the plane.

use super::catmull_rom::CubicPoly;
use super::Curve;
use crate::math::Vector2;
use serde::{Deserialize, Serialize};

/// Smooth 2D curve through its points; end segments clamp to the end points.
///
/// Typical use is a lathe profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplineCurve {
    /// Control points, visited in order.
    pub points: Vec<Vector2>,
}

impl SplineCurve {
    /// Create a spline through `points`.
    pub fn new(points: Vec<Vector2>) -> Self {
        Self { points }
    }
}

impl Curve for SplineCurve {
    type Point = Vector2;

    fn point(&self, t: f32) -> Vector2 {
        let points = &self.points;
        let l = points.len();
        match l {
            0 => return Vector2::ZERO,
            1 => return points[0],
            _ => {}
        }

        let p = (l - 1) as f32 * t.clamp(0.0, 1.0);
        let index = (p.floor() as usize).min(l - 1);
        let weight = p - index as f32;

        let p0 = points[index.saturating_sub(1)];
        let p1 = points[index];
        let p2 = points[(index + 1).min(l - 1)];
        let p3 = points[(index + 2).min(l - 1)];

        Vector2::new(
            CubicPoly::catmull_rom(p0.x, p1.x, p2.x, p3.x, 0.5).calc(weight),
            CubicPoly::catmull_rom(p0.y, p1.y, p2.y, p3.y, 0.5).calc(weight),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spline_hits_points() {
        let points = vec![
            Vector2::new(0.0, -1.0),
            Vector2::new(0.5, 0.0),
            Vector2::new(0.25, 1.0),
        ];
        let spline = SplineCurve::new(points.clone());
        assert!(spline.point(0.0).approx_eq(&points[0], 1e-6));
        assert!(spline.point(0.5).approx_eq(&points[1], 1e-6));
        assert!(spline.point(1.0).approx_eq(&points[2], 1e-6));
    }

    #[test]
    fn test_spline_between_points_is_smooth() {
        let spline = SplineCurve::new(vec![Vector2::ZERO, Vector2::new(1.0, 1.0), Vector2::new(2.0, 0.0)]);
        let mid = spline.point(0.25);
        assert!(mid.x > 0.0 && mid.x < 1.0);
        assert!(mid.y > 0.5);
    }
}
