//! Centripetal, chordal and uniform Catmull-Rom splines through 3D points.

use super::Curve;
use crate::math::Vector3;
use serde::{Deserialize, Serialize};

/// Knot parameterization of a [`CatmullRomCurve3`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveType {
    /// Knot spacing by the square root of chord length. No cusps or self-intersections within a segment.
    #[default]
    Centripetal,
    /// Knot spacing by chord length.
    Chordal,
    /// Uniform knots with an explicit tension.
    #[serde(rename = "catmullrom")]
    CatmullRom,
}

/// Cubic `c0 + c1 t + c2 t² + c3 t³` for one coordinate of one segment.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct CubicPoly {
    c0: f32,
    c1: f32,
    c2: f32,
    c3: f32,
}

impl CubicPoly {
    /// Hermite form: value `x0`, `x1` and slope `t0`, `t1` at the ends.
    fn hermite(x0: f32, x1: f32, t0: f32, t1: f32) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    /// Uniform segment between `x1` and `x2`.
    pub(crate) fn catmull_rom(x0: f32, x1: f32, x2: f32, x3: f32, tension: f32) -> Self {
        Self::hermite(x1, x2, tension * (x2 - x0), tension * (x3 - x1))
    }

    /// Segment between `x1` and `x2` with knot intervals `dt0`, `dt1`, `dt2`.
    pub(crate) fn nonuniform_catmull_rom(
        x0: f32,
        x1: f32,
        x2: f32,
        x3: f32,
        dt0: f32,
        dt1: f32,
        dt2: f32,
    ) -> Self {
        let t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        Self::hermite(x1, x2, t1 * dt1, t2 * dt1)
    }

    #[inline]
    pub(crate) fn calc(&self, t: f32) -> f32 {
        let t2 = t * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t2 * t
    }
}

/// Smooth curve passing through every control point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatmullRomCurve3 {
    /// Control points, visited in order.
    pub points: Vec<Vector3>,
    /// Join the last point back to the first.
    pub closed: bool,
    /// Knot parameterization.
    pub curve_type: CurveType,
    /// Tension for [`CurveType::CatmullRom`].
    pub tension: f32,
}

impl Default for CatmullRomCurve3 {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CatmullRomCurve3 {
    /// Open centripetal curve through `points`.
    pub fn new(points: Vec<Vector3>) -> Self {
        if points.len() < 2 {
            log::warn!(
                "CatmullRomCurve3 needs at least 2 points, got {}",
                points.len()
            );
        }
        Self {
            points,
            closed: false,
            curve_type: CurveType::Centripetal,
            tension: 0.5,
        }
    }

    /// Set whether the curve loops.
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Set the knot parameterization.
    pub fn with_curve_type(mut self, curve_type: CurveType) -> Self {
        self.curve_type = curve_type;
        self
    }

    /// Set the tension used by [`CurveType::CatmullRom`].
    pub fn with_tension(mut self, tension: f32) -> Self {
        self.tension = tension;
        self
    }

    /// Segment index and local weight for parameter `t`.
    fn locate(&self, t: f32) -> (usize, f32) {
        let l = self.points.len();
        let span = if self.closed { l } else { l - 1 };
        let p = span as f32 * t.clamp(0.0, 1.0);
        let mut index = p.floor() as usize;
        let mut weight = p - index as f32;

        if self.closed {
            index %= l;
        } else if index >= l - 1 {
            index = l - 2;
            weight = 1.0;
        }
        (index, weight)
    }
}

impl Curve for CatmullRomCurve3 {
    type Point = Vector3;

    fn point(&self, t: f32) -> Vector3 {
        let points = &self.points;
        let l = points.len();
        match l {
            0 => return Vector3::ZERO,
            1 => return points[0],
            _ => {}
        }

        let (index, weight) = self.locate(t);

        let p0 = if self.closed || index > 0 {
            points[(index + l - 1) % l]
        } else {
            points[0] * 2.0 - points[1]
        };
        let p1 = points[index % l];
        let p2 = points[(index + 1) % l];
        let p3 = if self.closed || index + 2 < l {
            points[(index + 2) % l]
        } else {
            points[l - 1] * 2.0 - points[l - 2]
        };

        let (px, py, pz) = match self.curve_type {
            CurveType::Centripetal | CurveType::Chordal => {
                let pow = if self.curve_type == CurveType::Chordal { 0.5 } else { 0.25 };
                let mut dt0 = p0.distance_to_squared(&p1).powf(pow);
                let mut dt1 = p1.distance_to_squared(&p2).powf(pow);
                let mut dt2 = p2.distance_to_squared(&p3).powf(pow);

                // Coincident points.
                if dt1 < 1e-4 {
                    dt1 = 1.0;
                }
                if dt0 < 1e-4 {
                    dt0 = dt1;
                }
                if dt2 < 1e-4 {
                    dt2 = dt1;
                }

                (
                    CubicPoly::nonuniform_catmull_rom(p0.x, p1.x, p2.x, p3.x, dt0, dt1, dt2),
                    CubicPoly::nonuniform_catmull_rom(p0.y, p1.y, p2.y, p3.y, dt0, dt1, dt2),
                    CubicPoly::nonuniform_catmull_rom(p0.z, p1.z, p2.z, p3.z, dt0, dt1, dt2),
                )
            }
            CurveType::CatmullRom => (
                CubicPoly::catmull_rom(p0.x, p1.x, p2.x, p3.x, self.tension),
                CubicPoly::catmull_rom(p0.y, p1.y, p2.y, p3.y, self.tension),
                CubicPoly::catmull_rom(p0.z, p1.z, p2.z, p3.z, self.tension),
            ),
        };

        Vector3::new(px.calc(weight), py.calc(weight), pz.calc(weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control_points() -> Vec<Vector3> {
        vec![
            Vector3::new(-10.0, 0.0, 10.0),
            Vector3::new(-5.0, 5.0, 5.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(5.0, -5.0, 5.0),
            Vector3::new(10.0, 0.0, 10.0),
        ]
    }

    #[test]
    fn test_passes_through_control_points() {
        for curve_type in [CurveType::Centripetal, CurveType::Chordal, CurveType::CatmullRom] {
            let points = control_points();
            let curve = CatmullRomCurve3::new(points.clone()).with_curve_type(curve_type);
            let last = (points.len() - 1) as f32;
            for (i, p) in points.iter().enumerate() {
                let at = curve.point(i as f32 / last);
                assert!(at.approx_eq(p, 1e-4), "{curve_type:?} {i}: {at:?}");
            }
        }
    }

    #[test]
    fn test_closed_curve_wraps() {
        let points = control_points();
        let curve = CatmullRomCurve3::new(points.clone()).with_closed(true);
        assert!(curve.point(1.0).approx_eq(&points[0], 1e-4));
        assert!(curve.point(0.0).approx_eq(&points[0], 1e-4));
        // Closing segment runs from the last point back to the first.
        assert!(curve.point(0.8).approx_eq(&points[4], 1e-4));
    }

    #[test]
    fn test_uniform_segment_matches_cubic() {
        let poly = CubicPoly::catmull_rom(0.0, 1.0, 2.0, 3.0, 0.5);
        // Evenly spaced samples give a straight line.
        assert!((poly.calc(0.5) - 1.5).abs() < 1e-6);
        assert!((poly.calc(1.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_points_stay_finite() {
        let curve = CatmullRomCurve3::new(vec![Vector3::ONE, Vector3::ONE, Vector3::ONE]);
        let p = curve.point(0.3);
        assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
        assert!(p.approx_eq(&Vector3::ONE, 1e-6));
    }

    #[test]
    fn test_short_curves() {
        assert_eq!(CatmullRomCurve3::new(Vec::new()).point(0.5), Vector3::ZERO);
        let single = CatmullRomCurve3::new(vec![Vector3::UNIT_X]);
        assert_eq!(single.point(0.5), Vector3::UNIT_X);
    }

    #[test]
    fn test_two_points_form_a_line() {
        let curve = CatmullRomCurve3::new(vec![Vector3::ZERO, Vector3::new(2.0, 0.0, 0.0)]);
        assert!(curve.point(0.5).approx_eq(&Vector3::new(1.0, 0.0, 0.0), 1e-5));
        assert!((curve.length() - 2.0).abs() < 1e-3);
    }
}
