//! Curve defined by a closure.

use super::{Curve, CurvePoint};
use std::fmt;

/// Curve whose points come from `f(t)`.
#[derive(Clone)]
pub struct ParametricCurve<F> {
    function: F,
    divisions: usize,
}

impl<F, P> ParametricCurve<F>
where
    F: Fn(f32) -> P,
    P: CurvePoint,
{
    /// Wrap `function` as a curve.
    pub fn new(function: F) -> Self {
        Self {
            function,
            divisions: super::DEFAULT_ARC_LENGTH_DIVISIONS,
        }
    }

    /// Use `divisions` chords for arc-length queries.
    pub fn with_arc_length_divisions(mut self, divisions: usize) -> Self {
        self.divisions = divisions.max(1);
        self
    }
}

impl<F> fmt::Debug for ParametricCurve<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParametricCurve")
            .field("divisions", &self.divisions)
            .finish_non_exhaustive()
    }
}

impl<F, P> Curve for ParametricCurve<F>
where
    F: Fn(f32) -> P,
    P: CurvePoint,
{
    type Point = P;

    #[inline]
    fn point(&self, t: f32) -> P {
        (self.function)(t)
    }

    fn arc_length_divisions(&self) -> usize {
        self.divisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use std::f32::consts::PI;

    #[test]
    fn test_circle_length() {
        let circle = ParametricCurve::new(|t: f32| {
            let a = t * 2.0 * PI;
            Vector3::new(a.cos(), a.sin(), 0.0)
        })
        .with_arc_length_divisions(1000);
        assert!((circle.length() - 2.0 * PI).abs() < 2e-3);
        assert!(circle.point_at(0.25).approx_eq(&Vector3::UNIT_Y, 5e-3));
    }
}
