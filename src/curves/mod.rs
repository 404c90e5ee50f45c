//! # Curves Module
//!
//! Parametric curves that drive the curve-based generators (lathe, tube).
//!
//! A curve is sampled by a parameter `t ∈ [0, 1]` through [`Curve::point`].
//! The `*_at` variants take an arc-length fraction `u` instead, so equal
//! steps in `u` cover equal distances along the curve. The mapping between
//! the two goes through an [`ArcLengthTable`].

mod catmull_rom;
mod frenet;
mod line;
mod parametric;
mod spline;

pub use catmull_rom::{CatmullRomCurve3, CurveType};
pub use frenet::FrenetFrames;
pub use line::{LineCurve, LineCurve2, LineCurve3};
pub use parametric::ParametricCurve;
pub use spline::SplineCurve;

use crate::math::{Vector2, Vector3};
use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

/// Default number of chords used to approximate arc length.
pub const DEFAULT_ARC_LENGTH_DIVISIONS: usize = 200;

/// Point type a curve can be sampled into.
pub trait CurvePoint:
    Copy + Debug + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
    /// Euclidean distance to another point.
    fn distance_to(&self, other: &Self) -> f32;

    /// Unit-length copy; zero stays zero.
    fn normalized(&self) -> Self;

    /// Linear interpolation toward `other`.
    fn lerp(&self, other: &Self, alpha: f32) -> Self;
}

impl CurvePoint for Vector2 {
    #[inline]
    fn distance_to(&self, other: &Self) -> f32 {
        Vector2::distance_to(self, other)
    }

    #[inline]
    fn normalized(&self) -> Self {
        Vector2::normalized(self)
    }

    #[inline]
    fn lerp(&self, other: &Self, alpha: f32) -> Self {
        Vector2::lerp(self, other, alpha)
    }
}

impl CurvePoint for Vector3 {
    #[inline]
    fn distance_to(&self, other: &Self) -> f32 {
        Vector3::distance_to(self, other)
    }

    #[inline]
    fn normalized(&self) -> Self {
        Vector3::normalized(self)
    }

    #[inline]
    fn lerp(&self, other: &Self, alpha: f32) -> Self {
        Vector3::lerp(self, other, alpha)
    }
}

/// Cumulative chord lengths of a curve sampled at evenly spaced `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthTable {
    lengths: Vec<f32>,
}

impl ArcLengthTable {
    /// Sample `curve` at `divisions + 1` points and accumulate chord lengths.
    pub fn from_curve<C: Curve + ?Sized>(curve: &C, divisions: usize) -> Self {
        let divisions = divisions.max(1);
        let mut lengths = Vec::with_capacity(divisions + 1);
        lengths.push(0.0);

        let mut last = curve.point(0.0);
        let mut sum = 0.0;
        for d in 1..=divisions {
            let current = curve.point(d as f32 / divisions as f32);
            sum += current.distance_to(&last);
            lengths.push(sum);
            last = current;
        }

        Self { lengths }
    }

    /// Cumulative lengths, starting at zero.
    #[inline]
    pub fn lengths(&self) -> &[f32] {
        &self.lengths
    }

    /// Consume the table, returning the cumulative lengths.
    #[inline]
    pub fn into_lengths(self) -> Vec<f32> {
        self.lengths
    }

    /// Approximate total length.
    #[inline]
    pub fn total(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Map an arc-length fraction `u` to the curve parameter `t`.
    ///
    /// Finds the last sample shorter than the target length and interpolates
    /// linearly inside that chord.
    pub fn u_to_t(&self, u: f32) -> f32 {
        let n = self.lengths.len();
        if n < 2 {
            return u.clamp(0.0, 1.0);
        }
        let last = (n - 1) as f32;
        let target = u.clamp(0.0, 1.0) * self.total();

        let first_not_shorter = self.lengths.partition_point(|&l| l < target);
        if first_not_shorter < n && self.lengths[first_not_shorter] == target {
            return first_not_shorter as f32 / last;
        }
        if first_not_shorter >= n {
            return 1.0;
        }

        // lengths[0] == 0 <= target, so a shorter sample always exists here.
        let high = first_not_shorter - 1;
        let before = self.lengths[high];
        let after = self.lengths[high + 1];
        let segment = after - before;
        if segment <= 0.0 {
            return high as f32 / last;
        }

        (high as f32 + (target - before) / segment) / last
    }
}

/// A curve sampled by a parameter in `[0, 1]`.
///
/// Only [`point`](Curve::point) is required; everything else is derived from
/// it and may be overridden when an implementor knows better (a straight line
/// is already arc-length parameterized, for example).
pub trait Curve {
    /// Point type produced by the curve.
    type Point: CurvePoint;

    /// Point at parameter `t`.
    fn point(&self, t: f32) -> Self::Point;

    /// Number of chords used for arc-length queries.
    fn arc_length_divisions(&self) -> usize {
        DEFAULT_ARC_LENGTH_DIVISIONS
    }

    /// Arc-length table with [`arc_length_divisions`](Curve::arc_length_divisions) chords.
    fn arc_lengths(&self) -> ArcLengthTable {
        ArcLengthTable::from_curve(self, self.arc_length_divisions())
    }

    /// Cumulative lengths for `divisions` chords.
    fn lengths(&self, divisions: usize) -> Vec<f32> {
        ArcLengthTable::from_curve(self, divisions).into_lengths()
    }

    /// Approximate total length.
    fn length(&self) -> f32 {
        self.arc_lengths().total()
    }

    /// Map an arc-length fraction to the curve parameter.
    fn u_to_t(&self, u: f32) -> f32 {
        self.arc_lengths().u_to_t(u)
    }

    /// Point at arc-length fraction `u`.
    fn point_at(&self, u: f32) -> Self::Point {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at parameter `t`, by central difference.
    fn tangent(&self, t: f32) -> Self::Point {
        const DELTA: f32 = 0.0001;
        let t1 = (t - DELTA).max(0.0);
        let t2 = (t + DELTA).min(1.0);
        (self.point(t2) - self.point(t1)).normalized()
    }

    /// Unit tangent at arc-length fraction `u`.
    fn tangent_at(&self, u: f32) -> Self::Point {
        self.tangent(self.u_to_t(u))
    }

    /// `divisions + 1` points at evenly spaced `t`.
    fn points(&self, divisions: usize) -> Vec<Self::Point> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|d| self.point(d as f32 / divisions as f32))
            .collect()
    }

    /// `divisions + 1` points at evenly spaced arc length.
    fn spaced_points(&self, divisions: usize) -> Vec<Self::Point> {
        let divisions = divisions.max(1);
        let table = self.arc_lengths();
        (0..=divisions)
            .map(|d| self.point(table.u_to_t(d as f32 / divisions as f32)))
            .collect()
    }
}

impl<C: Curve + ?Sized> Curve for &C {
    type Point = C::Point;

    fn point(&self, t: f32) -> Self::Point {
        (**self).point(t)
    }

    fn arc_length_divisions(&self) -> usize {
        (**self).arc_length_divisions()
    }

    fn u_to_t(&self, u: f32) -> f32 {
        (**self).u_to_t(u)
    }

    fn point_at(&self, u: f32) -> Self::Point {
        (**self).point_at(u)
    }

    fn tangent(&self, t: f32) -> Self::Point {
        (**self).tangent(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_length_table_endpoints() {
        let curve = ParametricCurve::new(|t: f32| Vector3::new(10.0 * t * t, 0.0, 0.0));
        let table = curve.arc_lengths();
        assert_eq!(table.lengths().len(), DEFAULT_ARC_LENGTH_DIVISIONS + 1);
        assert!((table.total() - 10.0).abs() < 1e-3);
        assert_eq!(table.u_to_t(0.0), 0.0);
        assert_eq!(table.u_to_t(1.0), 1.0);
    }

    #[test]
    fn test_u_to_t_is_monotonic() {
        let curve = ParametricCurve::new(|t: f32| Vector3::new(10.0 * t * t, t, 0.0));
        let table = curve.arc_lengths();
        let mut previous = -1.0;
        for i in 0..=50 {
            let t = table.u_to_t(i as f32 / 50.0);
            assert!(t >= previous);
            previous = t;
        }
    }

    #[test]
    fn test_spaced_points_are_evenly_spaced() {
        // Speed grows with t, so evenly spaced t is not evenly spaced in length.
        let curve = ParametricCurve::new(|t: f32| Vector3::new(10.0 * t * t, 0.0, 0.0));
        let points = curve.spaced_points(10);
        assert_eq!(points.len(), 11);
        for pair in points.windows(2) {
            assert!((pair[0].distance_to(&pair[1]) - 1.0).abs() < 1e-2);
        }

        let raw = curve.points(10);
        assert!(raw[1].distance_to(&raw[0]) < 0.2);
    }

    #[test]
    fn test_tangent_of_straight_path() {
        let curve = ParametricCurve::new(|t: f32| Vector3::new(0.0, 3.0 * t, 0.0));
        for t in [0.0, 0.5, 1.0] {
            assert!(curve.tangent(t).approx_eq(&Vector3::UNIT_Y, 1e-3));
        }
        assert!(curve.tangent_at(0.3).approx_eq(&Vector3::UNIT_Y, 1e-3));
    }

    #[test]
    fn test_lengths_with_custom_divisions() {
        let curve = LineCurve3::new(Vector3::ZERO, Vector3::new(4.0, 0.0, 0.0));
        let lengths = curve.lengths(4);
        assert_eq!(lengths.len(), 5);
        for (i, l) in lengths.iter().enumerate() {
            assert!((l - i as f32).abs() < 1e-5);
        }
    }

    #[test]
    fn test_reference_is_a_curve() {
        let curve = LineCurve3::new(Vector3::ZERO, Vector3::new(0.0, 0.0, 2.0));
        let by_ref = &curve;
        assert!((by_ref.length() - 2.0).abs() < 1e-5);
    }
}
