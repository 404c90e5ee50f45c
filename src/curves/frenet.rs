//! Rotation-minimizing frames along a space curve.

use super::Curve;
use crate::math::{Matrix4, Vector3};

/// Tangent, normal and binormal sampled at `segments + 1` evenly spaced
/// arc-length positions along a curve.
///
/// Normals are carried from one sample to the next by the smallest rotation
/// that maps the previous tangent onto the current one, so the frame does not
/// spin around the curve the way a true Frenet frame does at inflections.
#[derive(Debug, Clone, PartialEq)]
pub struct FrenetFrames {
    /// Unit tangents.
    pub tangents: Vec<Vector3>,
    /// Unit normals.
    pub normals: Vec<Vector3>,
    /// Unit binormals (`tangent × normal`).
    pub binormals: Vec<Vector3>,
}

impl FrenetFrames {
    /// Compute frames for `path` at `segments + 1` samples.
    ///
    /// With `closed` the accumulated twist between the first and last normal is
    /// spread evenly over the samples so the ends line up.
    pub fn compute<C>(path: &C, segments: usize, closed: bool) -> Self
    where
        C: Curve<Point = Vector3> + ?Sized,
    {
        const EPSILON: f32 = 0.0001;
        let segments = segments.max(1);
        let table = path.arc_lengths();

        let tangents: Vec<Vector3> = (0..=segments)
            .map(|i| {
                let u = i as f32 / segments as f32;
                path.tangent(table.u_to_t(u)).normalized()
            })
            .collect();

        let mut normals = Vec::with_capacity(segments + 1);
        let mut binormals = Vec::with_capacity(segments + 1);

        let (n0, b0) = initial_normal(&tangents[0]);
        normals.push(n0);
        binormals.push(b0);

        for i in 1..=segments {
            let mut normal = normals[i - 1];
            let axis = tangents[i - 1].cross(&tangents[i]);
            if axis.length() > EPSILON {
                let theta = tangents[i - 1].dot(&tangents[i]).clamp(-1.0, 1.0).acos();
                normal = Matrix4::from_axis_angle(&axis.normalized(), theta).transform_direction(&normal);
            }
            binormals.push(tangents[i].cross(&normal));
            normals.push(normal);
        }

        if closed {
            let first = normals[0];
            let last = normals[segments];
            let mut theta = first.dot(&last).clamp(-1.0, 1.0).acos() / segments as f32;
            if tangents[0].dot(&first.cross(&last)) > 0.0 {
                theta = -theta;
            }

            for i in 1..=segments {
                normals[i] = Matrix4::from_axis_angle(&tangents[i], theta * i as f32)
                    .transform_direction(&normals[i]);
                binormals[i] = tangents[i].cross(&normals[i]);
            }
        }

        Self {
            tangents,
            normals,
            binormals,
        }
    }

    /// Number of sampled frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.tangents.len()
    }

    /// Whether no frames were sampled.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tangents.is_empty()
    }

    /// `(tangent, normal, binormal)` of frame `i`.
    pub fn frame(&self, i: usize) -> Option<(Vector3, Vector3, Vector3)> {
        Some((
            *self.tangents.get(i)?,
            *self.normals.get(i)?,
            *self.binormals.get(i)?,
        ))
    }
}

/// Normal and binormal for the first tangent, built against the world axis
/// the tangent is least aligned with.
fn initial_normal(tangent: &Vector3) -> (Vector3, Vector3) {
    let (tx, ty, tz) = (tangent.x.abs(), tangent.y.abs(), tangent.z.abs());
    let mut smallest = f32::MAX;
    let mut axis = Vector3::UNIT_X;
    if tx <= smallest {
        smallest = tx;
        axis = Vector3::UNIT_X;
    }
    if ty <= smallest {
        smallest = ty;
        axis = Vector3::UNIT_Y;
    }
    if tz <= smallest {
        axis = Vector3::UNIT_Z;
    }

    let side = tangent.cross(&axis).normalized();
    let normal = tangent.cross(&side);
    let binormal = tangent.cross(&normal);
    (normal, binormal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{CatmullRomCurve3, LineCurve3, ParametricCurve};
    use std::f32::consts::PI;

    fn assert_orthonormal(frames: &FrenetFrames, epsilon: f32) {
        for i in 0..frames.len() {
            let (t, n, b) = frames.frame(i).unwrap();
            assert!((t.length() - 1.0).abs() < epsilon, "tangent {i}");
            assert!((n.length() - 1.0).abs() < epsilon, "normal {i}");
            assert!((b.length() - 1.0).abs() < epsilon, "binormal {i}");
            assert!(t.dot(&n).abs() < epsilon, "t.n {i}");
            assert!(t.dot(&b).abs() < epsilon, "t.b {i}");
            assert!(n.dot(&b).abs() < epsilon, "n.b {i}");
        }
    }

    #[test]
    fn test_straight_line_frames() {
        let line = LineCurve3::new(Vector3::ZERO, Vector3::new(0.0, 0.0, 5.0));
        let frames = FrenetFrames::compute(&line, 8, false);
        assert_eq!(frames.len(), 9);
        assert_orthonormal(&frames, 1e-5);
        // No rotation along a straight path.
        for n in &frames.normals {
            assert!(n.approx_eq(&frames.normals[0], 1e-6));
        }
    }

    #[test]
    fn test_helix_frames_orthonormal() {
        let helix = ParametricCurve::new(|t: f32| {
            let a = t * 4.0 * PI;
            Vector3::new(a.cos(), t * 3.0, a.sin())
        });
        let frames = FrenetFrames::compute(&helix, 64, false);
        assert_orthonormal(&frames, 1e-3);
    }

    #[test]
    fn test_closed_frames_line_up() {
        let loop_curve = CatmullRomCurve3::new(vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.5, 1.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, -0.5, -1.0),
        ])
        .with_closed(true);
        let frames = FrenetFrames::compute(&loop_curve, 40, true);
        assert_orthonormal(&frames, 1e-3);
        let first = frames.normals[0];
        let last = frames.normals[40];
        assert!(first.dot(&last) > 0.99, "{first:?} vs {last:?}");
    }

    #[test]
    fn test_initial_normal_prefers_least_aligned_axis() {
        // Ties on x and z resolve to z, so the side vector is +X.
        let (n, b) = initial_normal(&Vector3::UNIT_Y);
        assert!(n.approx_eq(&Vector3::new(0.0, 0.0, -1.0), 1e-6));
        assert!(b.approx_eq(&Vector3::new(-1.0, 0.0, 0.0), 1e-6));
    }
}
