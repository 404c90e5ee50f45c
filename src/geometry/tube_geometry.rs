//! Tube geometry: a circle swept along a 3D curve.

use super::MeshBuffer;
use crate::curves::{Curve, FrenetFrames};
use crate::math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Radius profile along a tube, as a factor of the nominal radius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Taper {
    /// Constant radius.
    #[default]
    None,
    /// `sin(πu)`: zero at both ends, full radius in the middle.
    Sinusoidal,
}

impl Taper {
    /// Radius factor at arc-length fraction `u`, clamped to `[0, 1]`.
    pub fn factor(self, u: f32) -> f32 {
        let factor = match self {
            Taper::None => 1.0,
            Taper::Sinusoidal => (PI * u).sin(),
        };
        factor.clamp(0.0, 1.0)
    }
}

/// Tube parameters. The path is supplied to [`build`](TubeGeometry::build).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TubeGeometry {
    /// Rings along the path, at least 1.
    pub tubular_segments: u32,
    /// Tube radius.
    pub radius: f32,
    /// Segments around each ring, at least 3.
    pub radial_segments: u32,
    /// Join the last ring onto the first.
    pub closed: bool,
    /// Radius profile.
    pub taper: Taper,
}

impl Default for TubeGeometry {
    fn default() -> Self {
        Self::new(64, 1.0, 8, false)
    }
}

impl TubeGeometry {
    /// Create tube parameters.
    pub fn new(tubular_segments: u32, radius: f32, radial_segments: u32, closed: bool) -> Self {
        Self {
            tubular_segments,
            radius,
            radial_segments,
            closed,
            taper: Taper::None,
        }
    }

    /// Vary the radius along the path.
    pub fn with_taper(mut self, taper: Taper) -> Self {
        self.taper = taper;
        self
    }

    fn segments(&self) -> (u32, u32) {
        (self.tubular_segments.max(1), self.radial_segments.max(3))
    }

    /// Number of vertices [`build`](Self::build) produces.
    pub fn vertex_count(&self) -> usize {
        let (tubular, radial) = self.segments();
        (tubular as usize + 1) * (radial as usize + 1)
    }

    /// Number of indices [`build`](Self::build) produces.
    pub fn index_count(&self) -> usize {
        let (tubular, radial) = self.segments();
        tubular as usize * radial as usize * 6
    }

    /// Frames the tube is oriented by, one per ring.
    pub fn frames<C>(&self, path: &C) -> FrenetFrames
    where
        C: Curve<Point = Vector3> + ?Sized,
    {
        let (tubular, _) = self.segments();
        FrenetFrames::compute(path, tubular as usize, self.closed)
    }

    /// Sweep the cross-section along `path`.
    pub fn build<C>(&self, path: &C) -> MeshBuffer
    where
        C: Curve<Point = Vector3> + ?Sized,
    {
        let (tubular_segments, radial_segments) = self.segments();
        let frames = self.frames(path);
        let centers = path.spaced_points(tubular_segments as usize);
        let mut mesh = MeshBuffer::with_capacity(self.vertex_count(), self.index_count());

        for i in 0..=tubular_segments {
            // A closed tube repeats its first ring so the seam has its own UVs.
            let ring = if self.closed && i == tubular_segments { 0 } else { i as usize };
            let u = i as f32 / tubular_segments as f32;
            let center = centers[ring];
            let normal = frames.normals[ring];
            let binormal = frames.binormals[ring];
            let radius = self.radius * self.taper.factor(u);

            for j in 0..=radial_segments {
                let v = j as f32 / radial_segments as f32 * PI * 2.0;
                let (sin, cos) = v.sin_cos();
                let direction = normal * (-cos) + binormal * sin;

                let uv = Vector2::new(u, j as f32 / radial_segments as f32);
                mesh.push_vertex(center + direction * radius, direction.normalized(), uv);
            }
        }

        let row = radial_segments + 1;
        for i in 1..=tubular_segments {
            for j in 1..=radial_segments {
                let a = row * (i - 1) + (j - 1);
                let b = row * i + (j - 1);
                let c = row * i + j;
                let d = row * (i - 1) + j;

                mesh.push_triangle(a, b, d);
                mesh.push_triangle(b, c, d);
            }
        }

        debug_assert_eq!(mesh.vertex_count(), self.vertex_count());
        debug_assert_eq!(mesh.index_count(), self.index_count());
        log::debug!(
            "TubeGeometry: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{CatmullRomCurve3, LineCurve3, ParametricCurve};

    fn straight() -> LineCurve3 {
        LineCurve3::new(Vector3::ZERO, Vector3::new(0.0, 0.0, 10.0))
    }

    #[test]
    fn test_tube_counts() {
        let tube = TubeGeometry::new(10, 0.5, 6, false);
        let mesh = tube.build(&straight());
        assert_eq!(mesh.vertex_count(), 11 * 7);
        assert_eq!(mesh.index_count(), 10 * 6 * 6);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_straight_tube_radius() {
        let mesh = TubeGeometry::new(4, 0.5, 8, false).build(&straight());
        for i in 0..mesh.vertex_count() {
            let p = mesh.position(i);
            let axis = Vector3::new(0.0, 0.0, p.z);
            assert!((p.distance_to(&axis) - 0.5).abs() < 1e-4, "vertex {i}");
            assert!(mesh.normal(i).approx_eq(&(p - axis).normalized(), 1e-4));
        }
    }

    #[test]
    fn test_rings_evenly_spaced() {
        let mesh = TubeGeometry::new(5, 0.1, 3, false).build(&straight());
        for i in 0..=5 {
            let z = mesh.position(i * 4).z;
            assert!((z - i as f32 * 2.0).abs() < 1e-3, "ring {i} at {z}");
        }
    }

    #[test]
    fn test_faces_point_outward() {
        let path = CatmullRomCurve3::new(vec![
            Vector3::new(-2.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 1.0),
            Vector3::new(2.0, 0.0, 0.0),
        ]);
        let mesh = TubeGeometry::new(16, 0.2, 8, false).build(&path);
        for t in 0..mesh.triangle_count() {
            let a = mesh.indices[t * 3] as usize;
            let face = mesh.triangle(t).normal();
            assert!(face.dot(&mesh.normal(a)) > 0.0, "triangle {t}");
        }
    }

    #[test]
    fn test_sinusoidal_taper_pinches_ends() {
        let mesh = TubeGeometry::new(8, 1.0, 4, false)
            .with_taper(Taper::Sinusoidal)
            .build(&straight());
        assert!(mesh.position(0).approx_eq(&Vector3::ZERO, 1e-5));
        let mid = mesh.position(4 * 5);
        assert!((Vector3::new(mid.x, mid.y, 0.0).length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_taper_factor_clamped() {
        assert_eq!(Taper::None.factor(0.3), 1.0);
        assert_eq!(Taper::Sinusoidal.factor(1.5), 0.0);
        assert!((Taper::Sinusoidal.factor(0.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_closed_tube_seam() {
        let circle = ParametricCurve::new(|t: f32| {
            let a = t * PI * 2.0;
            Vector3::new(5.0 * a.cos(), 5.0 * a.sin(), 0.0)
        });
        let mesh = TubeGeometry::new(32, 0.5, 6, true).build(&circle);
        let last_ring = 32 * 7;
        for j in 0..7 {
            assert_eq!(mesh.position(j), mesh.position(last_ring + j));
            assert_eq!(mesh.uv(last_ring + j).x, 1.0);
        }
    }

    #[test]
    fn test_frames_match_rings() {
        let tube = TubeGeometry::new(12, 0.5, 6, false);
        let frames = tube.frames(&straight());
        assert_eq!(frames.len(), 13);
    }
}
