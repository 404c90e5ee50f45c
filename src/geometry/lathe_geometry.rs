//! Lathe geometry: a 2D profile revolved around the Y axis.

use super::MeshBuffer;
use crate::curves::Curve;
use crate::math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Surface of revolution. Each profile point `(x, y)` sweeps a circle of
/// radius `x` at height `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatheGeometry {
    /// Profile, ordered bottom to top for outward-facing triangles.
    pub points: Vec<Vector2>,
    /// Steps around the axis, at least 1.
    pub segments: u32,
    /// Start angle.
    pub phi_start: f32,
    /// Swept angle, clamped to `[0, 2π]`.
    pub phi_length: f32,
}

impl Default for LatheGeometry {
    fn default() -> Self {
        Self::new(Vec::new(), 12)
    }
}

impl LatheGeometry {
    /// Revolve `points` a full turn in `segments` steps.
    pub fn new(points: Vec<Vector2>, segments: u32) -> Self {
        Self {
            points,
            segments,
            phi_start: 0.0,
            phi_length: PI * 2.0,
        }
    }

    /// Revolve a profile sampled from `curve` at `divisions + 1` points.
    pub fn from_curve<C>(curve: &C, divisions: usize, segments: u32) -> Self
    where
        C: Curve<Point = Vector2> + ?Sized,
    {
        Self::new(curve.points(divisions), segments)
    }

    /// Sweep only part of the revolution.
    pub fn with_phi(mut self, phi_start: f32, phi_length: f32) -> Self {
        self.phi_start = phi_start;
        self.phi_length = phi_length;
        self
    }

    fn segment_count(&self) -> u32 {
        self.segments.max(1)
    }

    fn sweep(&self) -> f32 {
        self.phi_length.clamp(0.0, PI * 2.0)
    }

    /// Number of vertices [`build`](Self::build) produces.
    pub fn vertex_count(&self) -> usize {
        if self.points.len() < 2 {
            return 0;
        }
        (self.segment_count() as usize + 1) * self.points.len()
    }

    /// Number of indices [`build`](Self::build) produces.
    pub fn index_count(&self) -> usize {
        if self.points.len() < 2 {
            return 0;
        }
        self.segment_count() as usize * (self.points.len() - 1) * 6
    }

    /// Build the mesh. Profiles with fewer than two points give an empty mesh.
    pub fn build(&self) -> MeshBuffer {
        let n = self.points.len();
        if n < 2 {
            log::warn!("LatheGeometry needs at least 2 profile points, got {}", n);
            return MeshBuffer::new();
        }

        let segments = self.segment_count();
        let phi_length = self.sweep();
        let inverse_segments = 1.0 / segments as f32;
        let inverse_point_length = 1.0 / (n - 1) as f32;
        let mut mesh = MeshBuffer::with_capacity(self.vertex_count(), self.index_count());

        for i in 0..=segments {
            let phi = self.phi_start + i as f32 * inverse_segments * phi_length;
            let (sin, cos) = phi.sin_cos();

            for (j, point) in self.points.iter().enumerate() {
                let position = Vector3::new(point.x * sin, point.y, point.x * cos);
                let uv = Vector2::new(i as f32 * inverse_segments, j as f32 * inverse_point_length);
                // Filled in from the faces below.
                mesh.push_vertex(position, Vector3::ZERO, uv);
            }
        }

        let n = n as u32;
        for i in 0..segments {
            for j in 0..n - 1 {
                let base = j + i * n;
                let a = base;
                let b = base + n;
                let c = base + n + 1;
                let d = base + 1;

                mesh.push_triangle(a, b, d);
                mesh.push_triangle(b, c, d);
            }
        }

        mesh.compute_vertex_normals();

        // A closed revolution shares its first and last ring; blend their
        // normals so the seam shades smoothly.
        if (phi_length - PI * 2.0).abs() < f32::EPSILON {
            let last_ring = (segments * n) as usize;
            for j in 0..n as usize {
                let blended = (mesh.normal(j) + mesh.normal(last_ring + j)).normalized();
                mesh.set_normal(j, &blended);
                mesh.set_normal(last_ring + j, &blended);
            }
        }

        debug_assert_eq!(mesh.vertex_count(), self.vertex_count());
        debug_assert_eq!(mesh.index_count(), self.index_count());
        log::debug!(
            "LatheGeometry: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::SplineCurve;

    fn tube_profile() -> Vec<Vector2> {
        vec![Vector2::new(1.0, -1.0), Vector2::new(1.0, 0.0), Vector2::new(1.0, 1.0)]
    }

    #[test]
    fn test_lathe_counts() {
        let mesh = LatheGeometry::new(tube_profile(), 8).build();
        assert_eq!(mesh.vertex_count(), 9 * 3);
        assert_eq!(mesh.index_count(), 8 * 2 * 6);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_straight_profile_gives_outward_normals() {
        let mesh = LatheGeometry::new(tube_profile(), 16).build();
        for i in 0..mesh.vertex_count() {
            let p = mesh.position(i);
            let radial = Vector3::new(p.x, 0.0, p.z).normalized();
            assert!(mesh.normal(i).dot(&radial) > 0.99, "vertex {i}");
        }
    }

    #[test]
    fn test_seam_normals_match() {
        let profile = vec![Vector2::new(0.5, 0.0), Vector2::new(1.0, 0.5), Vector2::new(0.2, 1.0)];
        let mesh = LatheGeometry::new(profile, 6).build();
        let last_ring = 6 * 3;
        for j in 0..3 {
            assert!(mesh.normal(j).approx_eq(&mesh.normal(last_ring + j), 1e-6));
        }
    }

    #[test]
    fn test_phi_length_clamped() {
        let mesh = LatheGeometry::new(tube_profile(), 4).with_phi(0.0, 10.0).build();
        // Clamped to a full turn, so the last ring lands on the first.
        assert!(mesh.position(4 * 3).approx_eq(&mesh.position(0), 1e-5));
    }

    #[test]
    fn test_short_profile_is_empty() {
        let mesh = LatheGeometry::new(vec![Vector2::new(1.0, 0.0)], 8).build();
        assert!(mesh.is_empty());
        assert_eq!(mesh.index_count(), 0);
    }

    #[test]
    fn test_from_curve() {
        let profile = SplineCurve::new(vec![
            Vector2::new(0.1, -1.0),
            Vector2::new(0.8, 0.0),
            Vector2::new(0.3, 1.0),
        ]);
        let geometry = LatheGeometry::from_curve(&profile, 10, 12);
        assert_eq!(geometry.points.len(), 11);
        let mesh = geometry.build();
        assert_eq!(mesh.vertex_count(), 13 * 11);
        assert!(mesh.validate().is_ok());
    }
}
