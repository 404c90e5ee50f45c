//! Torus knot geometry.

use super::MeshBuffer;
use crate::curves::FrenetFrames;
use crate::math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Look-ahead used to build the frame at each knot sample.
const FRAME_STEP: f32 = 0.01;

/// A tube swept along a `(p, q)` torus knot.
///
/// The knot winds `p` times around the axis of rotational symmetry and `q`
/// times around the interior circle of the torus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusKnotGeometry {
    /// Radius of the underlying torus.
    pub radius: f32,
    /// Tube radius.
    pub tube: f32,
    /// Samples along the knot, at least 3.
    pub tubular_segments: u32,
    /// Segments around the tube cross-section, at least 3.
    pub radial_segments: u32,
    /// Windings around the symmetry axis.
    pub p: u32,
    /// Windings around the torus interior.
    pub q: u32,
}

impl Default for TorusKnotGeometry {
    fn default() -> Self {
        Self::new(1.0, 0.4, 64, 8, 2, 3)
    }
}

impl TorusKnotGeometry {
    /// Create a new torus knot geometry.
    pub fn new(radius: f32, tube: f32, tubular_segments: u32, radial_segments: u32, p: u32, q: u32) -> Self {
        Self {
            radius,
            tube,
            tubular_segments,
            radial_segments,
            p,
            q,
        }
    }

    fn segments(&self) -> (u32, u32) {
        (self.tubular_segments.max(3), self.radial_segments.max(3))
    }

    // p = 0 would divide by zero in q / p.
    fn windings(&self) -> (f32, f32) {
        (self.p.max(1) as f32, self.q as f32)
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

    /// Point on the knot at curve angle `u`.
    pub fn position_on_curve(&self, u: f32) -> Vector3 {
        let (p, q) = self.windings();
        let qu_over_p = q / p * u;
        let (su, cu) = u.sin_cos();
        let cs = qu_over_p.cos();
        Vector3::new(
            self.radius * (2.0 + cs) * 0.5 * cu,
            self.radius * (2.0 + cs) * su * 0.5,
            self.radius * qu_over_p.sin() * 0.5,
        )
    }

    /// Curve angle of sample `i`.
    fn sample_angle(&self, i: u32) -> f32 {
        let (tubular, _) = self.segments();
        let (p, _) = self.windings();
        i as f32 / tubular as f32 * p * PI * 2.0
    }

    /// Center and `(T, N, B)` frame at curve angle `u`.
    ///
    /// `T` points a small step ahead along the knot. `N` is made orthogonal to
    /// `T` from the sum of the two nearby points, which leans away from the
    /// origin, and `B = T × N`.
    fn frame_at(&self, u: f32) -> (Vector3, Vector3, Vector3, Vector3) {
        let p1 = self.position_on_curve(u);
        let p2 = self.position_on_curve(u + FRAME_STEP);

        let t = p2 - p1;
        let b = t.cross(&(p2 + p1));
        let n = b.cross(&t);
        (p1, t.normalized(), n.normalized(), b.normalized())
    }

    /// The frames used to orient the tube, one per knot sample.
    pub fn frames(&self) -> FrenetFrames {
        let (tubular, _) = self.segments();
        let count = tubular as usize + 1;
        let mut frames = FrenetFrames {
            tangents: Vec::with_capacity(count),
            normals: Vec::with_capacity(count),
            binormals: Vec::with_capacity(count),
        };
        for i in 0..=tubular {
            let (_, t, n, b) = self.frame_at(self.sample_angle(i));
            frames.tangents.push(t);
            frames.normals.push(n);
            frames.binormals.push(b);
        }
        frames
    }

    /// Build the mesh.
    pub fn build(&self) -> MeshBuffer {
        let (tubular_segments, radial_segments) = self.segments();
        let mut mesh = MeshBuffer::with_capacity(self.vertex_count(), self.index_count());

        for i in 0..=tubular_segments {
            let (center, _, n, b) = self.frame_at(self.sample_angle(i));

            for j in 0..=radial_segments {
                let v = j as f32 / radial_segments as f32 * PI * 2.0;
                let (sin, cos) = v.sin_cos();
                let offset = n * (-cos) + b * sin;

                let uv = Vector2::new(
                    i as f32 / tubular_segments as f32,
                    j as f32 / radial_segments as f32,
                );
                mesh.push_vertex(center + offset * self.tube, offset.normalized(), uv);
            }
        }

        let row = radial_segments + 1;
        for j in 1..=tubular_segments {
            for i in 1..=radial_segments {
                let a = row * (j - 1) + (i - 1);
                let b = row * j + (i - 1);
                let c = row * j + i;
                let d = row * (j - 1) + i;

                mesh.push_triangle(a, b, d);
                mesh.push_triangle(b, c, d);
            }
        }

        debug_assert_eq!(mesh.vertex_count(), self.vertex_count());
        debug_assert_eq!(mesh.index_count(), self.index_count());
        log::debug!(
            "TorusKnotGeometry: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knot_counts() {
        let mesh = TorusKnotGeometry::new(10.0, 3.0, 64, 8, 2, 3).build();
        assert_eq!(mesh.vertex_count(), 65 * 9);
        assert_eq!(mesh.index_count(), 64 * 8 * 6);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_frames_orthonormal() {
        let frames = TorusKnotGeometry::new(10.0, 3.0, 64, 8, 2, 3).frames();
        assert_eq!(frames.len(), 65);
        for i in 0..frames.len() {
            let (t, n, b) = frames.frame(i).unwrap();
            assert!(t.dot(&n).abs() < 1e-3, "T.N at {i}");
            assert!(t.dot(&b).abs() < 1e-3, "T.B at {i}");
            assert!(n.dot(&b).abs() < 1e-3, "N.B at {i}");
        }
    }

    #[test]
    fn test_vertices_at_tube_distance() {
        let geometry = TorusKnotGeometry::new(10.0, 3.0, 32, 6, 3, 4);
        let mesh = geometry.build();
        let row = 7;
        for i in 0..=32u32 {
            let center = geometry.position_on_curve(geometry.sample_angle(i));
            for j in 0..row {
                let p = mesh.position(i as usize * row + j);
                assert!((p.distance_to(&center) - 3.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_closed_knot_ends_meet() {
        let mesh = TorusKnotGeometry::default().build();
        let last_ring = (64 * 9) as usize;
        for j in 0..9 {
            assert!(mesh.position(j).approx_eq(&mesh.position(last_ring + j), 1e-3));
        }
    }

    #[test]
    fn test_zero_p_does_not_produce_nan() {
        let mesh = TorusKnotGeometry::new(1.0, 0.2, 8, 3, 0, 3).build();
        assert!(mesh.positions.iter().all(|x| x.is_finite()));
    }
}
