//! Torus geometry.

use super::MeshBuffer;
use crate::math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// A torus (donut) lying in the XY plane, its hole along Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusGeometry {
    /// Major radius (distance from center to tube center).
    pub radius: f32,
    /// Tube radius.
    pub tube: f32,
    /// Segments around the tube cross-section, at least 3.
    pub radial_segments: u32,
    /// Segments along the ring, at least 3.
    pub tubular_segments: u32,
    /// Arc angle swept by the ring.
    pub arc: f32,
}

impl Default for TorusGeometry {
    fn default() -> Self {
        Self::new(1.0, 0.4, 8, 6)
    }
}

impl TorusGeometry {
    /// Create a new torus geometry.
    pub fn new(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        Self {
            radius,
            tube,
            radial_segments,
            tubular_segments,
            arc: PI * 2.0,
        }
    }

    /// Sweep only `arc` radians of the ring.
    pub fn with_arc(mut self, arc: f32) -> Self {
        self.arc = arc;
        self
    }

    fn segments(&self) -> (u32, u32) {
        (self.radial_segments.max(3), self.tubular_segments.max(3))
    }

    /// Number of vertices [`build`](Self::build) produces.
    pub fn vertex_count(&self) -> usize {
        let (radial, tubular) = self.segments();
        (radial as usize + 1) * (tubular as usize + 1)
    }

    /// Number of indices [`build`](Self::build) produces.
    pub fn index_count(&self) -> usize {
        let (radial, tubular) = self.segments();
        radial as usize * tubular as usize * 6
    }

    /// Build the mesh.
    pub fn build(&self) -> MeshBuffer {
        let (radial_segments, tubular_segments) = self.segments();
        let mut mesh = MeshBuffer::with_capacity(self.vertex_count(), self.index_count());

        for j in 0..=radial_segments {
            for i in 0..=tubular_segments {
                let u = i as f32 / tubular_segments as f32 * self.arc;
                let v = j as f32 / radial_segments as f32 * PI * 2.0;

                let ring = self.radius + self.tube * v.cos();
                let position = Vector3::new(ring * u.cos(), ring * u.sin(), self.tube * v.sin());

                // Direction from the tube center; independent of the tube radius.
                let normal = Vector3::new(v.cos() * u.cos(), v.cos() * u.sin(), v.sin());

                let uv = Vector2::new(
                    i as f32 / tubular_segments as f32,
                    j as f32 / radial_segments as f32,
                );
                mesh.push_vertex(position, normal, uv);
            }
        }

        let row = tubular_segments + 1;
        for j in 1..=radial_segments {
            for i in 1..=tubular_segments {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;

                mesh.push_triangle(a, b, d);
                mesh.push_triangle(b, c, d);
            }
        }

        debug_assert_eq!(mesh.vertex_count(), self.vertex_count());
        debug_assert_eq!(mesh.index_count(), self.index_count());
        log::debug!(
            "TorusGeometry: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );
        mesh
    }
}
