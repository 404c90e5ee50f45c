//! Flat annulus and disc in the XY plane.

use super::MeshBuffer;
use crate::math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// An annulus (ring) in the XY plane, facing +Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingGeometry {
    /// Inner radius.
    pub inner_radius: f32,
    /// Outer radius.
    pub outer_radius: f32,
    /// Segments around the ring, at least 3.
    pub theta_segments: u32,
    /// Concentric bands between the radii, at least 1.
    pub phi_segments: u32,
    /// Start angle.
    pub theta_start: f32,
    /// Swept angle.
    pub theta_length: f32,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self::new(0.5, 1.0, 8, 1)
    }
}

impl RingGeometry {
    /// Create a full ring.
    pub fn new(inner_radius: f32, outer_radius: f32, theta_segments: u32, phi_segments: u32) -> Self {
        Self {
            inner_radius,
            outer_radius,
            theta_segments,
            phi_segments,
            theta_start: 0.0,
            theta_length: PI * 2.0,
        }
    }

    /// Sweep only part of the ring.
    pub fn with_theta(mut self, theta_start: f32, theta_length: f32) -> Self {
        self.theta_start = theta_start;
        self.theta_length = theta_length;
        self
    }

    fn segments(&self) -> (u32, u32) {
        (self.theta_segments.max(3), self.phi_segments.max(1))
    }

    /// Number of vertices [`build`](Self::build) produces.
    pub fn vertex_count(&self) -> usize {
        let (theta, phi) = self.segments();
        (theta as usize + 1) * (phi as usize + 1)
    }

    /// Number of indices [`build`](Self::build) produces.
    pub fn index_count(&self) -> usize {
        let (theta, phi) = self.segments();
        theta as usize * phi as usize * 6
    }

    /// Build the mesh.
    pub fn build(&self) -> MeshBuffer {
        let (theta_segments, phi_segments) = self.segments();
        let mut mesh = MeshBuffer::with_capacity(self.vertex_count(), self.index_count());

        let radius_step = (self.outer_radius - self.inner_radius) / phi_segments as f32;
        // UVs map the outer radius onto the unit square.
        let uv_scale = if self.outer_radius != 0.0 {
            1.0 / self.outer_radius
        } else {
            0.0
        };

        for j in 0..=phi_segments {
            let radius = self.inner_radius + j as f32 * radius_step;
            for i in 0..=theta_segments {
                let segment = self.theta_start + i as f32 / theta_segments as f32 * self.theta_length;
                let (sin, cos) = segment.sin_cos();
                let position = Vector3::new(radius * cos, radius * sin, 0.0);
                let uv = Vector2::new(
                    (position.x * uv_scale + 1.0) / 2.0,
                    (position.y * uv_scale + 1.0) / 2.0,
                );
                mesh.push_vertex(position, Vector3::UNIT_Z, uv);
            }
        }

        let row = theta_segments + 1;
        for j in 0..phi_segments {
            let level = j * row;
            for i in 0..theta_segments {
                let segment = i + level;
                let a = segment;
                let b = segment + row;
                let c = segment + row + 1;
                let d = segment + 1;

                mesh.push_triangle(a, b, c);
                mesh.push_triangle(a, c, d);
            }
        }

        debug_assert_eq!(mesh.vertex_count(), self.vertex_count());
        debug_assert_eq!(mesh.index_count(), self.index_count());
        log::debug!(
            "RingGeometry: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );
        mesh
    }
}

/// A disc in the XY plane built as a triangle fan, facing +Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleGeometry {
    /// Radius.
    pub radius: f32,
    /// Wedges, at least 3.
    pub segments: u32,
    /// Start angle.
    pub theta_start: f32,
    /// Swept angle.
    pub theta_length: f32,
}

impl Default for CircleGeometry {
    fn default() -> Self {
        Self::new(1.0, 8)
    }
}

impl CircleGeometry {
    /// Create a full disc.
    pub fn new(radius: f32, segments: u32) -> Self {
        Self {
            radius,
            segments,
            theta_start: 0.0,
            theta_length: PI * 2.0,
        }
    }

    /// Sweep only a sector.
    pub fn with_theta(mut self, theta_start: f32, theta_length: f32) -> Self {
        self.theta_start = theta_start;
        self.theta_length = theta_length;
        self
    }

    fn segment_count(&self) -> u32 {
        self.segments.max(3)
    }

    /// Number of vertices [`build`](Self::build) produces.
    pub fn vertex_count(&self) -> usize {
        self.segment_count() as usize + 2
    }

    /// Number of indices [`build`](Self::build) produces.
    pub fn index_count(&self) -> usize {
        self.segment_count() as usize * 3
    }

    /// Build the mesh.
    pub fn build(&self) -> MeshBuffer {
        let segments = self.segment_count();
        let mut mesh = MeshBuffer::with_capacity(self.vertex_count(), self.index_count());

        mesh.push_vertex(Vector3::ZERO, Vector3::UNIT_Z, Vector2::new(0.5, 0.5));
        for s in 0..=segments {
            let angle = self.theta_start + s as f32 / segments as f32 * self.theta_length;
            let (sin, cos) = angle.sin_cos();
            let position = Vector3::new(self.radius * cos, self.radius * sin, 0.0);
            // Unit disc UVs, independent of the radius.
            let uv = Vector2::new((cos + 1.0) / 2.0, (sin + 1.0) / 2.0);
            mesh.push_vertex(position, Vector3::UNIT_Z, uv);
        }

        for i in 1..=segments {
            mesh.push_triangle(i, i + 1, 0);
        }

        debug_assert_eq!(mesh.vertex_count(), self.vertex_count());
        debug_assert_eq!(mesh.index_count(), self.index_count());
        log::debug!(
            "CircleGeometry: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );
        mesh
    }
}
