//! Sphere geometry.

use super::MeshBuffer;
use crate::math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// A UV sphere, optionally cut to a range of longitude (`phi`) and latitude
/// (`theta`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereGeometry {
    /// Radius.
    pub radius: f32,
    /// Width segments (longitude), at least 3.
    pub width_segments: u32,
    /// Height segments (latitude), at least 2.
    pub height_segments: u32,
    /// Phi start angle (horizontal).
    pub phi_start: f32,
    /// Phi length.
    pub phi_length: f32,
    /// Theta start angle (vertical).
    pub theta_start: f32,
    /// Theta length.
    pub theta_length: f32,
}

impl Default for SphereGeometry {
    fn default() -> Self {
        Self::new(1.0, 8, 6)
    }
}

impl SphereGeometry {
    /// Create a full sphere.
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments,
            height_segments,
            phi_start: 0.0,
            phi_length: PI * 2.0,
            theta_start: 0.0,
            theta_length: PI,
        }
    }

    /// Restrict the longitude range.
    pub fn with_phi(mut self, phi_start: f32, phi_length: f32) -> Self {
        self.phi_start = phi_start;
        self.phi_length = phi_length;
        self
    }

    /// Restrict the latitude range.
    pub fn with_theta(mut self, theta_start: f32, theta_length: f32) -> Self {
        self.theta_start = theta_start;
        self.theta_length = theta_length;
        self
    }

    fn segments(&self) -> (u32, u32) {
        (self.width_segments.max(3), self.height_segments.max(2))
    }

    fn theta_end(&self) -> f32 {
        self.theta_start + self.theta_length
    }

    /// Number of vertices [`build`](Self::build) produces.
    pub fn vertex_count(&self) -> usize {
        let (w, h) = self.segments();
        (w as usize + 1) * (h as usize + 1)
    }

    /// Number of indices [`build`](Self::build) produces.
    ///
    /// The first row loses one triangle per quad when it touches the north
    /// pole, the last row likewise at the south pole.
    pub fn index_count(&self) -> usize {
        let (w, h) = self.segments();
        let mut triangles = 2 * w as usize * h as usize;
        if self.theta_start <= 0.0 {
            triangles -= w as usize;
        }
        if self.theta_end() >= PI {
            triangles -= w as usize;
        }
        triangles * 3
    }

    /// Build the mesh.
    pub fn build(&self) -> MeshBuffer {
        let (width_segments, height_segments) = self.segments();
        let theta_end = self.theta_end();
        let mut mesh = MeshBuffer::with_capacity(self.vertex_count(), self.index_count());

        let row = width_segments + 1;
        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let theta = self.theta_start + v * self.theta_length;

            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = self.phi_start + u * self.phi_length;

                let position = Vector3::new(
                    -self.radius * phi.cos() * theta.sin(),
                    self.radius * theta.cos(),
                    self.radius * phi.sin() * theta.sin(),
                );
                // Unit direction even when the radius is zero.
                let normal = Vector3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());

                mesh.push_vertex(position, normal.normalized(), Vector2::new(u, 1.0 - v));
            }
        }

        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let v1 = iy * row + ix + 1;
                let v2 = iy * row + ix;
                let v3 = (iy + 1) * row + ix;
                let v4 = (iy + 1) * row + ix + 1;

                // Skip the zero-area triangle that touches a pole.
                if iy != 0 || self.theta_start > 0.0 {
                    mesh.push_triangle(v1, v2, v4);
                }
                if iy != height_segments - 1 || theta_end < PI {
                    mesh.push_triangle(v2, v3, v4);
                }
            }
        }

        debug_assert_eq!(mesh.vertex_count(), self.vertex_count());
        debug_assert_eq!(mesh.index_count(), self.index_count());
        log::debug!(
            "SphereGeometry: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );
        mesh
    }
}
