//! Cylinder geometry.

use super::MeshBuffer;
use crate::math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// A cylinder or truncated cone along the Y axis, centered on the origin.
///
/// Material groups: torso 0, top cap 1, bottom cap 2. A cap is only built when
/// the cylinder is closed and that end has a positive radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderGeometry {
    /// Top radius.
    pub radius_top: f32,
    /// Bottom radius.
    pub radius_bottom: f32,
    /// Height.
    pub height: f32,
    /// Radial segments, at least 3.
    pub radial_segments: u32,
    /// Height segments, at least 1.
    pub height_segments: u32,
    /// Open ended (no caps).
    pub open_ended: bool,
    /// Theta start angle.
    pub theta_start: f32,
    /// Theta length.
    pub theta_length: f32,
}

impl Default for CylinderGeometry {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 8, 1)
    }
}

impl CylinderGeometry {
    /// Create a new cylinder geometry.
    pub fn new(
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
        height_segments: u32,
    ) -> Self {
        Self {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            height_segments,
            open_ended: false,
            theta_start: 0.0,
            theta_length: PI * 2.0,
        }
    }

    /// Create a cone (cylinder with top radius = 0).
    pub fn cone(radius: f32, height: f32, radial_segments: u32, height_segments: u32) -> Self {
        Self::new(0.0, radius, height, radial_segments, height_segments)
    }

    /// Set open ended.
    pub fn with_open_ended(mut self, open_ended: bool) -> Self {
        self.open_ended = open_ended;
        self
    }

    /// Restrict the sweep around the Y axis.
    pub fn with_theta(mut self, theta_start: f32, theta_length: f32) -> Self {
        self.theta_start = theta_start;
        self.theta_length = theta_length;
        self
    }

    fn segments(&self) -> (u32, u32) {
        (self.radial_segments.max(3), self.height_segments.max(1))
    }

    fn has_top_cap(&self) -> bool {
        !self.open_ended && self.radius_top > 0.0
    }

    fn has_bottom_cap(&self) -> bool {
        !self.open_ended && self.radius_bottom > 0.0
    }

    fn cap_count(&self) -> usize {
        self.has_top_cap() as usize + self.has_bottom_cap() as usize
    }

    /// Number of vertices [`build`](Self::build) produces.
    pub fn vertex_count(&self) -> usize {
        let (radial, rows) = self.segments();
        let (radial, rows) = (radial as usize, rows as usize);
        // Each cap: one center per wedge plus the rim.
        (radial + 1) * (rows + 1) + self.cap_count() * (2 * radial + 1)
    }

    /// Number of indices [`build`](Self::build) produces.
    pub fn index_count(&self) -> usize {
        let (radial, rows) = self.segments();
        let (radial, rows) = (radial as usize, rows as usize);
        radial * rows * 6 + self.cap_count() * radial * 3
    }

    /// Build the mesh.
    pub fn build(&self) -> MeshBuffer {
        let mut mesh = MeshBuffer::with_capacity(self.vertex_count(), self.index_count());

        self.generate_torso(&mut mesh);
        if self.has_top_cap() {
            self.generate_cap(&mut mesh, true);
        }
        if self.has_bottom_cap() {
            self.generate_cap(&mut mesh, false);
        }

        debug_assert_eq!(mesh.vertex_count(), self.vertex_count());
        debug_assert_eq!(mesh.index_count(), self.index_count());
        log::debug!(
            "CylinderGeometry: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );
        mesh
    }

    fn generate_torso(&self, mesh: &mut MeshBuffer) {
        let (radial_segments, height_segments) = self.segments();
        let half_height = self.height / 2.0;
        let vertex_offset = mesh.vertex_count() as u32;
        let group_start = mesh.index_count();

        // Normal tilt follows the slope of the side.
        let slope = if self.height != 0.0 {
            (self.radius_bottom - self.radius_top) / self.height
        } else {
            0.0
        };

        for y in 0..=height_segments {
            let v = y as f32 / height_segments as f32;
            let radius = v * (self.radius_bottom - self.radius_top) + self.radius_top;

            for x in 0..=radial_segments {
                let u = x as f32 / radial_segments as f32;
                let theta = u * self.theta_length + self.theta_start;
                let (sin, cos) = theta.sin_cos();

                let position = Vector3::new(radius * sin, -v * self.height + half_height, radius * cos);
                let normal = Vector3::new(sin, slope, cos).normalized();
                mesh.push_vertex(position, normal, Vector2::new(u, 1.0 - v));
            }
        }

        let row = radial_segments + 1;
        for x in 0..radial_segments {
            for y in 0..height_segments {
                let i1 = vertex_offset + y * row + x;
                let i2 = vertex_offset + (y + 1) * row + x;
                let i3 = vertex_offset + (y + 1) * row + x + 1;
                let i4 = vertex_offset + y * row + x + 1;

                mesh.push_triangle(i1, i2, i4);
                mesh.push_triangle(i2, i3, i4);
            }
        }

        mesh.add_group(group_start, mesh.index_count() - group_start, 0);
    }

    fn generate_cap(&self, mesh: &mut MeshBuffer, top: bool) {
        let (radial_segments, _) = self.segments();
        let half_height = self.height / 2.0;
        let (radius, sign) = if top {
            (self.radius_top, 1.0)
        } else {
            (self.radius_bottom, -1.0)
        };
        let normal = Vector3::new(0.0, sign, 0.0);
        let group_start = mesh.index_count();

        // One center vertex per wedge so each wedge can carry its own UV.
        let center_start = mesh.vertex_count() as u32;
        for x in 1..=radial_segments {
            let uv = if top {
                Vector2::new(x as f32 / radial_segments as f32, 0.0)
            } else {
                Vector2::new((x - 1) as f32 / radial_segments as f32, 1.0)
            };
            mesh.push_vertex(Vector3::new(0.0, half_height * sign, 0.0), normal, uv);
        }

        let rim_start = mesh.vertex_count() as u32;
        for x in 0..=radial_segments {
            let u = x as f32 / radial_segments as f32;
            let theta = u * self.theta_length + self.theta_start;
            let (sin, cos) = theta.sin_cos();
            let position = Vector3::new(radius * sin, half_height * sign, radius * cos);
            mesh.push_vertex(position, normal, Vector2::new(u, if top { 1.0 } else { 0.0 }));
        }

        for x in 0..radial_segments {
            let c = center_start + x;
            let i = rim_start + x;
            if top {
                mesh.push_triangle(i, i + 1, c);
            } else {
                mesh.push_triangle(i + 1, i, c);
            }
        }

        let material_index = if top { 1 } else { 2 };
        mesh.add_group(group_start, mesh.index_count() - group_start, material_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_cylinder_counts() {
        let mesh = CylinderGeometry::new(1.0, 1.0, 2.0, 8, 2).build();
        assert_eq!(mesh.vertex_count(), 9 * 3 + 2 * 17);
        assert_eq!(mesh.index_count(), 8 * 2 * 6 + 2 * 8 * 3);
        assert_eq!(mesh.groups.len(), 3);
        let materials: Vec<usize> = mesh.groups.iter().map(|g| g.material_index).collect();
        assert_eq!(materials, vec![0, 1, 2]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_open_ended_has_only_torso() {
        let mesh = CylinderGeometry::new(1.0, 1.0, 1.0, 6, 1).with_open_ended(true).build();
        assert_eq!(mesh.vertex_count(), 7 * 2);
        assert_eq!(mesh.groups.len(), 1);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_cone_skips_top_cap() {
        let mesh = CylinderGeometry::cone(1.0, 2.0, 8, 1).build();
        assert_eq!(mesh.groups.len(), 2);
        assert_eq!(mesh.groups[1].material_index, 2);
        assert!(mesh.validate().is_ok());
        for i in 0..mesh.vertex_count() {
            assert!((mesh.normal(i).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cone_normals_tilt_up() {
        let mesh = CylinderGeometry::cone(1.0, 1.0, 8, 1).build();
        // Slope 1: torso normals lean 45 degrees toward +Y.
        for i in 0..9 {
            let n = mesh.normal(i);
            assert!((n.y - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
        }
    }

    #[test]
    fn test_caps_face_outward() {
        let mesh = CylinderGeometry::new(1.0, 1.0, 2.0, 8, 1).build();
        for group in &mesh.groups[1..] {
            for t in group.start / 3..group.end() / 3 {
                let tri = mesh.triangle(t);
                let a = mesh.indices[t * 3] as usize;
                assert!(tri.normal().dot(&mesh.normal(a)) > 0.99);
            }
        }
    }

    #[test]
    fn test_torso_winding_faces_outward() {
        let mesh = CylinderGeometry::new(1.0, 1.0, 2.0, 8, 1).build();
        let torso = mesh.groups[0];
        for t in torso.start / 3..torso.end() / 3 {
            let tri = mesh.triangle(t);
            let centroid = tri.centroid();
            let outward = Vector3::new(centroid.x, 0.0, centroid.z);
            assert!(tri.normal().dot(&outward) > 0.0);
        }
    }

    #[test]
    fn test_flat_cylinder_normals_are_finite() {
        let mesh = CylinderGeometry::new(1.0, 2.0, 0.0, 8, 1).build();
        for i in 0..mesh.vertex_count() {
            assert!(mesh.normal(i).x.is_finite());
        }
    }
}
