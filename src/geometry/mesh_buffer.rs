//! Flat vertex/index arrays produced by the generators.

use super::{PositionVertex, Vertex};
use crate::error::{KernelError, Result};
use crate::math::{Box3, Matrix3, Matrix4, Sphere, Triangle, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// A contiguous index range drawn with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryGroup {
    /// First index of the range.
    pub start: usize,
    /// Number of indices in the range.
    pub count: usize,
    /// Material slot used for the range.
    pub material_index: usize,
}

impl GeometryGroup {
    /// Create a group.
    #[inline]
    pub const fn new(start: usize, count: usize, material_index: usize) -> Self {
        Self {
            start,
            count,
            material_index,
        }
    }

    /// One past the last index of the range.
    #[inline]
    pub const fn end(&self) -> usize {
        self.start + self.count
    }
}

/// Indexed triangle mesh laid out for direct upload.
///
/// Attributes are stored unpacked: `positions` and `normals` hold three floats
/// per vertex, `uvs` two. `indices` is a flat list of triangle triples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    /// Vertex positions, `[x, y, z]` per vertex.
    pub positions: Vec<f32>,
    /// Vertex normals, `[x, y, z]` per vertex.
    pub normals: Vec<f32>,
    /// Texture coordinates, `[u, v]` per vertex.
    pub uvs: Vec<f32>,
    /// Triangle indices.
    pub indices: Vec<u32>,
    /// Material groups partitioning `indices`. Empty means one implicit group.
    pub groups: Vec<GeometryGroup>,
}

impl MeshBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer sized for exactly `vertex_count` vertices and
    /// `index_count` indices.
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            uvs: Vec::with_capacity(vertex_count * 2),
            indices: Vec::with_capacity(index_count),
            groups: Vec::new(),
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of indices.
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the buffer holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, position: Vector3, normal: Vector3, uv: Vector2) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions.extend_from_slice(&position.to_array());
        self.normals.extend_from_slice(&normal.to_array());
        self.uvs.extend_from_slice(&uv.to_array());
        index
    }

    /// Append one triangle.
    #[inline]
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Append a material group.
    pub fn add_group(&mut self, start: usize, count: usize, material_index: usize) {
        self.groups.push(GeometryGroup::new(start, count, material_index));
    }

    /// Drop all material groups.
    pub fn clear_groups(&mut self) {
        self.groups.clear();
    }

    /// Position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vector3 {
        Vector3::from_slice(&self.positions, i * 3)
    }

    /// Normal of vertex `i`.
    #[inline]
    pub fn normal(&self, i: usize) -> Vector3 {
        Vector3::from_slice(&self.normals, i * 3)
    }

    /// Texture coordinate of vertex `i`.
    #[inline]
    pub fn uv(&self, i: usize) -> Vector2 {
        Vector2::from_slice(&self.uvs, i * 2)
    }

    /// Overwrite the normal of vertex `i`.
    #[inline]
    pub fn set_normal(&mut self, i: usize, normal: &Vector3) {
        normal.write_to_slice(&mut self.normals, i * 3);
    }

    /// Iterate over triangle index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Corner positions of triangle `i`.
    pub fn triangle(&self, i: usize) -> Triangle {
        let t = &self.indices[i * 3..i * 3 + 3];
        Triangle::new(
            self.position(t[0] as usize),
            self.position(t[1] as usize),
            self.position(t[2] as usize),
        )
    }

    /// Check the buffer invariants: attribute lengths agree, every index is in
    /// range, indices form whole triangles, and groups tile the index array.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertex_count();
        if self.positions.len() % 3 != 0 {
            return Err(KernelError::AttributeLength {
                attribute: "position",
                expected: vertex_count * 3,
                found: self.positions.len(),
            });
        }
        if self.normals.len() != vertex_count * 3 {
            return Err(KernelError::AttributeLength {
                attribute: "normal",
                expected: vertex_count * 3,
                found: self.normals.len(),
            });
        }
        if self.uvs.len() != vertex_count * 2 {
            return Err(KernelError::AttributeLength {
                attribute: "uv",
                expected: vertex_count * 2,
                found: self.uvs.len(),
            });
        }

        if self.indices.len() % 3 != 0 {
            return Err(KernelError::IndicesNotTriangles {
                len: self.indices.len(),
            });
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(KernelError::IndexOutOfBounds {
                index,
                vertex_count,
            });
        }

        if !self.groups.is_empty() {
            let mut expected = 0;
            for group in &self.groups {
                if group.start != expected {
                    return Err(KernelError::GroupGap {
                        expected,
                        found: group.start,
                    });
                }
                expected = group.end();
            }
            if expected != self.indices.len() {
                return Err(KernelError::GroupOverrun {
                    end: expected,
                    len: self.indices.len(),
                });
            }
        }

        Ok(())
    }

    /// Recompute normals by accumulating area-weighted face normals per vertex.
    ///
    /// Without indices, consecutive vertex triples are taken as triangles.
    pub fn compute_vertex_normals(&mut self) {
        let vertex_count = self.vertex_count();
        let mut accumulated = vec![Vector3::ZERO; vertex_count];

        let triangles: Vec<[usize; 3]> = if self.indices.is_empty() {
            (0..vertex_count / 3).map(|t| [t * 3, t * 3 + 1, t * 3 + 2]).collect()
        } else {
            self.triangles()
                .map(|[a, b, c]| [a as usize, b as usize, c as usize])
                .collect()
        };

        for [a, b, c] in triangles {
            let face = Triangle::new(self.position(a), self.position(b), self.position(c));
            let n = face.scaled_normal();
            accumulated[a] += n;
            accumulated[b] += n;
            accumulated[c] += n;
        }

        self.normals.clear();
        self.normals.reserve(vertex_count * 3);
        for n in accumulated {
            self.normals.extend_from_slice(&n.normalized().to_array());
        }
    }

    /// Axis-aligned bounds of the positions.
    pub fn compute_bounding_box(&self) -> Box3 {
        Box3::from_flat_positions(&self.positions)
    }

    /// Bounding sphere of the positions.
    pub fn compute_bounding_sphere(&self) -> Sphere {
        Sphere::from_flat_positions(&self.positions)
    }

    /// Transform positions by `m` and normals by its normal matrix.
    pub fn apply_matrix4(&mut self, m: &Matrix4) {
        m.apply_to_vector3_array(&mut self.positions);

        let normal_matrix = Matrix3::normal_matrix(m);
        normal_matrix.apply_to_vector3_array(&mut self.normals);
        for chunk in self.normals.chunks_exact_mut(3) {
            let n = Vector3::new(chunk[0], chunk[1], chunk[2]).normalized();
            chunk.copy_from_slice(&n.to_array());
        }
    }

    /// Interleave the attributes into [`Vertex`] records.
    pub fn to_vertices(&self) -> Vec<Vertex> {
        (0..self.vertex_count())
            .map(|i| {
                Vertex::new(
                    self.position(i).to_array(),
                    self.normal(i).to_array(),
                    self.uv(i).to_array(),
                )
            })
            .collect()
    }
}

/// Line-segment list, two endpoints per segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineBuffer {
    /// Endpoint positions, `[x, y, z]` per endpoint, six floats per segment.
    pub positions: Vec<f32>,
}

impl LineBuffer {
    /// Create an empty line buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer sized for `segments` segments.
    pub fn with_capacity(segments: usize) -> Self {
        Self {
            positions: Vec::with_capacity(segments * 6),
        }
    }

    /// Number of segments.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.positions.len() / 6
    }

    /// Whether the buffer holds no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append a segment.
    pub fn push_segment(&mut self, start: &Vector3, end: &Vector3) {
        self.positions.extend_from_slice(&start.to_array());
        self.positions.extend_from_slice(&end.to_array());
    }

    /// Endpoints of segment `i`.
    pub fn segment(&self, i: usize) -> (Vector3, Vector3) {
        (
            Vector3::from_slice(&self.positions, i * 6),
            Vector3::from_slice(&self.positions, i * 6 + 3),
        )
    }

    /// Iterate over segment endpoints.
    pub fn segments(&self) -> impl Iterator<Item = (Vector3, Vector3)> + '_ {
        (0..self.segment_count()).map(move |i| self.segment(i))
    }

    /// Axis-aligned bounds of the endpoints.
    pub fn compute_bounding_box(&self) -> Box3 {
        Box3::from_flat_positions(&self.positions)
    }

    /// Endpoints as position-only vertices, two per segment.
    pub fn to_vertices(&self) -> Vec<PositionVertex> {
        self.positions
            .chunks_exact(3)
            .map(|p| PositionVertex::new([p[0], p[1], p[2]]))
            .collect()
    }
}
