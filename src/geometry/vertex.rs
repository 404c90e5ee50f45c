//! Interleaved vertex records and index-width selection for upload.

use super::MeshBuffer;
use bytemuck::{Pod, Zeroable};
use std::mem::size_of;

/// Standard vertex with position, normal, and UV coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Position in local space.
    pub position: [f32; 3],
    /// Normal vector.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Byte distance between consecutive vertices.
    pub const STRIDE: usize = size_of::<Self>();
    /// Byte offset of `position`.
    pub const POSITION_OFFSET: usize = 0;
    /// Byte offset of `normal`.
    pub const NORMAL_OFFSET: usize = size_of::<[f32; 3]>();
    /// Byte offset of `uv`.
    pub const UV_OFFSET: usize = size_of::<[f32; 6]>();

    /// Create a new vertex.
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }
}

/// Simple position-only vertex, used for line lists.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PositionVertex {
    /// Position in local space.
    pub position: [f32; 3],
}

impl PositionVertex {
    /// Byte distance between consecutive vertices.
    pub const STRIDE: usize = size_of::<Self>();

    /// Create a new position vertex.
    pub const fn new(position: [f32; 3]) -> Self {
        Self { position }
    }
}

/// Index data narrowed to the smallest width that addresses every vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexBuffer {
    /// 16-bit indices.
    U16(Vec<u16>),
    /// 32-bit indices.
    U32(Vec<u32>),
}

impl IndexBuffer {
    /// Largest vertex count addressable with 16-bit indices.
    pub const U16_VERTEX_LIMIT: usize = 65_536;

    /// Pick the index width for `vertex_count` vertices and copy `indices`.
    pub fn from_indices(indices: &[u32], vertex_count: usize) -> Self {
        if vertex_count <= Self::U16_VERTEX_LIMIT {
            IndexBuffer::U16(indices.iter().map(|&i| i as u16).collect())
        } else {
            IndexBuffer::U32(indices.to_vec())
        }
    }

    /// Index buffer for a mesh.
    pub fn from_mesh(mesh: &MeshBuffer) -> Self {
        Self::from_indices(&mesh.indices, mesh.vertex_count())
    }

    /// Number of indices.
    pub fn len(&self) -> usize {
        match self {
            IndexBuffer::U16(v) => v.len(),
            IndexBuffer::U32(v) => v.len(),
        }
    }

    /// Whether there are no indices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes per index.
    pub fn element_size(&self) -> usize {
        match self {
            IndexBuffer::U16(_) => size_of::<u16>(),
            IndexBuffer::U32(_) => size_of::<u32>(),
        }
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexBuffer::U16(v) => bytemuck::cast_slice(v),
            IndexBuffer::U32(v) => bytemuck::cast_slice(v),
        }
    }

    /// Index `i` widened to `u32`.
    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            IndexBuffer::U16(v) => v.get(i).map(|&x| u32::from(x)),
            IndexBuffer::U32(v) => v.get(i).copied(),
        }
    }
}
