//! Error types for the kernel.
//!
//! Most kernel operations are total: degenerate input is clamped or mapped to a
//! neutral value (identity matrix, zero vector) instead of failing. The variants
//! below cover the places where a caller explicitly asks for a checked result.

use thiserror::Error;

/// Errors reported by checked kernel operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// A vector component index was outside `0..len`.
    #[error("component index {index} out of range for a {len}-component vector")]
    ComponentIndex {
        /// Requested index.
        index: usize,
        /// Number of components of the vector.
        len: usize,
    },

    /// A matrix has a zero determinant and cannot be inverted.
    #[error("matrix is singular (determinant == 0)")]
    SingularMatrix,

    /// A triangle index refers past the end of the vertex arrays.
    #[error("index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds {
        /// Offending index value.
        index: u32,
        /// Number of vertices in the buffer.
        vertex_count: usize,
    },

    /// The index array length is not a multiple of three.
    #[error("index count {len} is not a multiple of 3")]
    IndicesNotTriangles {
        /// Length of the index array.
        len: usize,
    },

    /// A material group does not start where the previous one ended.
    #[error("material group starts at {found}, expected {expected}")]
    GroupGap {
        /// Index where the group should have started.
        expected: usize,
        /// Index where it actually starts.
        found: usize,
    },

    /// Material groups run past the index array or leave a tail uncovered.
    #[error("material groups end at {end}, index array has {len} entries")]
    GroupOverrun {
        /// End of the last group.
        end: usize,
        /// Length of the index array.
        len: usize,
    },

    /// A vertex attribute array has the wrong length for the vertex count.
    #[error("attribute `{attribute}` has {found} floats, expected {expected}")]
    AttributeLength {
        /// Attribute name (`normal`, `uv`, ...).
        attribute: &'static str,
        /// Expected float count.
        expected: usize,
        /// Actual float count.
        found: usize,
    },

    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<figment::Error> for KernelError {
    fn from(err: figment::Error) -> Self {
        KernelError::Config(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KernelError>;
