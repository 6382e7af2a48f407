//! Validation and slicing errors

use crate::float_types::Real;
use nalgebra::Point3;

/// Problems found while building a [`Mesh`](crate::mesh::Mesh) from raw vertex and face data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A face references a vertex that does not exist
    #[error(
        "(IndexOutOfRange) Face {face} references vertex {index}, \
         but there are only {vertex_count} vertices"
    )]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    /// A face has fewer than three corners
    #[error("(TooFewVertices) Face {face} has {count} vertices, at least 3 are required")]
    TooFewVertices { face: usize, count: usize },
    /// The coordinate has a NaN or infinite
    #[error("(InvalidCoordinate) The coordinate ({0}) has a NaN or infinite")]
    InvalidCoordinate(Point3<Real>),
    /// The mesh has no vertices at all
    #[error("(EmptyMesh) The mesh has no vertices")]
    EmptyMesh,
    /// In general, anything else
    #[error("{0}")]
    Other(String),
}

/// Errors reported by [`Slicer`](crate::slicer::Slicer) operations.
///
/// Degenerate geometry is never reported here: it is recovered from locally and only shows up
/// in the [`ClipStats`](crate::clip::ClipStats) of a pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SliceError {
    /// The slicer has no mesh bound to it
    #[error("mesh slicer not initialized: bind a mesh before slicing or exploding")]
    NotInitialized,
}
