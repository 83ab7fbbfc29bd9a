//! Error types for rove.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no triangles.
    #[error("mesh has no triangles")]
    EmptyMesh,

    /// A triangle references an invalid vertex index.
    #[error("triangle {triangle} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The triangle index.
        triangle: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A triangle has duplicate vertex indices.
    #[error("triangle {triangle} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The triangle index.
        triangle: usize,
    },

    /// A triangle has (near-)zero area, so no tangent frame exists for it.
    #[error("triangle {triangle} has near-zero area; cannot build a tangent frame")]
    DegenerateTriangle {
        /// The triangle index.
        triangle: usize,
    },

    /// An edge is shared by more than two triangles.
    #[error("edge ({v0}, {v1}) is shared by more than two triangles")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// Invalid state for the requested operation.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
