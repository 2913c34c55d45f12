//! # Mesh Consumer Error Types
//!
//! Failures a host may report while accepting chunk geometry.

use cubeworld_procedural::ChunkId;
use thiserror::Error;

/// Errors returned by a [`MeshConsumer`](crate::MeshConsumer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsumerError {
    /// The host has no room for another buffer.
    #[error("mesh storage exhausted: requested {requested} vertices, {available} available")]
    OutOfMemory {
        /// Vertices in the rejected upload.
        requested: usize,
        /// Vertices the host could still accept.
        available: usize,
    },

    /// The host refused the mesh for its own reasons.
    #[error("mesh for chunk ({}, {}) rejected: {reason}", .chunk.x, .chunk.z)]
    Rejected {
        /// Chunk whose mesh was refused.
        chunk: ChunkId,
        /// Host-supplied explanation.
        reason: String,
    },
}

/// Result type for consumer operations.
pub type ConsumerResult<T> = Result<T, ConsumerError>;
