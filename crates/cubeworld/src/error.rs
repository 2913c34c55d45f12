//! # World Error Types
//!
//! The only failure the world core reports at runtime is a mesh consumer
//! refusing a buffer. Everything else is configuration loading.

use std::path::PathBuf;

use cubeworld_procedural::ChunkId;
use cubeworld_rendering::ConsumerError;
use thiserror::Error;

/// Errors surfaced to the host.
#[derive(Error, Debug)]
pub enum WorldError {
    /// The mesh consumer rejected a chunk's buffer.
    ///
    /// The chunk keeps its previous mesh, stays dirty and is retried on a
    /// later flush.
    #[error("failed to publish mesh for chunk ({}, {})", .chunk.x, .chunk.z)]
    Publish {
        /// Chunk whose mesh was refused.
        chunk: ChunkId,
        /// What the consumer reported.
        source: ConsumerError,
    },

    /// A configuration file could not be read or written.
    #[error("config file {}: {source}", .path.display())]
    ConfigIo {
        /// File that was accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// A configuration document is not valid TOML for [`WorldConfig`](crate::WorldConfig).
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration could not be rendered as TOML.
    #[error("could not serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_publish_error_keeps_source() {
        let err = WorldError::Publish {
            chunk: ChunkId::new(3, -2),
            source: ConsumerError::OutOfMemory { requested: 10, available: 4 },
        };
        assert_eq!(err.to_string(), "failed to publish mesh for chunk (3, -2)");
        assert!(err.source().is_some());
    }
}
