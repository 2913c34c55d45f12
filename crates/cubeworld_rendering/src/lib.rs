//! # CUBEWORLD Rendering
//!
//! Everything between dense voxel cells and the host's GPU layer:
//! - Surface extraction with per-face, neighbor-aware culling
//! - Frustum planes and chunk AABB tests
//! - The [`MeshConsumer`] contract through which buffers leave
//! - Per-frame draw lists and statistics
//!
//! ## Architecture
//!
//! ```text
//! Chunk cells ──> SurfaceMesher ──> ChunkMesh ──> MeshConsumer::publish
//!                      │
//!               ChunkNeighbors (seam reads)
//!
//! Ready chunks ──> FrustumCuller ──> RenderFrame { draws, stats }
//! ```
//!
//! No GPU API is touched here.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod atlas;
pub mod consumer;
pub mod culling;
pub mod error;
pub mod pipeline;
pub mod voxel;

pub use atlas::AtlasLayout;
pub use consumer::{MeshConsumer, MeshStore};
pub use culling::{Aabb, Frustum, FrustumCuller, Plane};
pub use error::{ConsumerError, ConsumerResult};
pub use pipeline::{DrawCommand, RenderFrame, RenderStats};
pub use voxel::{ChunkMesh, ChunkNeighbors, MeshVertex, NoNeighbors, SurfaceMesher, SKY_MARGIN};
