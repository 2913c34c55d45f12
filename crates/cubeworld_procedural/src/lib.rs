//! # CUBEWORLD Procedural Generation
//!
//! Deterministic world generation for infinite, reproducible worlds.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same world
//! 2. **Chunked**: World is generated in fixed-size vertical columns
//! 3. **Streamable**: Chunks can be generated/discarded independently
//! 4. **Total**: Generation cannot fail; out-of-range access reads Air
//!
//! ## Core Components
//!
//! - `BlockKind` / `BlockCell`: the block catalog and voxel cells
//! - `ChunkId` + coordinate functions: floor-division coordinate algebra
//! - `ValueNoise`: 1D/2D/3D value noise and fbm
//! - `TerrainGenerator`: produces chunks from noise
//! - `Chunk`: dense storage, lifecycle state and dirty tracking
//!
//! ## Example
//!
//! ```rust,ignore
//! use cubeworld_procedural::{BlockKind, ChunkId, TerrainGenerator, TerrainParameters};
//!
//! let gen = TerrainGenerator::new(TerrainParameters::with_seed(1337));
//! let chunk = gen.generate(ChunkId::new(0, 0));
//!
//! // Bedrock floor everywhere
//! assert_eq!(chunk.get(0, 0, 0).kind, BlockKind::Bedrock);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod block;
pub mod chunk;
pub mod coords;
pub mod noise;
pub mod terrain;

pub use block::{should_render_face, BlockCell, BlockKind, BlockProperties, Face, TileCoord};
pub use chunk::{Chunk, ChunkState, MeshHandle};
pub use coords::{chunk_origin, world_to_chunk, world_to_local, ChunkId, LocalPos};
pub use noise::{ValueNoise, WorldSeed};
pub use terrain::{ColumnSample, TerrainGenerator, TerrainParameters};
