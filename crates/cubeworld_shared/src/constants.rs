//! World dimensions and global limits.
//!
//! These are fixed for the build. Changing `CHUNK_HEIGHT` changes the
//! terrain clamp and every chunk AABB.

/// Chunk extent along X, in blocks.
pub const CHUNK_WIDTH: usize = 16;

/// Chunk extent along Z, in blocks.
pub const CHUNK_DEPTH: usize = 16;

/// Chunk extent along Y, in blocks.
pub const CHUNK_HEIGHT: usize = 128;

/// Cells per chunk.
pub const CHUNK_VOLUME: usize = CHUNK_WIDTH * CHUNK_HEIGHT * CHUNK_DEPTH;

/// Tiles per row (and per column) of the square texture atlas.
pub const ATLAS_GRID_DIM: u32 = 16;

/// Smallest accepted render distance, in chunks.
pub const MIN_RENDER_DISTANCE: u32 = 2;

/// Largest accepted render distance, in chunks.
pub const MAX_RENDER_DISTANCE: u32 = 32;

/// Render distance used when nothing else is configured.
pub const DEFAULT_RENDER_DISTANCE: u32 = 12;
