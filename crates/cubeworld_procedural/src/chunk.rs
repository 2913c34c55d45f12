//! # Chunk Storage
//!
//! A chunk is a dense `W x H x D` column of [`BlockCell`]s plus its
//! lifecycle state, a dirty flag, and a record of the mesh the consumer
//! currently holds for it.
//!
//! ## Layout
//!
//! Cell `(x, y, z)` lives at linear index `y*W*D + z*W + x`, so one
//! horizontal layer is contiguous.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty --generate--> Generated --begin_meshing--> Meshing --finish_meshing--> Ready
//!                         ^                           |                          |
//!                         +-------abort_meshing-------+      (dirty again) <-----+
//! ```
//!
//! A chunk never refers to its neighbors. Cross-chunk reads always go
//! through the world that owns it.

use cubeworld_shared::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH};

use crate::block::{BlockCell, BlockKind};
use crate::coords::ChunkId;

/// Lifecycle state of a chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChunkState {
    /// Allocated, all cells Air, terrain not yet written.
    #[default]
    Empty,
    /// Terrain written; no mesh published yet.
    Generated,
    /// Surface extraction in progress.
    Meshing,
    /// A mesh reflecting the cells has been published.
    Ready,
}

/// What the mesh consumer holds for a chunk.
///
/// The buffer itself belongs to the consumer; the chunk only remembers
/// its shape so the renderer can emit draw commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshHandle {
    /// Vertices published (triangle list).
    pub vertex_count: usize,
    /// First vertex of the transparent pass.
    pub transparent_start: usize,
}

impl MeshHandle {
    /// True when nothing was published.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }
}

/// A chunk of world data.
///
/// Contains a 16x128x16 grid of cells plus lifecycle metadata.
#[derive(Clone)]
pub struct Chunk {
    id: ChunkId,
    /// Cell data (indexed as `y*W*D + z*W + x`).
    cells: Box<[BlockCell]>,
    state: ChunkState,
    dirty: bool,
    mesh: Option<MeshHandle>,
}

impl Chunk {
    /// Creates a new empty chunk at the given coordinates.
    #[must_use]
    pub fn new(id: ChunkId) -> Self {
        Self {
            id,
            cells: vec![BlockCell::AIR; CHUNK_VOLUME].into_boxed_slice(),
            state: ChunkState::Empty,
            dirty: false,
            mesh: None,
        }
    }

    /// Linear index of a local cell. Caller guarantees bounds.
    #[inline]
    #[must_use]
    pub const fn index(x: usize, y: usize, z: usize) -> usize {
        y * CHUNK_WIDTH * CHUNK_DEPTH + z * CHUNK_WIDTH + x
    }

    /// True when `(x, y, z)` is inside the chunk.
    #[inline]
    #[must_use]
    pub const fn in_bounds(x: usize, y: usize, z: usize) -> bool {
        x < CHUNK_WIDTH && y < CHUNK_HEIGHT && z < CHUNK_DEPTH
    }

    /// Chunk identity.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ChunkId {
        self.id
    }

    /// Current lifecycle state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> ChunkState {
        self.state
    }

    /// True when the published mesh is stale.
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The mesh the consumer currently holds, if any.
    #[inline]
    #[must_use]
    pub const fn mesh(&self) -> Option<MeshHandle> {
        self.mesh
    }

    /// Gets a cell at local coordinates; Air when out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockCell {
        if Self::in_bounds(x, y, z) {
            self.cells[Self::index(x, y, z)]
        } else {
            BlockCell::AIR
        }
    }

    /// Sets a cell at local coordinates and marks the chunk dirty.
    ///
    /// Returns `false` (and changes nothing) when out of range.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, cell: BlockCell) -> bool {
        if !Self::in_bounds(x, y, z) {
            return false;
        }
        self.cells[Self::index(x, y, z)] = cell;
        self.dirty = true;
        true
    }

    /// All cells in storage order.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[BlockCell] {
        &self.cells
    }

    /// Writes a cell without touching the dirty flag. Used by generation.
    #[inline]
    pub(crate) fn write_raw(&mut self, x: usize, y: usize, z: usize, cell: BlockCell) {
        self.cells[Self::index(x, y, z)] = cell;
    }

    /// Highest cell in a column that satisfies `pred`, scanning down.
    #[must_use]
    pub fn highest_in_column(&self, x: usize, z: usize, pred: impl Fn(BlockKind) -> bool) -> Option<usize> {
        if x >= CHUNK_WIDTH || z >= CHUNK_DEPTH {
            return None;
        }
        (0..CHUNK_HEIGHT)
            .rev()
            .find(|&y| pred(self.cells[Self::index(x, y, z)].kind))
    }

    /// Number of non-Air cells.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_air()).count()
    }

    /// Marks the mesh stale.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Records that terrain has been written. Only moves out of `Empty`.
    pub fn mark_generated(&mut self) {
        if self.state == ChunkState::Empty {
            self.state = ChunkState::Generated;
        }
    }

    /// True when the chunk may go through surface extraction.
    #[inline]
    #[must_use]
    pub fn can_mesh(&self) -> bool {
        matches!(self.state, ChunkState::Generated | ChunkState::Ready)
    }

    /// Enters `Meshing`. Returns `false` when the chunk has no terrain yet.
    pub fn begin_meshing(&mut self) -> bool {
        if !self.can_mesh() {
            return false;
        }
        self.state = ChunkState::Meshing;
        true
    }

    /// Records the published mesh, clears the dirty flag, enters `Ready`.
    pub fn finish_meshing(&mut self, handle: MeshHandle) {
        self.mesh = Some(handle);
        self.dirty = false;
        self.state = ChunkState::Ready;
    }

    /// Leaves `Meshing` without a new mesh; the chunk stays dirty.
    pub fn abort_meshing(&mut self) {
        if self.state == ChunkState::Meshing {
            self.state = if self.mesh.is_some() {
                ChunkState::Ready
            } else {
                ChunkState::Generated
            };
        }
        self.dirty = true;
    }

    /// Forgets the published mesh (the consumer has released it).
    pub fn take_mesh(&mut self) -> Option<MeshHandle> {
        let mesh = self.mesh.take();
        if self.state == ChunkState::Ready {
            self.state = ChunkState::Generated;
            self.dirty = true;
        }
        mesh
    }
}
