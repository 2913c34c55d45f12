//! Render frame data structures.
//!
//! Contains everything the host needs to draw a single frame.

use cubeworld_procedural::ChunkId;
use cubeworld_shared::IVec3;

use super::RenderStats;

/// One chunk to draw.
///
/// The host binds the buffer it stored for `chunk` and translates it by
/// `origin`. Vertices `[0, transparent_start)` are the opaque pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    /// Chunk whose published buffer is drawn.
    pub chunk: ChunkId,
    /// World-space translation of the chunk.
    pub origin: IVec3,
    /// Vertices in the published buffer.
    pub vertex_count: usize,
    /// First vertex of the transparent pass.
    pub transparent_start: usize,
}

impl DrawCommand {
    /// True when the buffer has a transparent tail.
    #[must_use]
    pub fn has_transparent(&self) -> bool {
        self.transparent_start < self.vertex_count
    }
}

/// All data needed to render a frame.
///
/// Produced by the world's `render` and consumed by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderFrame {
    /// Visible chunks in draw order.
    pub draws: Vec<DrawCommand>,
    /// Frame statistics.
    pub stats: RenderStats,
    /// Block to outline, if the host set one.
    pub targeted_block: Option<IVec3>,
}

impl RenderFrame {
    /// Returns true if there's anything to render.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.draws.is_empty()
    }

    /// True when `chunk` has a draw command this frame.
    #[must_use]
    pub fn draws_chunk(&self, chunk: ChunkId) -> bool {
        self.draws.iter().any(|d| d.chunk == chunk)
    }
}
