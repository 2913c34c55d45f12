//! Rendering statistics.

/// Statistics from a render frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Number of draw commands emitted.
    pub draw_calls: u32,
    /// Number of chunks that passed the frustum test.
    pub chunks_rendered: u32,
    /// Number of Ready chunks culled by the frustum.
    pub chunks_culled: u32,
    /// Vertices referenced by all draw commands.
    pub vertices: u64,
}

impl RenderStats {
    /// Chunks considered this frame.
    #[must_use]
    pub fn chunks_considered(&self) -> u32 {
        self.chunks_rendered + self.chunks_culled
    }

    /// Fraction of considered chunks that were culled, in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cull_ratio(&self) -> f32 {
        let total = self.chunks_considered();
        if total == 0 {
            0.0
        } else {
            self.chunks_culled as f32 / total as f32
        }
    }
}
