//! Texture-atlas descriptor.
//!
//! The atlas is a square grid of equal tiles. A tile at `(col, row)`
//! covers `[col*t, (col+1)*t] x [row*t, (row+1)*t]` in UV space, with
//! `t = 1 / grid_dim` and V growing downward.

use cubeworld_procedural::TileCoord;
use cubeworld_shared::ATLAS_GRID_DIM;

/// Grid layout of the atlas the host binds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasLayout {
    grid_dim: u32,
}

impl AtlasLayout {
    /// Creates a layout with `grid_dim` tiles per row. Zero is treated as one.
    #[must_use]
    pub const fn new(grid_dim: u32) -> Self {
        Self {
            grid_dim: if grid_dim == 0 { 1 } else { grid_dim },
        }
    }

    /// Tiles per row (and per column).
    #[inline]
    #[must_use]
    pub const fn grid_dim(&self) -> u32 {
        self.grid_dim
    }

    /// Edge length of one tile in UV units.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn tile_size(&self) -> f32 {
        1.0 / self.grid_dim as f32
    }

    /// UVs for quad corners 0..4 (bottom-left, bottom-right, top-right, top-left).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn corner_uvs(&self, tile: TileCoord) -> [[f32; 2]; 4] {
        let t = self.tile_size();
        let u0 = tile.col as f32 * t;
        let u1 = (tile.col + 1) as f32 * t;
        let v0 = tile.row as f32 * t;
        let v1 = (tile.row + 1) as f32 * t;
        [[u0, v1], [u1, v1], [u1, v0], [u0, v0]]
    }
}

impl Default for AtlasLayout {
    fn default() -> Self {
        Self::new(ATLAS_GRID_DIM)
    }
}
