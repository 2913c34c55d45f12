//! Surface Mesher - per-face quads with neighbor-aware culling.
//!
//! Every non-Air cell is visited in storage order (y, then z, then x) and
//! each of its six faces is emitted as one quad when the face rule says
//! it can be seen. Faces that cross a chunk seam read the neighbor chunk
//! through [`ChunkNeighbors`]; the mesher never holds chunk pointers.
//!
//! ## Face Rule
//!
//! | neighbor                | opaque self           | Water         | other transparent |
//! |-------------------------|-----------------------|---------------|-------------------|
//! | loaded cell `n`         | `should_render_face`  | `n == Air`    | `should_render_face` |
//! | unloaded chunk          | only well above water | never         | always            |
//! | above the chunk top     | always                | always        | always            |
//! | below y = 0             | never                 | never         | never             |
//!
//! Opaque faces are emitted first, transparent ones second, so the
//! consumer can draw the transparent tail after the opaque pass.

use std::collections::HashMap;
use std::hash::BuildHasher;

use cubeworld_procedural::{
    should_render_face, BlockKind, Chunk, ChunkId, ChunkState, Face,
};
use cubeworld_shared::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};

use super::mesh::{ChunkMesh, MeshVertex};
use crate::atlas::AtlasLayout;

/// Rows above `water_level` beyond which a seam into an unloaded chunk is
/// assumed to face open sky.
pub const SKY_MARGIN: i32 = 8;

/// Read-only access to loaded chunks for seam queries.
pub trait ChunkNeighbors {
    /// The loaded chunk with this identity, if any.
    fn neighbor(&self, id: ChunkId) -> Option<&Chunk>;
}

impl<S: BuildHasher> ChunkNeighbors for HashMap<ChunkId, Chunk, S> {
    fn neighbor(&self, id: ChunkId) -> Option<&Chunk> {
        self.get(&id)
    }
}

/// A neighborhood where nothing else is loaded.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoNeighbors;

impl ChunkNeighbors for NoNeighbors {
    fn neighbor(&self, _id: ChunkId) -> Option<&Chunk> {
        None
    }
}

/// What lies across a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Across {
    Cell(BlockKind),
    Unloaded,
    AboveTop,
    BelowBottom,
}

// =============================================================================
// QUAD TEMPLATES - corners 0..4 counter-clockwise seen from outside
// =============================================================================

/// Unit-cube corners per face, indexed by [`Face::index`].
const FACE_CORNERS: [[[f32; 3]; 4]; 6] = [
    // Front (+Z)
    [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
    // Back (-Z)
    [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
    // Left (-X)
    [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
    // Right (+X)
    [[1.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0]],
    // Top (+Y)
    [[0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
    // Bottom (-Y)
    [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
];

/// Two triangles per quad.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Builds surface meshes for chunks.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceMesher {
    atlas: AtlasLayout,
    water_level: i32,
}

impl SurfaceMesher {
    /// Creates a mesher for an atlas layout and sea level.
    #[must_use]
    pub const fn new(atlas: AtlasLayout, water_level: i32) -> Self {
        Self { atlas, water_level }
    }

    /// Atlas the UVs are computed for.
    #[must_use]
    pub const fn atlas(&self) -> AtlasLayout {
        self.atlas
    }

    /// Extracts the visible surface of `chunk`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn build<N: ChunkNeighbors + ?Sized>(&self, chunk: &Chunk, neighbors: &N) -> ChunkMesh {
        let mut opaque = ChunkMesh::default();
        let mut transparent = ChunkMesh::default();

        for y in 0..CHUNK_HEIGHT {
            for z in 0..CHUNK_DEPTH {
                for x in 0..CHUNK_WIDTH {
                    let kind = chunk.get(x, y, z).kind;
                    if kind == BlockKind::Air {
                        continue;
                    }
                    let target = if kind.is_transparent() { &mut transparent } else { &mut opaque };
                    let base = [x as f32, y as f32, z as f32];

                    for face in Face::ALL {
                        let across = Self::across(chunk, neighbors, x, y, z, face);
                        if self.face_visible(kind, across, y) {
                            self.push_quad(target, kind, face, base);
                        }
                    }
                }
            }
        }

        let transparent_index_start = opaque.indices.len();
        opaque.append(&transparent);
        opaque.transparent_index_start = transparent_index_start;

        tracing::trace!(
            chunk_x = chunk.id().x,
            chunk_z = chunk.id().z,
            quads = opaque.quad_count(),
            transparent_quads = opaque.transparent_quad_count(),
            "chunk meshed"
        );

        opaque
    }

    /// Resolves the cell across `face` of local cell `(x, y, z)`.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn across<N: ChunkNeighbors + ?Sized>(
        chunk: &Chunk,
        neighbors: &N,
        x: usize,
        y: usize,
        z: usize,
        face: Face,
    ) -> Across {
        let offset = face.offset();
        let nx = x as i32 + offset.x;
        let ny = y as i32 + offset.y;
        let nz = z as i32 + offset.z;

        if ny < 0 {
            return Across::BelowBottom;
        }
        if ny >= CHUNK_HEIGHT as i32 {
            return Across::AboveTop;
        }

        let w = CHUNK_WIDTH as i32;
        let d = CHUNK_DEPTH as i32;
        if (0..w).contains(&nx) && (0..d).contains(&nz) {
            return Across::Cell(chunk.get(nx as usize, ny as usize, nz as usize).kind);
        }

        let neighbor_id = chunk.id().offset(nx.div_euclid(w), nz.div_euclid(d));
        match neighbors
            .neighbor(neighbor_id)
            .filter(|c| c.state() != ChunkState::Empty)
        {
            Some(other) => Across::Cell(
                other
                    .get(nx.rem_euclid(w) as usize, ny as usize, nz.rem_euclid(d) as usize)
                    .kind,
            ),
            None => Across::Unloaded,
        }
    }

    /// The face rule.
    fn face_visible(&self, kind: BlockKind, across: Across, y: usize) -> bool {
        match across {
            Across::BelowBottom => false,
            Across::AboveTop => true,
            Across::Cell(neighbor) => {
                if kind == BlockKind::Water {
                    neighbor == BlockKind::Air
                } else {
                    should_render_face(kind, neighbor)
                }
            }
            Across::Unloaded => {
                if kind == BlockKind::Water {
                    false
                } else if kind.is_opaque() {
                    i32::try_from(y).map_or(true, |y| y > self.water_level + SKY_MARGIN)
                } else {
                    true
                }
            }
        }
    }

    fn push_quad(&self, mesh: &mut ChunkMesh, kind: BlockKind, face: Face, base: [f32; 3]) {
        #[allow(clippy::cast_possible_truncation)]
        let first = mesh.vertices.len() as u32;
        let normal = face.normal();
        let uvs = self.atlas.corner_uvs(kind.face_tile(face));

        for (corner, uv) in FACE_CORNERS[face.index()].iter().zip(uvs) {
            mesh.vertices.push(MeshVertex {
                position: [base[0] + corner[0], base[1] + corner[1], base[2] + corner[2]],
                normal,
                uv,
            });
        }
        mesh.indices.extend(QUAD_INDICES.iter().map(|i| first + i));
    }
}

impl Default for SurfaceMesher {
    fn default() -> Self {
        Self::new(AtlasLayout::default(), 62)
    }
}
