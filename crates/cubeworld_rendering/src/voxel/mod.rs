//! Voxel surface extraction.
//!
//! Turns dense chunk cells into indexed quads. Seams are resolved through
//! [`ChunkNeighbors`], so a mesh never depends on how its neighbors are
//! stored.

mod mesh;
mod mesher;

pub use mesh::{ChunkMesh, MeshVertex};
pub use mesher::{ChunkNeighbors, NoNeighbors, SurfaceMesher, SKY_MARGIN};
