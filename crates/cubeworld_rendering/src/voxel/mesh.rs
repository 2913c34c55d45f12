//! Mesh output types.

use bytemuck::{Pod, Zeroable};

// =============================================================================
// VERTEX FORMAT - Interleaved layout handed to the mesh consumer
// =============================================================================

/// Vertex for terrain mesh - 32 bytes, interleaved.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position in chunk-local space [x, y, z]
    pub position: [f32; 3],
    /// Face normal [nx, ny, nz]
    pub normal: [f32; 3],
    /// Atlas UV [u, v]
    pub uv: [f32; 2],
}

// =============================================================================
// MESH OUTPUT - Indexed quads, opaque pass first
// =============================================================================

/// Complete mesh data for a chunk (vertices + indices).
///
/// Every quad contributes 4 vertices and 6 indices. Indices before
/// `transparent_index_start` belong to opaque faces, the rest to
/// transparent ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertex buffer data
    pub vertices: Vec<MeshVertex>,
    /// Index buffer data
    pub indices: Vec<u32>,
    /// First index of the transparent pass
    pub transparent_index_start: usize,
}

impl ChunkMesh {
    /// Check if mesh is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get triangle count
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get vertex count
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of quads (faces) emitted
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Number of quads in the transparent pass
    #[must_use]
    pub fn transparent_quad_count(&self) -> usize {
        (self.indices.len() - self.transparent_index_start) / 6
    }

    /// Expands the indexed mesh into a flat triangle list.
    ///
    /// Vertex `i` of the result corresponds to index `i`, so
    /// `transparent_index_start` is also the first transparent vertex.
    #[must_use]
    pub fn triangle_list(&self) -> Vec<MeshVertex> {
        self.indices
            .iter()
            .filter_map(|&i| self.vertices.get(i as usize).copied())
            .collect()
    }

    /// Appends another mesh's geometry, rebasing its indices.
    ///
    /// The transparent split is left untouched.
    pub(crate) fn append(&mut self, other: &Self) {
        #[allow(clippy::cast_possible_truncation)]
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}
