//! # Mesh Consumer Contract
//!
//! The world never talks to a GPU. It hands finished triangle lists to a
//! [`MeshConsumer`] and later tells it when a chunk's buffer can go.
//!
//! [`MeshStore`] is an in-memory consumer used by tests, benches and the
//! headless walk binary.

use std::collections::HashMap;

use cubeworld_procedural::ChunkId;

use crate::error::{ConsumerError, ConsumerResult};
use crate::voxel::MeshVertex;

/// Receiver of per-chunk geometry.
pub trait MeshConsumer {
    /// Tiles per row of the atlas the host binds.
    fn atlas_grid_dim(&self) -> u32;

    /// Stores (or replaces) the triangle list for `chunk`.
    ///
    /// Vertices are in chunk-local space; opaque triangles come first.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot take the buffer. The
    /// previous buffer for `chunk`, if any, must stay usable.
    fn publish(&mut self, chunk: ChunkId, vertices: &[MeshVertex]) -> ConsumerResult<()>;

    /// Drops whatever is stored for `chunk`. Unknown chunks are ignored.
    fn release(&mut self, chunk: ChunkId);
}

/// In-memory [`MeshConsumer`] with an optional vertex capacity.
#[derive(Debug, Default)]
pub struct MeshStore {
    grid_dim: u32,
    meshes: HashMap<ChunkId, Vec<MeshVertex>>,
    capacity: Option<usize>,
    total_vertices: usize,
    publishes: u64,
    releases: u64,
}

impl MeshStore {
    /// Creates an unbounded store for an atlas with `grid_dim` tiles per row.
    #[must_use]
    pub fn new(grid_dim: u32) -> Self {
        Self {
            grid_dim,
            ..Self::default()
        }
    }

    /// Creates a store that refuses uploads past `capacity` vertices in total.
    #[must_use]
    pub fn with_capacity(grid_dim: u32, capacity: usize) -> Self {
        Self {
            grid_dim,
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Changes the vertex limit. `None` removes it.
    pub fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
    }

    /// Stored triangle list for `chunk`.
    #[must_use]
    pub fn get(&self, chunk: ChunkId) -> Option<&[MeshVertex]> {
        self.meshes.get(&chunk).map(Vec::as_slice)
    }

    /// True when a buffer is stored for `chunk`.
    #[must_use]
    pub fn contains(&self, chunk: ChunkId) -> bool {
        self.meshes.contains_key(&chunk)
    }

    /// Number of stored buffers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Vertices held across all buffers.
    #[must_use]
    pub fn total_vertices(&self) -> usize {
        self.total_vertices
    }

    /// Successful publishes so far.
    #[must_use]
    pub fn publish_count(&self) -> u64 {
        self.publishes
    }

    /// Releases of stored buffers so far.
    #[must_use]
    pub fn release_count(&self) -> u64 {
        self.releases
    }
}

impl MeshConsumer for MeshStore {
    fn atlas_grid_dim(&self) -> u32 {
        self.grid_dim
    }

    fn publish(&mut self, chunk: ChunkId, vertices: &[MeshVertex]) -> ConsumerResult<()> {
        let replaced = self.meshes.get(&chunk).map_or(0, Vec::len);
        if let Some(capacity) = self.capacity {
            let available = capacity.saturating_sub(self.total_vertices - replaced);
            if vertices.len() > available {
                return Err(ConsumerError::OutOfMemory {
                    requested: vertices.len(),
                    available,
                });
            }
        }

        self.total_vertices = self.total_vertices - replaced + vertices.len();
        self.meshes.insert(chunk, vertices.to_vec());
        self.publishes += 1;
        Ok(())
    }

    fn release(&mut self, chunk: ChunkId) {
        if let Some(old) = self.meshes.remove(&chunk) {
            self.total_vertices -= old.len();
            self.releases += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Vec<MeshVertex> {
        vec![MeshVertex::default(); 6]
    }

    #[test]
    fn test_publish_and_replace() {
        let mut store = MeshStore::new(16);
        let id = ChunkId::new(1, 2);

        store.publish(id, &quad()).expect("publish");
        store.publish(id, &[]).expect("replace with empty");

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).map(<[MeshVertex]>::len), Some(0));
        assert_eq!(store.total_vertices(), 0);
        assert_eq!(store.publish_count(), 2);
    }

    #[test]
    fn test_release_unknown_is_ignored() {
        let mut store = MeshStore::new(16);
        store.release(ChunkId::new(9, 9));
        assert_eq!(store.release_count(), 0);

        store.publish(ChunkId::new(0, 0), &quad()).expect("publish");
        store.release(ChunkId::new(0, 0));
        assert!(store.is_empty());
        assert_eq!(store.release_count(), 1);
    }

    #[test]
    fn test_capacity_rejects_and_keeps_old() {
        let mut store = MeshStore::with_capacity(16, 8);
        let id = ChunkId::new(0, 0);
        store.publish(id, &quad()).expect("fits");

        // Replacing frees the old buffer first: 12 > 8
        let big = vec![MeshVertex::default(); 12];
        let err = store.publish(id, &big).expect_err("over capacity");
        assert_eq!(err, ConsumerError::OutOfMemory { requested: 12, available: 8 });
        assert_eq!(store.get(id).map(<[MeshVertex]>::len), Some(6));

        // A second chunk only has 2 vertices left
        let err = store.publish(ChunkId::new(1, 0), &quad()).expect_err("no room");
        assert_eq!(err, ConsumerError::OutOfMemory { requested: 6, available: 2 });
    }

    #[test]
    fn test_error_messages() {
        let err = ConsumerError::Rejected { chunk: ChunkId::new(-1, 4), reason: "busy".into() };
        assert_eq!(err.to_string(), "mesh for chunk (-1, 4) rejected: busy");
    }
}
