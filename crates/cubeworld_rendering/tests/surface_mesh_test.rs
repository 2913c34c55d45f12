//! # Surface Mesh Integration Test
//!
//! Meshes real terrain and checks the properties the host relies on:
//! seams between loaded chunks agree, the buffer published through a
//! consumer is a plain triangle list, and culling agrees with the camera.

use std::collections::HashMap;

use cubeworld_procedural::{Chunk, ChunkId, TerrainGenerator};
use cubeworld_rendering::{
    AtlasLayout, ChunkMesh, FrustumCuller, MeshConsumer, MeshStore, SurfaceMesher,
};
use cubeworld_shared::{look_to_rh, mat4_mul, perspective_rh, Vec3, CHUNK_WIDTH};

fn loaded_grid(gen: &TerrainGenerator, radius: i32) -> HashMap<ChunkId, Chunk> {
    let mut map = HashMap::new();
    for z in -radius..=radius {
        for x in -radius..=radius {
            let id = ChunkId::new(x, z);
            map.insert(id, gen.generate(id));
        }
    }
    map
}

#[allow(clippy::cast_precision_loss)]
fn seam_quads(mesh: &ChunkMesh, plane_x: usize, normal_x: f32) -> usize {
    mesh.vertices
        .chunks(4)
        .filter(|q| {
            q[0].normal == [normal_x, 0.0, 0.0]
                && q.iter().all(|v| (v.position[0] - plane_x as f32).abs() < 1e-6)
        })
        .count()
}

/// Test: Across a loaded seam, each exposed face appears exactly once.
#[test]
fn test_loaded_seam_faces_match_cells() {
    let gen = TerrainGenerator::default();
    let map = loaded_grid(&gen, 1);
    let mesher = SurfaceMesher::new(AtlasLayout::default(), gen.params().water_level);

    let west = &map[&ChunkId::new(0, 0)];
    let east = &map[&ChunkId::new(1, 0)];
    let west_mesh = mesher.build(west, &map);
    let east_mesh = mesher.build(east, &map);

    // Count the expected faces straight from the cells
    let mut expected_west = 0;
    let mut expected_east = 0;
    for y in 0..cubeworld_shared::CHUNK_HEIGHT {
        for z in 0..cubeworld_shared::CHUNK_DEPTH {
            let a = west.get(CHUNK_WIDTH - 1, y, z).kind;
            let b = east.get(0, y, z).kind;
            if a.is_opaque() && !b.is_opaque() {
                expected_west += 1;
            }
            if b.is_opaque() && !a.is_opaque() {
                expected_east += 1;
            }
        }
    }

    assert_eq!(seam_quads(&west_mesh, CHUNK_WIDTH, 1.0), expected_west);
    assert_eq!(seam_quads(&east_mesh, 0, -1.0), expected_east);
}

/// Test: A published buffer is the expanded index list, opaque first.
#[test]
fn test_published_buffer_layout() {
    let gen = TerrainGenerator::default();
    let map = loaded_grid(&gen, 1);
    let mesher = SurfaceMesher::new(AtlasLayout::default(), gen.params().water_level);
    let id = ChunkId::new(0, 0);
    let mesh = mesher.build(&map[&id], &map);

    let mut store = MeshStore::new(AtlasLayout::default().grid_dim());
    store.publish(id, &mesh.triangle_list()).expect("unbounded store");

    let published = store.get(id).expect("stored");
    assert_eq!(published.len(), mesh.indices.len());
    assert_eq!(published.len() % 3, 0);
    assert!(!published.is_empty(), "terrain chunk has a surface");
    assert!(mesh.transparent_index_start <= published.len());
}

/// Test: Chunks behind the camera are culled, the one in front is kept.
#[test]
fn test_culling_follows_camera() {
    let eye = Vec3::new(8.0, 80.0, 8.0);
    let view = look_to_rh(eye, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
    let proj = perspective_rh(70f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);
    let mut culler = FrustumCuller::new();
    culler.update(&mat4_mul(&proj, &view));

    assert!(culler.test_chunk(ChunkId::new(0, -3)));
    assert!(!culler.test_chunk(ChunkId::new(0, 4)));
    assert_eq!(culler.counts(), (1, 1));
}
