//! # Coordinate Algebra
//!
//! Mapping between world voxel coordinates, chunk identities and in-chunk
//! local positions. Everything here is integer-exact and uses floor
//! division, so negative coordinates round toward negative infinity.

use cubeworld_shared::{IVec3, CHUNK_DEPTH, CHUNK_WIDTH};

const W: i32 = CHUNK_WIDTH as i32;
const D: i32 = CHUNK_DEPTH as i32;

/// Identity of a vertical column of the world, in chunk units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId {
    /// X coordinate (in chunks, not blocks).
    pub x: i32,
    /// Z coordinate (in chunks, not blocks).
    pub z: i32,
}

impl ChunkId {
    /// Creates a new chunk identity.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The chunk containing world column `(wx, wz)`.
    #[inline]
    #[must_use]
    pub const fn from_world(wx: i32, wz: i32) -> Self {
        world_to_chunk(wx, wz)
    }

    /// World position of the chunk's minimum corner.
    #[inline]
    #[must_use]
    pub const fn origin(self) -> IVec3 {
        chunk_origin(self)
    }

    /// The chunk displaced by `(dx, dz)` chunks.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// The four cardinal neighbors: +X, -X, +Z, -Z.
    #[must_use]
    pub const fn cardinal_neighbors(self) -> [Self; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }

    /// Squared horizontal Euclidean distance to another chunk, in chunks.
    #[inline]
    #[must_use]
    pub fn distance_squared(self, other: Self) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dz = i64::from(self.z) - i64::from(other.z);
        dx * dx + dz * dz
    }

    /// Horizontal distance from a world point to the nearest point of
    /// this chunk's footprint. Zero when the point lies inside it.
    ///
    /// This is the only metric the streamer uses; chunk-center distance
    /// produces a visibly uneven load radius.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distance_from_point(self, px: f32, pz: f32) -> f32 {
        let min_x = (self.x * W) as f32;
        let min_z = (self.z * D) as f32;
        let nearest_x = px.clamp(min_x, min_x + W as f32);
        let nearest_z = pz.clamp(min_z, min_z + D as f32);
        let dx = px - nearest_x;
        let dz = pz - nearest_z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Position of a cell inside its chunk.
///
/// `y` is passed through unchanged and may be outside the chunk's vertical
/// range; callers check it before indexing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocalPos {
    /// Local X (0..CHUNK_WIDTH).
    pub x: usize,
    /// World Y.
    pub y: i32,
    /// Local Z (0..CHUNK_DEPTH).
    pub z: usize,
}

impl LocalPos {
    /// True when the cell lies on the chunk's -X face.
    #[inline]
    #[must_use]
    pub const fn on_min_x(self) -> bool {
        self.x == 0
    }

    /// True when the cell lies on the chunk's +X face.
    #[inline]
    #[must_use]
    pub const fn on_max_x(self) -> bool {
        self.x == CHUNK_WIDTH - 1
    }

    /// True when the cell lies on the chunk's -Z face.
    #[inline]
    #[must_use]
    pub const fn on_min_z(self) -> bool {
        self.z == 0
    }

    /// True when the cell lies on the chunk's +Z face.
    #[inline]
    #[must_use]
    pub const fn on_max_z(self) -> bool {
        self.z == CHUNK_DEPTH - 1
    }
}

/// Chunk owning world column `(wx, wz)`.
#[inline]
#[must_use]
pub const fn world_to_chunk(wx: i32, wz: i32) -> ChunkId {
    ChunkId::new(wx.div_euclid(W), wz.div_euclid(D))
}

/// Local position of a world cell inside its owning chunk.
#[inline]
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn world_to_local(wx: i32, wy: i32, wz: i32) -> LocalPos {
    LocalPos {
        x: wx.rem_euclid(W) as usize,
        y: wy,
        z: wz.rem_euclid(D) as usize,
    }
}

/// World position of a chunk's minimum corner.
#[inline]
#[must_use]
pub const fn chunk_origin(id: ChunkId) -> IVec3 {
    IVec3::new(id.x * W, 0, id.z * D)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeworld_shared::CHUNK_HEIGHT;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_chunk_from_world() {
        assert_eq!(world_to_chunk(0, 0), ChunkId::new(0, 0));
        assert_eq!(world_to_chunk(15, 15), ChunkId::new(0, 0));
        assert_eq!(world_to_chunk(16, 16), ChunkId::new(1, 1));
        assert_eq!(world_to_chunk(-1, -1), ChunkId::new(-1, -1));
        assert_eq!(world_to_chunk(-16, -16), ChunkId::new(-1, -1));
        assert_eq!(world_to_chunk(-17, -17), ChunkId::new(-2, -2));
    }

    #[test]
    fn test_local_non_negative() {
        let local = world_to_local(-1, 70, -16);
        assert_eq!((local.x, local.y, local.z), (15, 70, 0));
        assert!(local.on_max_x());
        assert!(local.on_min_z());
    }

    #[test]
    fn test_round_trip_random() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xC0FFEE);
        for _ in 0..10_000 {
            let id = ChunkId::new(rng.gen_range(-100_000..100_000), rng.gen_range(-100_000..100_000));
            let lx = rng.gen_range(0..CHUNK_WIDTH);
            let lz = rng.gen_range(0..CHUNK_DEPTH);
            let ly = rng.gen_range(0..CHUNK_HEIGHT as i32);

            let origin = chunk_origin(id);
            let wx = origin.x + lx as i32;
            let wz = origin.z + lz as i32;

            assert_eq!(world_to_chunk(wx, wz), id, "chunk mismatch at ({wx}, {wz})");
            let local = world_to_local(wx, ly, wz);
            assert_eq!((local.x, local.y, local.z), (lx, ly, lz), "local mismatch at ({wx}, {wz})");
        }
    }

    #[test]
    fn test_distance_from_point_is_footprint_distance() {
        let id = ChunkId::new(0, 0);
        // Inside the footprint
        assert_eq!(id.distance_from_point(8.0, 8.0), 0.0);
        // On the far edge
        assert_eq!(id.distance_from_point(16.0, 4.0), 0.0);
        // Straight out along X
        assert!((ChunkId::new(2, 0).distance_from_point(0.0, 0.0) - 32.0).abs() < 1e-6);
        // Diagonal corner
        let d = ChunkId::new(-2, -2).distance_from_point(0.0, 0.0);
        assert!((d - (16.0f32 * 16.0 * 2.0).sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_neighbors_and_distance() {
        let id = ChunkId::new(3, -2);
        for n in id.cardinal_neighbors() {
            assert_eq!(id.distance_squared(n), 1);
        }
        assert_eq!(id.distance_squared(ChunkId::new(0, 2)), 25);
    }
}
