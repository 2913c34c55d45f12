//! # Block Catalog
//!
//! Every block kind and its rendering/occlusion properties.
//!
//! The catalog is a `static` table indexed by the kind's discriminant, so
//! it is fully built before any chunk exists and can never be re-entered
//! or mutated.
//!
//! ## Atlas Layout
//!
//! Faces reference tiles on a square atlas grid as `(col, row)`. Grass is
//! the only kind with distinct faces (grass top, dirt bottom, grass sides).

use cubeworld_shared::IVec3;

/// A face of a unit cube, named by the direction it faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    /// +Z
    Front = 0,
    /// -Z
    Back = 1,
    /// -X
    Left = 2,
    /// +X
    Right = 3,
    /// +Y
    Top = 4,
    /// -Y
    Bottom = 5,
}

impl Face {
    /// All six faces in index order.
    pub const ALL: [Self; 6] = [
        Self::Front,
        Self::Back,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
    ];

    /// Index into per-face tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Offset to the neighboring cell across this face.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> IVec3 {
        match self {
            Self::Front => IVec3::new(0, 0, 1),
            Self::Back => IVec3::new(0, 0, -1),
            Self::Left => IVec3::new(-1, 0, 0),
            Self::Right => IVec3::new(1, 0, 0),
            Self::Top => IVec3::new(0, 1, 0),
            Self::Bottom => IVec3::new(0, -1, 0),
        }
    }

    /// Outward unit normal.
    #[inline]
    #[must_use]
    pub const fn normal(self) -> [f32; 3] {
        match self {
            Self::Front => [0.0, 0.0, 1.0],
            Self::Back => [0.0, 0.0, -1.0],
            Self::Left => [-1.0, 0.0, 0.0],
            Self::Right => [1.0, 0.0, 0.0],
            Self::Top => [0.0, 1.0, 0.0],
            Self::Bottom => [0.0, -1.0, 0.0],
        }
    }
}

/// Grid coordinate of a tile on the texture atlas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Column (0-based, left to right).
    pub col: u32,
    /// Row (0-based, top to bottom).
    pub row: u32,
}

impl TileCoord {
    /// Creates a tile coordinate.
    #[inline]
    #[must_use]
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Static properties of one block kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockProperties {
    /// Human-readable name.
    pub name: &'static str,
    /// Participates in occlusion and collision.
    pub solid: bool,
    /// Does not fully occlude its neighbors.
    pub transparent: bool,
    /// Mining hardness; `-1.0` means indestructible.
    pub hardness: f32,
    /// Atlas tile per face, indexed by [`Face::index`].
    pub faces: [TileCoord; 6],
}

const fn uniform(col: u32, row: u32) -> [TileCoord; 6] {
    let t = TileCoord::new(col, row);
    [t, t, t, t, t, t]
}

const GRASS_TOP: TileCoord = TileCoord::new(0, 0);
const DIRT_TILE: TileCoord = TileCoord::new(1, 0);
const GRASS_SIDE: TileCoord = TileCoord::new(2, 0);

/// One entry per [`BlockKind`], in discriminant order.
static BLOCK_TABLE: [BlockProperties; BlockKind::COUNT] = [
    BlockProperties { name: "Air", solid: false, transparent: true, hardness: 0.0, faces: uniform(0, 0) },
    BlockProperties {
        name: "Grass",
        solid: true,
        transparent: false,
        hardness: 0.6,
        // Front, Back, Left, Right, Top, Bottom
        faces: [GRASS_SIDE, GRASS_SIDE, GRASS_SIDE, GRASS_SIDE, GRASS_TOP, DIRT_TILE],
    },
    BlockProperties { name: "Dirt", solid: true, transparent: false, hardness: 0.5, faces: uniform(1, 0) },
    BlockProperties { name: "Stone", solid: true, transparent: false, hardness: 1.5, faces: uniform(4, 0) },
    BlockProperties { name: "Water", solid: false, transparent: true, hardness: 0.0, faces: uniform(3, 0) },
    BlockProperties { name: "Sand", solid: true, transparent: false, hardness: 0.5, faces: uniform(0, 11) },
    BlockProperties { name: "Wood", solid: true, transparent: false, hardness: 2.0, faces: uniform(5, 0) },
    BlockProperties { name: "Leaves", solid: true, transparent: true, hardness: 0.2, faces: uniform(6, 0) },
    BlockProperties { name: "Cobblestone", solid: true, transparent: false, hardness: 2.0, faces: uniform(7, 0) },
    BlockProperties { name: "Bedrock", solid: true, transparent: false, hardness: -1.0, faces: uniform(8, 0) },
];

/// The closed set of block kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BlockKind {
    /// Empty space.
    #[default]
    Air = 0,
    /// Grass-topped soil.
    Grass = 1,
    /// Soil.
    Dirt = 2,
    /// Stone.
    Stone = 3,
    /// Static water (no flow simulation).
    Water = 4,
    /// Sand.
    Sand = 5,
    /// Tree trunk.
    Wood = 6,
    /// Tree foliage.
    Leaves = 7,
    /// Cobblestone.
    Cobblestone = 8,
    /// Indestructible floor.
    Bedrock = 9,
}

impl BlockKind {
    /// Number of kinds.
    pub const COUNT: usize = 10;

    /// Every kind, in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Air,
        Self::Grass,
        Self::Dirt,
        Self::Stone,
        Self::Water,
        Self::Sand,
        Self::Wood,
        Self::Leaves,
        Self::Cobblestone,
        Self::Bedrock,
    ];

    /// Kind for a raw discriminant.
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Case-insensitive lookup by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Raw discriminant.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Catalog entry for this kind.
    #[inline]
    #[must_use]
    pub fn properties(self) -> &'static BlockProperties {
        &BLOCK_TABLE[self as usize]
    }

    /// Human-readable name.
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        self.properties().name
    }

    /// Participates in occlusion and collision.
    #[inline]
    #[must_use]
    pub fn is_solid(self) -> bool {
        self.properties().solid
    }

    /// Does not fully occlude neighbors.
    #[inline]
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.properties().transparent
    }

    /// Solid and not transparent: hides any face pressed against it.
    #[inline]
    #[must_use]
    pub fn is_opaque(self) -> bool {
        let props = self.properties();
        props.solid && !props.transparent
    }

    /// Mining hardness.
    #[inline]
    #[must_use]
    pub fn hardness(self) -> f32 {
        self.properties().hardness
    }

    /// True for kinds that can never be mined.
    #[inline]
    #[must_use]
    pub fn is_indestructible(self) -> bool {
        self.hardness() < 0.0
    }

    /// Atlas tile for one face.
    #[inline]
    #[must_use]
    pub fn face_tile(self, face: Face) -> TileCoord {
        self.properties().faces[face.index()]
    }
}

/// Whether the face of `self_kind` pressed against `neighbor` is visible.
#[must_use]
pub fn should_render_face(self_kind: BlockKind, neighbor: BlockKind) -> bool {
    if neighbor == BlockKind::Air {
        return true;
    }
    if neighbor.is_opaque() {
        return false;
    }
    // Interior faces of a homogeneous transparent medium
    !(self_kind.is_transparent() && neighbor.is_transparent() && self_kind == neighbor)
}

/// One voxel: a kind plus a metadata byte.
///
/// The metadata byte is carried through edits but does not affect meshing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockCell {
    /// Block kind.
    pub kind: BlockKind,
    /// Free-form metadata.
    pub meta: u8,
}

impl BlockCell {
    /// Empty cell.
    pub const AIR: Self = Self::new(BlockKind::Air);

    /// Creates a cell with zero metadata.
    #[inline]
    #[must_use]
    pub const fn new(kind: BlockKind) -> Self {
        Self { kind, meta: 0 }
    }

    /// Creates a cell with metadata.
    #[inline]
    #[must_use]
    pub const fn with_meta(kind: BlockKind, meta: u8) -> Self {
        Self { kind, meta }
    }

    /// Returns true if this is an air cell.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self.kind, BlockKind::Air)
    }
}

impl From<BlockKind> for BlockCell {
    fn from(kind: BlockKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_discriminants() {
        for (i, kind) in BlockKind::ALL.iter().enumerate() {
            assert_eq!(kind.id() as usize, i);
            assert_eq!(BlockKind::from_id(kind.id()), Some(*kind));
        }
        assert_eq!(BlockKind::from_id(200), None);
    }

    #[test]
    fn test_catalog_invariants() {
        assert!(!BlockKind::Air.is_solid());
        assert!(BlockKind::Air.is_transparent());
        assert!(BlockKind::Bedrock.is_solid());
        assert!(BlockKind::Bedrock.is_opaque());
        assert!(BlockKind::Bedrock.is_indestructible());
        assert!(!BlockKind::Stone.is_indestructible());
        assert!(BlockKind::Water.is_transparent());
        assert!(BlockKind::Leaves.is_transparent());
    }

    #[test]
    fn test_opaque_faces_against_air_render() {
        for kind in BlockKind::ALL.into_iter().filter(|k| k.is_opaque()) {
            assert!(
                should_render_face(kind, BlockKind::Air),
                "{} should show a face against air",
                kind.name()
            );
        }
    }

    #[test]
    fn test_opaque_pairs_cull() {
        for a in BlockKind::ALL.into_iter().filter(|k| k.is_opaque()) {
            for b in BlockKind::ALL.into_iter().filter(|k| k.is_opaque()) {
                assert!(!should_render_face(a, b), "{} vs {}", a.name(), b.name());
            }
        }
    }

    #[test]
    fn test_transparent_rules() {
        // Same transparent medium: no interior faces
        assert!(!should_render_face(BlockKind::Water, BlockKind::Water));
        assert!(!should_render_face(BlockKind::Leaves, BlockKind::Leaves));
        // Different transparent kinds see each other
        assert!(should_render_face(BlockKind::Water, BlockKind::Leaves));
        // Opaque next to water still shows its face
        assert!(should_render_face(BlockKind::Stone, BlockKind::Water));
        // Water under stone is hidden
        assert!(!should_render_face(BlockKind::Water, BlockKind::Stone));
    }

    #[test]
    fn test_grass_faces() {
        assert_eq!(BlockKind::Grass.face_tile(Face::Top), TileCoord::new(0, 0));
        assert_eq!(BlockKind::Grass.face_tile(Face::Bottom), BlockKind::Dirt.face_tile(Face::Top));
        for face in [Face::Front, Face::Back, Face::Left, Face::Right] {
            assert_eq!(BlockKind::Grass.face_tile(face), TileCoord::new(2, 0));
        }
        for face in Face::ALL {
            assert_eq!(BlockKind::Stone.face_tile(face), TileCoord::new(4, 0));
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(BlockKind::from_name("stone"), Some(BlockKind::Stone));
        assert_eq!(BlockKind::from_name(" Cobblestone "), Some(BlockKind::Cobblestone));
        assert_eq!(BlockKind::from_name("diamond"), None);
    }

    #[test]
    fn test_face_offsets_match_normals() {
        for face in Face::ALL {
            let o = face.offset();
            #[allow(clippy::cast_precision_loss)]
            let as_f = [o.x as f32, o.y as f32, o.z as f32];
            assert_eq!(as_f, face.normal(), "{face:?}");
        }
    }

    #[test]
    fn test_cell_equality_includes_meta() {
        assert_eq!(BlockCell::default(), BlockCell::AIR);
        assert_ne!(
            BlockCell::with_meta(BlockKind::Wood, 1),
            BlockCell::with_meta(BlockKind::Wood, 2)
        );
    }
}
