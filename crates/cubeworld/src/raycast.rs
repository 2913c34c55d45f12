//! # Voxel Raycaster
//!
//! Amanatides-Woo DDA through an unbounded grid.
//!
//! The ray walks cell by cell, always crossing the nearest boundary. When
//! two or three boundaries are equally near, X is crossed before Y and Y
//! before Z. The first non-Air cell is the hit; the face it was entered
//! through gives the normal, and the cell in front of that face is where a
//! new block would be placed.

use cubeworld_procedural::{BlockCell, Face};
use cubeworld_shared::{IVec3, Vec3};

/// Longest distance any ray travels; larger or non-finite reaches are
/// clamped to it.
pub const MAX_RAY_DISTANCE: f32 = 1024.0;

/// Anything that can answer "which block is here".
pub trait BlockSource {
    /// Cell at a world position. Unknown positions are Air.
    fn block_at(&self, pos: IVec3) -> BlockCell;
}

impl<F: Fn(IVec3) -> BlockCell> BlockSource for F {
    fn block_at(&self, pos: IVec3) -> BlockCell {
        self(pos)
    }
}

/// Result of a successful raycast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Cell that stopped the ray.
    pub block_pos: IVec3,
    /// Cell in front of the hit face, `block_pos + face_normal`.
    pub adjacent_pos: IVec3,
    /// `origin + direction * distance`.
    pub hit_point: Vec3,
    /// Outward normal of the face the ray entered through.
    pub face_normal: Vec3,
    /// The face the ray entered through.
    pub face: Face,
    /// Contents of the hit cell.
    pub block: BlockCell,
    /// Ray parameter at which the hit cell was entered.
    pub distance: f32,
}

/// Face whose outward normal opposes a step of `step` along `axis`.
fn entry_face(axis: usize, step: i32) -> Face {
    match (axis, step > 0) {
        (0, true) => Face::Left,
        (0, false) => Face::Right,
        (1, true) => Face::Bottom,
        (1, false) => Face::Top,
        (_, true) => Face::Back,
        (_, false) => Face::Front,
    }
}

/// Casts a ray from `origin` along `direction` for up to `max_distance`.
///
/// `direction` is normalized first; a zero or non-finite direction never
/// hits. `max_distance` is clamped to [`MAX_RAY_DISTANCE`]. A ray starting inside a non-Air cell hits it at distance 0, with
/// the face that points back along the dominant axis of travel.
#[must_use]
pub fn cast<S: BlockSource + ?Sized>(
    source: &S,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<RayHit> {
    let len_sq = direction.length_squared();
    if !len_sq.is_finite() || len_sq == 0.0 {
        return None;
    }
    let dir = direction.normalized();
    // f32::min ignores NaN, so NaN and infinity both clamp
    let max_distance = max_distance.min(MAX_RAY_DISTANCE);

    let o = origin.to_array();
    let d = dir.to_array();
    let mut cell = origin.floor_cell().to_array();
    let mut step = [0i32; 3];
    let mut delta = [f32::INFINITY; 3];
    let mut side = [f32::INFINITY; 3];

    for axis in 0..3 {
        if d[axis] > 0.0 {
            step[axis] = 1;
            delta[axis] = (1.0 / d[axis]).abs();
            #[allow(clippy::cast_precision_loss)]
            let boundary = (cell[axis] + 1) as f32;
            side[axis] = (boundary - o[axis]) * delta[axis];
        } else if d[axis] < 0.0 {
            step[axis] = -1;
            delta[axis] = (1.0 / d[axis]).abs();
            #[allow(clippy::cast_precision_loss)]
            let boundary = cell[axis] as f32;
            side[axis] = (o[axis] - boundary) * delta[axis];
        }
    }

    // Start cell: enter "through" the face opposing the dominant axis
    let dominant = (0..3).fold(0, |best, axis| if d[axis].abs() > d[best].abs() { axis } else { best });
    let mut entered = entry_face(dominant, if d[dominant] > 0.0 { 1 } else { -1 });
    let mut distance = 0.0f32;

    loop {
        if distance >= max_distance {
            return None;
        }

        let block_pos = IVec3::new(cell[0], cell[1], cell[2]);
        let block = source.block_at(block_pos);
        if !block.is_air() {
            let normal = entered.offset();
            return Some(RayHit {
                block_pos,
                adjacent_pos: block_pos + normal,
                hit_point: origin + dir * distance,
                face_normal: normal.as_vec3(),
                face: entered,
                block,
                distance,
            });
        }

        let axis = if side[0] <= side[1] && side[0] <= side[2] {
            0
        } else if side[1] <= side[2] {
            1
        } else {
            2
        };

        distance = side[axis];
        cell[axis] += step[axis];
        side[axis] += delta[axis];
        entered = entry_face(axis, step[axis]);
    }
}
