//! Viewpoint provided by the host each tick.

use cubeworld_shared::{look_to_rh, mat4_mul, perspective_rh, Mat4, Vec3};

/// Near clip plane used by [`Viewpoint::perspective`].
pub const NEAR_PLANE: f32 = 0.1;

/// Far clip plane used by [`Viewpoint::perspective`].
pub const FAR_PLANE: f32 = 1000.0;

/// Where the camera is, where it looks, and its combined matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewpoint {
    /// Eye position in world space.
    pub position: Vec3,
    /// Forward direction (need not be normalized).
    pub direction: Vec3,
    /// Projection times view, column-major.
    pub view_projection: Mat4,
}

impl Viewpoint {
    /// Creates a viewpoint from its parts.
    #[must_use]
    pub const fn new(position: Vec3, direction: Vec3, view_projection: Mat4) -> Self {
        Self { position, direction, view_projection }
    }

    /// Builds a right-handed perspective viewpoint with +Y up.
    #[must_use]
    pub fn perspective(position: Vec3, direction: Vec3, fov_y_radians: f32, aspect: f32) -> Self {
        let view = look_to_rh(position, direction, Vec3::Y);
        let proj = perspective_rh(fov_y_radians, aspect, NEAR_PLANE, FAR_PLANE);
        Self::new(position, direction, mat4_mul(&proj, &view))
    }
}
