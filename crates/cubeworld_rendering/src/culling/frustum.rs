//! Frustum culling for view-dependent rendering.
//!
//! Extracts frustum planes from the view-projection matrix and tests
//! bounding volumes against them. Tests may report false positives
//! (boxes near a frustum corner) but never false negatives.

use bytemuck::{Pod, Zeroable};
use cubeworld_procedural::{chunk_origin, ChunkId};
use cubeworld_shared::{Mat4, Vec3, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};

/// A plane in 3D space (Ax + By + Cz + D = 0).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Plane {
    /// Normal X component.
    pub a: f32,
    /// Normal Y component.
    pub b: f32,
    /// Normal Z component.
    pub c: f32,
    /// Distance from origin.
    pub d: f32,
}

impl Plane {
    /// Creates a new plane.
    #[must_use]
    pub const fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    /// Scales the plane so its normal has unit length.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = (self.a * self.a + self.b * self.b + self.c * self.c).sqrt();
        if len > 0.0 {
            Self {
                a: self.a / len,
                b: self.b / len,
                c: self.c / len,
                d: self.d / len,
            }
        } else {
            self
        }
    }

    /// Returns the signed distance from a point to the plane.
    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, p: Vec3) -> f32 {
        self.a * p.x + self.b * p.y + self.c * p.z + self.d
    }

    /// Converts to array format.
    #[must_use]
    pub const fn as_array(&self) -> [f32; 4] {
        [self.a, self.b, self.c, self.d]
    }
}

/// View frustum for culling.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frustum {
    /// Left, right, bottom, top, near, far planes.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Plane indices.
    pub const LEFT: usize = 0;
    /// Right plane index.
    pub const RIGHT: usize = 1;
    /// Bottom plane index.
    pub const BOTTOM: usize = 2;
    /// Top plane index.
    pub const TOP: usize = 3;
    /// Near plane index.
    pub const NEAR: usize = 4;
    /// Far plane index.
    pub const FAR: usize = 5;

    /// Extracts frustum planes from a column-major view-projection matrix.
    ///
    /// Each plane is `row3 ± rowN` of the matrix, normalized so the
    /// normal has unit length and points into the frustum.
    #[must_use]
    pub fn from_view_projection(m: &Mat4) -> Self {
        let row = |r: usize| [m[0][r], m[1][r], m[2][r], m[3][r]];
        let w = row(3);
        let combine = |other: [f32; 4], sign: f32| {
            Plane::new(
                w[0] + sign * other[0],
                w[1] + sign * other[1],
                w[2] + sign * other[2],
                w[3] + sign * other[3],
            )
            .normalized()
        };

        let mut planes = [Plane::default(); 6];
        planes[Self::LEFT] = combine(row(0), 1.0);
        planes[Self::RIGHT] = combine(row(0), -1.0);
        planes[Self::BOTTOM] = combine(row(1), 1.0);
        planes[Self::TOP] = combine(row(1), -1.0);
        planes[Self::NEAR] = combine(row(2), 1.0);
        planes[Self::FAR] = combine(row(2), -1.0);

        Self { planes }
    }

    /// True if the point is inside (or on) every plane.
    #[must_use]
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.distance_to_point(p) >= 0.0)
    }

    /// True if the sphere touches the frustum.
    #[must_use]
    pub fn test_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(center) >= -radius)
    }

    /// True if the box touches the frustum.
    ///
    /// For each plane only the box's positive vertex (the corner furthest
    /// along the plane normal) is tested.
    #[must_use]
    pub fn test_aabb(&self, aabb: &Aabb) -> bool {
        self.planes.iter().all(|plane| {
            let positive = Vec3::new(
                if plane.a >= 0.0 { aabb.max.x } else { aabb.min.x },
                if plane.b >= 0.0 { aabb.max.y } else { aabb.min.y },
                if plane.c >= 0.0 { aabb.max.z } else { aabb.min.z },
            );
            plane.distance_to_point(positive) >= 0.0
        })
    }

    /// Converts planes to array format for GPU upload.
    #[must_use]
    pub fn as_arrays(&self) -> [[f32; 4]; 6] {
        self.planes.map(|p| p.as_array())
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a new box.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The full-height box of a chunk column.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn for_chunk(id: ChunkId) -> Self {
        let min = chunk_origin(id).as_vec3();
        Self {
            min,
            max: min + Vec3::new(CHUNK_WIDTH as f32, CHUNK_HEIGHT as f32, CHUNK_DEPTH as f32),
        }
    }

    /// Returns the center of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the edge lengths of the box.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns the half-extents of the box.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Radius of the bounding sphere.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.half_extents().length()
    }

    /// True if the point lies inside or on the box.
    #[must_use]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// True if the boxes overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Grows the box to include a point.
    pub fn expand(&mut self, p: Vec3) {
        self.min = Vec3::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Vec3::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }
}

/// Frustum culler that also counts its decisions for frame statistics.
#[derive(Debug, Default)]
pub struct FrustumCuller {
    /// Current frustum.
    frustum: Frustum,
    visible: u32,
    culled: u32,
}

impl FrustumCuller {
    /// Creates a new frustum culler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the frustum from a view-projection matrix and resets counters.
    pub fn update(&mut self, view_projection: &Mat4) {
        self.frustum = Frustum::from_view_projection(view_projection);
        self.visible = 0;
        self.culled = 0;
    }

    /// The current frustum.
    #[must_use]
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Returns the current frustum planes for GPU upload.
    #[must_use]
    pub fn planes(&self) -> [[f32; 4]; 6] {
        self.frustum.as_arrays()
    }

    /// Tests a chunk column and counts the outcome.
    pub fn test_chunk(&mut self, id: ChunkId) -> bool {
        let visible = self.frustum.test_aabb(&Aabb::for_chunk(id));
        if visible {
            self.visible += 1;
        } else {
            self.culled += 1;
        }
        visible
    }

    /// `(visible, culled)` chunk counts since the last update.
    #[must_use]
    pub fn counts(&self) -> (u32, u32) {
        (self.visible, self.culled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeworld_shared::{look_to_rh, mat4_mul, perspective_rh, MAT4_IDENTITY};

    fn camera(eye: Vec3, forward: Vec3) -> Mat4 {
        let proj = perspective_rh(70f32.to_radians(), 16.0 / 9.0, 0.1, 500.0);
        let view = look_to_rh(eye, forward, Vec3::Y);
        mat4_mul(&proj, &view)
    }

    #[test]
    fn test_plane_normalization() {
        let plane = Plane::new(3.0, 4.0, 0.0, 10.0);
        let normalized = plane.normalized();

        // 3-4-5 triangle, so length is 5
        assert!((normalized.a - 0.6).abs() < 0.001);
        assert!((normalized.b - 0.8).abs() < 0.001);
        assert!((normalized.d - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_identity_frustum_is_clip_cube() {
        let frustum = Frustum::from_view_projection(&MAT4_IDENTITY);
        for plane in &frustum.planes {
            let n = (plane.a * plane.a + plane.b * plane.b + plane.c * plane.c).sqrt();
            assert!((n - 1.0).abs() < 1e-5, "planes must be unit length");
        }
        assert!(frustum.contains_point(Vec3::ZERO));
        assert!(frustum.contains_point(Vec3::new(0.99, -0.99, 0.5)));
        assert!(!frustum.contains_point(Vec3::new(1.5, 0.0, 0.0)));
        assert!(frustum.test_sphere(Vec3::new(1.5, 0.0, 0.0), 0.6));
        assert!(!frustum.test_sphere(Vec3::new(1.5, 0.0, 0.0), 0.4));
    }

    #[test]
    fn test_aabb_positive_vertex() {
        let frustum = Frustum::from_view_projection(&MAT4_IDENTITY);
        // Straddles the +X plane
        assert!(frustum.test_aabb(&Aabb::new(Vec3::new(0.5, -0.1, -0.1), Vec3::new(3.0, 0.1, 0.1))));
        // Entirely outside
        assert!(!frustum.test_aabb(&Aabb::new(Vec3::new(1.5, -0.1, -0.1), Vec3::new(3.0, 0.1, 0.1))));
        // Contains the whole frustum
        assert!(frustum.test_aabb(&Aabb::new(Vec3::new(-9.0, -9.0, -9.0), Vec3::new(9.0, 9.0, 9.0))));
    }

    #[test]
    fn test_chunks_in_front_and_behind() {
        let view_proj = camera(Vec3::new(8.0, 70.0, 8.0), Vec3::new(1.0, 0.0, 0.0));
        let mut culler = FrustumCuller::new();
        culler.update(&view_proj);

        // The chunk containing the camera always passes
        assert!(culler.test_chunk(ChunkId::new(0, 0)));
        // Straight ahead
        assert!(culler.test_chunk(ChunkId::new(4, 0)));
        // Far behind
        assert!(!culler.test_chunk(ChunkId::new(-6, 0)));
        assert_eq!(culler.counts(), (2, 1));

        culler.update(&view_proj);
        assert_eq!(culler.counts(), (0, 0));
    }

    #[test]
    fn test_aabb_helpers() {
        let mut aabb = Aabb::for_chunk(ChunkId::new(1, -1));
        assert_eq!(aabb.min, Vec3::new(16.0, 0.0, -16.0));
        assert_eq!(aabb.max, Vec3::new(32.0, 128.0, 0.0));
        assert_eq!(aabb.center(), Vec3::new(24.0, 64.0, -8.0));
        assert_eq!(aabb.size(), Vec3::new(16.0, 128.0, 16.0));
        assert!(aabb.contains(Vec3::new(20.0, 5.0, -3.0)));
        assert!(!aabb.contains(Vec3::new(10.0, 5.0, -3.0)));

        let other = Aabb::for_chunk(ChunkId::new(2, -1));
        assert!(aabb.intersects(&other), "adjacent chunks touch");
        assert!(!aabb.intersects(&Aabb::for_chunk(ChunkId::new(5, 5))));

        aabb.expand(Vec3::new(40.0, -2.0, -16.0));
        assert_eq!(aabb.max.x, 40.0);
        assert_eq!(aabb.min.y, -2.0);
        assert!((aabb.radius() - aabb.half_extents().length()).abs() < f32::EPSILON);
    }
}
