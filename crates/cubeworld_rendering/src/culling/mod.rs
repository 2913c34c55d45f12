//! Culling systems for render-time visibility.
//!
//! Chunks whose column box misses the view frustum are never drawn.

mod frustum;

pub use frustum::{Aabb, Frustum, FrustumCuller, Plane};
