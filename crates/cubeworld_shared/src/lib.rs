//! # CUBEWORLD Shared
//!
//! Common types used by every crate in the workspace.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - a GPU API
//! - a windowing layer
//! - anything that allocates per frame
//!
//! World dimensions live in [`constants`] so generation, meshing and
//! streaming can never disagree about the chunk shape.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{
    ATLAS_GRID_DIM, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH,
    DEFAULT_RENDER_DISTANCE, MAX_RENDER_DISTANCE, MIN_RENDER_DISTANCE,
};
pub use math::{look_to_rh, mat4_mul, perspective_rh, IVec3, Mat4, Vec3, MAT4_IDENTITY};
