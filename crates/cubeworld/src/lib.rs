//! # CUBEWORLD
//!
//! Core of a block-based sandbox: an effectively infinite, cube-aligned
//! world streamed around a moving viewpoint.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                              World                               │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  update_around ──> TerrainGenerator ──> chunk map (dirty queue)  │
//! │  flush_dirty   ──> SurfaceMesher    ──> MeshConsumer (host)      │
//! │  render        ──> FrustumCuller    ──> RenderFrame              │
//! │  raycast       ──> voxel DDA        ──> RayHit                   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Crates
//!
//! - [`shared`]: vectors, matrices and world dimensions
//! - [`procedural`]: blocks, coordinates, noise, terrain, chunk storage
//! - [`rendering`]: meshing, culling and the mesh-consumer contract
//!
//! Single-threaded: every call happens on the host's tick thread.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod raycast;
pub mod viewpoint;
pub mod world;

// Re-export the layers
pub use cubeworld_procedural as procedural;
pub use cubeworld_rendering as rendering;
pub use cubeworld_shared as shared;

pub use config::{RenderDistancePreset, WorldConfig};
pub use error::{WorldError, WorldResult};
pub use raycast::{BlockSource, RayHit, MAX_RAY_DISTANCE};
pub use viewpoint::Viewpoint;
pub use world::{StreamUpdate, World, WorldStats};
