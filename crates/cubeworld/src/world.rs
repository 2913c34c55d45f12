//! # World
//!
//! Owns every loaded chunk and keeps their meshes in step with their cells.
//!
//! ## Tick Order
//!
//! ```text
//! update_around(position)   load the disk around the viewpoint, unload far chunks
//! flush_dirty()             re-mesh up to max(1, r/4) dirty chunks
//! render(&viewpoint)        frustum-test Ready chunks, emit draw commands
//! ```
//!
//! ## Dirty Tracking
//!
//! A chunk is dirty when its published mesh no longer matches its own
//! cells or a neighbor's boundary cells. Dirty chunks wait in a FIFO
//! queue; a chunk that fails to publish goes to the back, so no chunk is
//! starved. The queue holds each chunk at most once.
//!
//! Chunks never see each other directly. Seam lookups during meshing go
//! through the chunk map.

use std::collections::{HashMap, HashSet, VecDeque};

use cubeworld_procedural::{
    world_to_chunk, world_to_local, BlockCell, BlockKind, Chunk, ChunkId, ChunkState, MeshHandle,
    TerrainGenerator, TerrainParameters,
};
use cubeworld_rendering::{
    AtlasLayout, DrawCommand, FrustumCuller, MeshConsumer, RenderFrame, RenderStats, SurfaceMesher,
};
use cubeworld_shared::{
    IVec3, Vec3, CHUNK_HEIGHT, CHUNK_WIDTH, MAX_RENDER_DISTANCE, MIN_RENDER_DISTANCE,
};

use crate::config::WorldConfig;
use crate::error::{WorldError, WorldResult};
use crate::raycast::{self, BlockSource, RayHit};
use crate::viewpoint::Viewpoint;

/// Chunks loaded and unloaded by one [`World::update_around`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamUpdate {
    /// Newly generated chunks.
    pub loaded: usize,
    /// Chunks dropped for being out of range.
    pub unloaded: usize,
}

impl StreamUpdate {
    /// True when the loaded set did not change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.loaded == 0 && self.unloaded == 0
    }
}

/// World statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Chunks in the map.
    pub loaded_chunks: usize,
    /// Chunks whose mesh is stale.
    pub dirty_chunks: usize,
    /// Chunks drawn by the last render.
    pub chunks_rendered: u32,
    /// Ready chunks culled by the last render.
    pub chunks_culled: u32,
    /// Chunks meshed by the last flush.
    pub last_flush_meshed: usize,
}

/// The streamed voxel world.
///
/// Generic over the host's [`MeshConsumer`], which receives every mesh.
pub struct World<C: MeshConsumer> {
    chunks: HashMap<ChunkId, Chunk>,
    dirty_queue: VecDeque<ChunkId>,
    queued: HashSet<ChunkId>,
    generator: TerrainGenerator,
    mesher: SurfaceMesher,
    culler: FrustumCuller,
    render_distance: u32,
    consumer: C,
    last_render: RenderStats,
    last_flush_meshed: usize,
    targeted_block: Option<IVec3>,
}

impl<C: MeshConsumer> World<C> {
    /// Creates an empty world. Nothing is loaded until [`Self::update_around`].
    #[must_use]
    pub fn new(config: WorldConfig, consumer: C) -> Self {
        let config = config.sanitized();
        let generator = TerrainGenerator::new(config.terrain);
        let mesher = SurfaceMesher::new(
            AtlasLayout::new(consumer.atlas_grid_dim()),
            generator.params().water_level,
        );

        Self {
            chunks: HashMap::new(),
            dirty_queue: VecDeque::new(),
            queued: HashSet::new(),
            generator,
            mesher,
            culler: FrustumCuller::new(),
            render_distance: config.render_distance,
            consumer,
            last_render: RenderStats::default(),
            last_flush_meshed: 0,
            targeted_block: None,
        }
    }

    // =========================================================================
    // SETTINGS
    // =========================================================================

    /// Streaming radius in chunks.
    #[must_use]
    pub const fn render_distance(&self) -> u32 {
        self.render_distance
    }

    /// Distance in chunks past which a loaded chunk is dropped: `r * 1.5 + 1`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn unload_distance(&self) -> f32 {
        self.render_distance as f32 * 1.5 + 1.0
    }

    /// Chunks meshed per [`Self::flush_dirty`]: `max(1, r / 4)`.
    #[must_use]
    pub fn max_meshes_per_frame(&self) -> usize {
        usize::try_from(self.render_distance / 4).map_or(1, |k| k.max(1))
    }

    /// Sets the streaming radius, clamped to `[2, 32]`.
    ///
    /// The loaded set adapts on the next [`Self::update_around`].
    pub fn set_render_distance(&mut self, chunks: i32) {
        let clamped = chunks.clamp(MIN_RENDER_DISTANCE as i32, MAX_RENDER_DISTANCE as i32);
        let clamped = u32::try_from(clamped).unwrap_or(MIN_RENDER_DISTANCE);
        if clamped != self.render_distance {
            tracing::info!(from = self.render_distance, to = clamped, "render distance changed");
        }
        self.render_distance = clamped;
    }

    /// Current terrain parameters.
    #[must_use]
    pub fn terrain_parameters(&self) -> &TerrainParameters {
        self.generator.params()
    }

    /// Drops every chunk and restarts generation with `seed`.
    pub fn regenerate(&mut self, seed: u64) {
        let params = TerrainParameters { seed, ..*self.generator.params() };
        self.set_terrain_parameters(params);
    }

    /// Drops every chunk and restarts generation with new parameters.
    pub fn set_terrain_parameters(&mut self, params: TerrainParameters) {
        let dropped = self.chunks.len();
        for (id, chunk) in self.chunks.drain() {
            if chunk.mesh().is_some() {
                self.consumer.release(id);
            }
        }
        self.dirty_queue.clear();
        self.queued.clear();
        self.last_flush_meshed = 0;
        self.last_render = RenderStats::default();

        self.generator = TerrainGenerator::new(params);
        self.mesher = SurfaceMesher::new(self.mesher.atlas(), self.generator.params().water_level);

        tracing::info!(seed = self.generator.params().seed, dropped, "world regenerated");
    }

    // =========================================================================
    // STREAMING
    // =========================================================================

    /// Loads every chunk within `r * W + W / 2` of `position` (horizontal,
    /// nearest point of the chunk footprint) and unloads chunks farther
    /// than `unload_distance * W`.
    ///
    /// New chunks are generated, marked dirty, and dirty their loaded
    /// neighbors. Unloading releases the chunk's mesh and dirties its
    /// loaded neighbors.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    pub fn update_around(&mut self, position: Vec3) -> StreamUpdate {
        let (px, pz) = (position.x, position.z);
        let width = CHUNK_WIDTH as f32;
        let load_radius = self.render_distance as f32 * width + width / 2.0;
        let unload_radius = self.unload_distance() * width;

        // Unload first so a shrinking radius frees buffers before new ones arrive
        let far: Vec<ChunkId> = self
            .chunks
            .keys()
            .copied()
            .filter(|id| id.distance_from_point(px, pz) > unload_radius)
            .collect();
        for id in &far {
            self.unload_chunk(*id);
        }

        let center = ChunkId::from_world(px.floor() as i32, pz.floor() as i32);
        let span = self.render_distance as i32 + 1;
        let mut wanted: Vec<ChunkId> = (-span..=span)
            .flat_map(|dz| (-span..=span).map(move |dx| center.offset(dx, dz)))
            .filter(|id| !self.chunks.contains_key(id))
            .filter(|id| id.distance_from_point(px, pz) <= load_radius)
            .collect();
        // Nearest first so they reach the dirty queue first
        wanted.sort_by_key(|id| (id.distance_squared(center), *id));

        for id in &wanted {
            let chunk = self.generator.generate(*id);
            self.attach_chunk(chunk);
        }

        let update = StreamUpdate { loaded: wanted.len(), unloaded: far.len() };
        if !update.is_empty() {
            tracing::debug!(
                loaded = update.loaded,
                unloaded = update.unloaded,
                total = self.chunks.len(),
                "streaming update"
            );
        }
        update
    }

    /// Inserts a chunk built by the host, replacing any chunk with that id.
    ///
    /// An `Empty` chunk is filled by the terrain generator first. The
    /// chunk and its loaded neighbors are marked dirty.
    pub fn insert_chunk(&mut self, mut chunk: Chunk) {
        if chunk.state() == ChunkState::Empty {
            self.generator.populate(&mut chunk);
        }
        if chunk.state() == ChunkState::Meshing {
            chunk.abort_meshing();
        }
        // Any handle it carries refers to a buffer this consumer never saw
        chunk.take_mesh();

        if let Some(old) = self.chunks.remove(&chunk.id()) {
            if old.mesh().is_some() {
                self.consumer.release(old.id());
            }
        }
        self.attach_chunk(chunk);
    }

    fn attach_chunk(&mut self, mut chunk: Chunk) {
        let id = chunk.id();
        chunk.mark_dirty();
        self.chunks.insert(id, chunk);
        self.enqueue(id);

        for neighbor in id.cardinal_neighbors() {
            self.mark_dirty(neighbor);
        }
    }

    fn unload_chunk(&mut self, id: ChunkId) {
        let Some(chunk) = self.chunks.remove(&id) else {
            return;
        };
        if chunk.mesh().is_some() {
            self.consumer.release(id);
        }
        // Seams that faced this chunk now face unloaded space
        for neighbor in id.cardinal_neighbors() {
            self.mark_dirty(neighbor);
        }
    }

    /// True when `id` is in the chunk map.
    #[must_use]
    pub fn is_chunk_loaded(&self, id: ChunkId) -> bool {
        self.chunks.contains_key(&id)
    }

    /// Lifecycle state of a loaded chunk.
    #[must_use]
    pub fn chunk_state(&self, id: ChunkId) -> Option<ChunkState> {
        self.chunks.get(&id).map(Chunk::state)
    }

    /// True when `id` is loaded and its mesh is stale.
    #[must_use]
    pub fn is_chunk_dirty(&self, id: ChunkId) -> bool {
        self.chunks.get(&id).is_some_and(Chunk::is_dirty)
    }

    /// A loaded chunk.
    #[must_use]
    pub fn chunk(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(&id)
    }

    /// Identities of all loaded chunks, in no particular order.
    pub fn loaded_chunks(&self) -> impl Iterator<Item = ChunkId> + '_ {
        self.chunks.keys().copied()
    }

    // =========================================================================
    // DIRTY QUEUE
    // =========================================================================

    fn enqueue(&mut self, id: ChunkId) {
        if self.queued.insert(id) {
            self.dirty_queue.push_back(id);
        }
    }

    /// Marks a loaded chunk dirty. Unloaded ids are ignored.
    fn mark_dirty(&mut self, id: ChunkId) {
        if let Some(chunk) = self.chunks.get_mut(&id) {
            chunk.mark_dirty();
            self.enqueue(id);
        }
    }

    /// Re-meshes up to [`Self::max_meshes_per_frame`] dirty chunks.
    ///
    /// Returns the number of chunks meshed.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Publish`] when the consumer rejects a mesh.
    /// That chunk keeps its old mesh, stays dirty and moves to the back of
    /// the queue; chunks meshed before the failure keep their new meshes.
    pub fn flush_dirty(&mut self) -> WorldResult<usize> {
        self.flush_dirty_with_budget(self.max_meshes_per_frame())
    }

    /// Re-meshes up to `budget` dirty chunks (at least one).
    ///
    /// # Errors
    ///
    /// See [`Self::flush_dirty`].
    pub fn flush_dirty_with_budget(&mut self, budget: usize) -> WorldResult<usize> {
        let budget = budget.max(1);
        let mut meshed = 0;
        // Each queued id is looked at no more than once per flush
        let mut remaining = self.dirty_queue.len();

        while meshed < budget && remaining > 0 {
            remaining -= 1;
            let Some(id) = self.dirty_queue.pop_front() else {
                break;
            };
            self.queued.remove(&id);

            let Some(chunk) = self.chunks.get_mut(&id) else {
                continue;
            };
            if !chunk.is_dirty() {
                continue;
            }
            if !chunk.begin_meshing() {
                self.enqueue(id);
                continue;
            }

            let mesh = match self.chunks.get(&id) {
                Some(chunk) => self.mesher.build(chunk, &self.chunks),
                None => continue,
            };
            let vertices = mesh.triangle_list();

            match self.consumer.publish(id, &vertices) {
                Ok(()) => {
                    if let Some(chunk) = self.chunks.get_mut(&id) {
                        chunk.finish_meshing(MeshHandle {
                            vertex_count: vertices.len(),
                            transparent_start: mesh.transparent_index_start,
                        });
                    }
                    meshed += 1;
                }
                Err(source) => {
                    if let Some(chunk) = self.chunks.get_mut(&id) {
                        chunk.abort_meshing();
                    }
                    self.enqueue(id);
                    self.last_flush_meshed = meshed;
                    tracing::warn!(chunk_x = id.x, chunk_z = id.z, error = %source, "mesh publish failed");
                    return Err(WorldError::Publish { chunk: id, source });
                }
            }
        }

        self.last_flush_meshed = meshed;
        tracing::trace!(meshed, pending = self.dirty_queue.len(), "flushed dirty chunks");
        Ok(meshed)
    }

    /// Flushes until no meshable chunk is dirty. Returns the total meshed.
    ///
    /// # Errors
    ///
    /// See [`Self::flush_dirty`].
    pub fn flush_all(&mut self) -> WorldResult<usize> {
        let mut total = 0;
        loop {
            let meshed = self.flush_dirty_with_budget(self.chunks.len())?;
            if meshed == 0 {
                return Ok(total);
            }
            total += meshed;
        }
    }

    // =========================================================================
    // BLOCK ACCESS
    // =========================================================================

    /// Cell at a world position. Air when unloaded or outside `0..H`.
    #[must_use]
    pub fn get_block(&self, wx: i32, wy: i32, wz: i32) -> BlockCell {
        if !(0..CHUNK_HEIGHT as i32).contains(&wy) {
            return BlockCell::AIR;
        }
        let local = world_to_local(wx, wy, wz);
        #[allow(clippy::cast_sign_loss)]
        let y = wy as usize;
        self.chunks
            .get(&world_to_chunk(wx, wz))
            .map_or(BlockCell::AIR, |chunk| chunk.get(local.x, y, local.z))
    }

    /// Writes a cell. Returns `false` (a no-op) when the chunk is not
    /// loaded or `wy` is outside `0..H`.
    ///
    /// The owning chunk is marked dirty, plus each cardinal neighbor whose
    /// seam the cell touches.
    pub fn set_block(&mut self, wx: i32, wy: i32, wz: i32, cell: BlockCell) -> bool {
        if !(0..CHUNK_HEIGHT as i32).contains(&wy) {
            return false;
        }
        let id = world_to_chunk(wx, wz);
        let local = world_to_local(wx, wy, wz);
        #[allow(clippy::cast_sign_loss)]
        let y = wy as usize;

        let Some(chunk) = self.chunks.get_mut(&id) else {
            return false;
        };
        if !chunk.set(local.x, y, local.z, cell) {
            return false;
        }
        self.enqueue(id);

        if local.on_min_x() {
            self.mark_dirty(id.offset(-1, 0));
        }
        if local.on_max_x() {
            self.mark_dirty(id.offset(1, 0));
        }
        if local.on_min_z() {
            self.mark_dirty(id.offset(0, -1));
        }
        if local.on_max_z() {
            self.mark_dirty(id.offset(0, 1));
        }
        true
    }

    /// Height of the highest non-Air, non-Water cell in a loaded column.
    #[must_use]
    pub fn terrain_height_at(&self, wx: i32, wz: i32) -> Option<i32> {
        let local = world_to_local(wx, 0, wz);
        self.chunks
            .get(&world_to_chunk(wx, wz))?
            .highest_in_column(local.x, local.z, |k| !matches!(k, BlockKind::Air | BlockKind::Water))
            .and_then(|y| i32::try_from(y).ok())
    }

    /// Casts a ray through loaded cells. See [`raycast::cast`].
    #[must_use]
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        raycast::cast(self, origin, direction, max_distance)
    }

    // =========================================================================
    // TARGETED BLOCK
    // =========================================================================

    /// Highlights a block; carried into each [`RenderFrame`].
    pub fn set_targeted_block(&mut self, pos: IVec3) {
        self.targeted_block = Some(pos);
    }

    /// Removes the highlight.
    pub fn clear_targeted_block(&mut self) {
        self.targeted_block = None;
    }

    /// The highlighted block, if any.
    #[must_use]
    pub const fn targeted_block(&self) -> Option<IVec3> {
        self.targeted_block
    }

    // =========================================================================
    // RENDER
    // =========================================================================

    /// Builds the draw list for one frame.
    ///
    /// Every `Ready` chunk with a non-empty mesh whose box passes the
    /// frustum gets a draw command; draws are sorted nearest first. Chunks
    /// with nothing to draw are not frustum tested, so
    /// `chunks_rendered == draw_calls`.
    #[must_use = "the frame holds this tick's draw list"]
    pub fn render(&mut self, viewpoint: &Viewpoint) -> RenderFrame {
        self.culler.update(&viewpoint.view_projection);
        let (px, pz) = (viewpoint.position.x, viewpoint.position.z);

        let mut draws: Vec<(f32, DrawCommand)> = Vec::new();
        for chunk in self.chunks.values() {
            if chunk.state() != ChunkState::Ready {
                continue;
            }
            let Some(mesh) = chunk.mesh().filter(|m| !m.is_empty()) else {
                continue;
            };
            if !self.culler.test_chunk(chunk.id()) {
                continue;
            }
            draws.push((
                chunk.id().distance_from_point(px, pz),
                DrawCommand {
                    chunk: chunk.id(),
                    origin: chunk.id().origin(),
                    vertex_count: mesh.vertex_count,
                    transparent_start: mesh.transparent_start,
                },
            ));
        }
        draws.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.chunk.cmp(&b.1.chunk)));

        let (visible, culled) = self.culler.counts();
        let draws: Vec<DrawCommand> = draws.into_iter().map(|(_, d)| d).collect();
        let stats = RenderStats {
            draw_calls: u32::try_from(draws.len()).unwrap_or(u32::MAX),
            chunks_rendered: visible,
            chunks_culled: culled,
            vertices: draws.iter().map(|d| d.vertex_count as u64).sum(),
        };
        self.last_render = stats;

        RenderFrame { draws, stats, targeted_block: self.targeted_block }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Current statistics.
    #[must_use]
    pub fn stats(&self) -> WorldStats {
        WorldStats {
            loaded_chunks: self.chunks.len(),
            dirty_chunks: self.chunks.values().filter(|c| c.is_dirty()).count(),
            chunks_rendered: self.last_render.chunks_rendered,
            chunks_culled: self.last_render.chunks_culled,
            last_flush_meshed: self.last_flush_meshed,
        }
    }

    /// The mesh consumer.
    #[must_use]
    pub const fn consumer(&self) -> &C {
        &self.consumer
    }

    /// The mesh consumer, mutably.
    pub fn consumer_mut(&mut self) -> &mut C {
        &mut self.consumer
    }
}

impl<C: MeshConsumer> BlockSource for World<C> {
    fn block_at(&self, pos: IVec3) -> BlockCell {
        self.get_block(pos.x, pos.y, pos.z)
    }
}
