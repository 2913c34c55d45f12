//! # Headless Walk
//!
//! Streams the world along a straight line, flushing and rendering every
//! step and picking the block under the crosshair, then prints what the
//! core did.
//!
//! Usage: `cubeworld_walk [config.toml]`

use std::time::{Duration, Instant};

use cubeworld::procedural::BlockCell;
use cubeworld::rendering::MeshStore;
use cubeworld::shared::Vec3;
use cubeworld::{Viewpoint, World, WorldConfig, WorldResult};

/// Blocks walked per step.
const STEP: f32 = 8.0;

/// Steps in the walk.
const STEPS: u32 = 64;

/// Eye height above the ground.
const EYE_HEIGHT: f32 = 1.7;

/// Reach of the crosshair ray.
const REACH: f32 = 8.0;

fn main() -> WorldResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => WorldConfig::load(path)?,
        None => WorldConfig::default(),
    };

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║           CUBEWORLD HEADLESS WALK                                ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  Seed: {:<12} Render distance: {:<4} chunks                  ║", config.terrain.seed, config.render_distance);
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let mut world = World::new(config, MeshStore::new(16));
    let direction = Vec3::new(1.0, -0.35, 0.2).normalized();

    let mut stream_time = Duration::ZERO;
    let mut flush_time = Duration::ZERO;
    let mut render_time = Duration::ZERO;
    let mut max_draws = 0;
    let mut picks = 0;
    let mut eye = Vec3::new(0.5, 100.0, 0.5);

    for step in 0..STEPS {
        #[allow(clippy::cast_precision_loss)]
        let x = step as f32 * STEP + 0.5;

        let start = Instant::now();
        let update = world.update_around(Vec3::new(x, eye.y, eye.z));
        stream_time += start.elapsed();

        let start = Instant::now();
        let meshed = world.flush_dirty()?;
        flush_time += start.elapsed();

        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let ground = world.terrain_height_at(x.floor() as i32, 0).map_or(eye.y, |h| h as f32 + 1.0);
        eye = Vec3::new(x, ground + EYE_HEIGHT, 0.5);

        match world.raycast(eye, direction, REACH) {
            Some(hit) => {
                world.set_targeted_block(hit.block_pos);
                picks += 1;
                // Dig out whatever is under the crosshair every eighth step
                if step % 8 == 0 && !hit.block.kind.is_indestructible() {
                    world.set_block(hit.block_pos.x, hit.block_pos.y, hit.block_pos.z, BlockCell::AIR);
                }
            }
            None => world.clear_targeted_block(),
        }

        let start = Instant::now();
        let frame = world.render(&Viewpoint::perspective(eye, direction, 70f32.to_radians(), 16.0 / 9.0));
        render_time += start.elapsed();
        max_draws = max_draws.max(frame.stats.draw_calls);

        if step % 8 == 0 {
            println!(
                "step {step:>3}  x={x:>7.1}  +{:<3} -{:<3} meshed {meshed}  draws {:>4}  culled {:>4}  target {:?}",
                update.loaded,
                update.unloaded,
                frame.stats.draw_calls,
                frame.stats.chunks_culled,
                frame.targeted_block.map(|p| (p.x, p.y, p.z)),
            );
        }
    }

    let stats = world.stats();
    println!();
    println!("┌─ RESULTS ────────────────────────────────────────────────────────┐");
    println!("│ Loaded chunks:      {}", stats.loaded_chunks);
    println!("│ Dirty chunks:       {}", stats.dirty_chunks);
    println!("│ Published meshes:   {}", world.consumer().len());
    println!("│ Published vertices: {}", world.consumer().total_vertices());
    println!("│ Released meshes:    {}", world.consumer().release_count());
    println!("│ Max draw calls:     {max_draws}");
    println!("│ Crosshair hits:     {picks}/{STEPS}");
    println!("├─ TIMING ─────────────────────────────────────────────────────────┤");
    println!("│ Streaming:          {:.2} ms", stream_time.as_secs_f64() * 1000.0);
    println!("│ Flushing:           {:.2} ms", flush_time.as_secs_f64() * 1000.0);
    println!("│ Rendering:          {:.2} ms", render_time.as_secs_f64() * 1000.0);
    println!("└──────────────────────────────────────────────────────────────────┘");

    Ok(())
}
