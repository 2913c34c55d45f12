//! # Terrain Generator
//!
//! Pure function from `(ChunkId, TerrainParameters)` to a filled chunk.
//!
//! ## Height Model
//!
//! ```text
//! continental = 0.5 * (1 + fbm(wx*f_c, wz*f_c, 4 octaves))
//! ridge       = (1 - |fbm(wx*f_m, wz*f_m, 3 octaves)|)^3        (mountain seed)
//! detail      = ridge * (continental - 0.6) * 2.5   where continental > 0.6
//! height      = clamp(round((continental + detail) * max_height), 1, H-1)
//! ```
//!
//! ## Column Layers (bottom to top)
//!
//! | y                     | block                                   |
//! |-----------------------|-----------------------------------------|
//! | 0                     | Bedrock                                 |
//! | < height-4            | Stone                                   |
//! | height-4 .. height    | Dirt, Sand near water, Stone on peaks   |
//! | height                | Grass, Sand near water, Stone on peaks  |
//! | height < y <= water   | Water                                   |

use cubeworld_shared::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};
use serde::{Deserialize, Serialize};

use crate::block::{BlockCell, BlockKind};
use crate::chunk::Chunk;
use crate::coords::{chunk_origin, ChunkId};
use crate::noise::{ValueNoise, WorldSeed};

/// Continental value above which the ridge layer adds height.
const MOUNTAIN_THRESHOLD: f64 = 0.6;

/// Ridge contribution (fraction of `max_terrain_height`) above which a
/// column is treated as bare rock.
const ROCK_DETAIL_THRESHOLD: f64 = 0.15;

/// Depth of the soil layer under the surface cell.
const SOIL_DEPTH: i32 = 4;

/// Terrain tuning knobs. Changing any of them requires a world reset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParameters {
    /// World seed.
    pub seed: u64,
    /// Frequency of the continental layer.
    pub base_frequency: f64,
    /// Frequency of the mountain ridge layer.
    pub mountain_frequency: f64,
    /// Height reached by `continental == 1.0`, clamped below chunk height.
    pub max_terrain_height: i32,
    /// Air at or below this Y is filled with Water during generation.
    pub water_level: i32,
}

impl TerrainParameters {
    /// Default seed.
    pub const DEFAULT_SEED: u64 = 1337;
    /// Default continental frequency.
    pub const DEFAULT_BASE_FREQUENCY: f64 = 0.0015;
    /// Default ridge frequency.
    pub const DEFAULT_MOUNTAIN_FREQUENCY: f64 = 0.0045;
    /// Default height scale.
    pub const DEFAULT_MAX_TERRAIN_HEIGHT: i32 = 120;
    /// Default sea level.
    pub const DEFAULT_WATER_LEVEL: i32 = 62;

    /// Default parameters with a different seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    /// Copy with every field forced into its valid range.
    ///
    /// Non-finite or non-positive frequencies fall back to the defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let top = CHUNK_HEIGHT as i32 - 1;
        let frequency = |f: f64, fallback: f64| if f.is_finite() && f > 0.0 { f } else { fallback };
        Self {
            seed: self.seed,
            base_frequency: frequency(self.base_frequency, Self::DEFAULT_BASE_FREQUENCY),
            mountain_frequency: frequency(self.mountain_frequency, Self::DEFAULT_MOUNTAIN_FREQUENCY),
            max_terrain_height: self.max_terrain_height.clamp(1, top),
            water_level: self.water_level.clamp(0, top - 1),
        }
    }
}

impl Default for TerrainParameters {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            base_frequency: Self::DEFAULT_BASE_FREQUENCY,
            mountain_frequency: Self::DEFAULT_MOUNTAIN_FREQUENCY,
            max_terrain_height: Self::DEFAULT_MAX_TERRAIN_HEIGHT,
            water_level: Self::DEFAULT_WATER_LEVEL,
        }
    }
}

/// Height and surface class of one world column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSample {
    /// Continental value in [0.5, 1].
    pub continental: f64,
    /// Ridge contribution (0 outside mountain regions).
    pub mountain_detail: f64,
    /// Y of the surface cell.
    pub height: i32,
    /// Bare-rock column.
    pub rocky: bool,
}

/// Chunk generator using layered value noise.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    params: TerrainParameters,
    continental: ValueNoise,
    mountain: ValueNoise,
}

impl TerrainGenerator {
    /// Creates a generator; parameters are sanitized first.
    #[must_use]
    pub fn new(params: TerrainParameters) -> Self {
        let params = params.sanitized();
        let seed = WorldSeed::new(params.seed);
        Self {
            params,
            continental: ValueNoise::new(seed),
            mountain: ValueNoise::new(seed.mountain()),
        }
    }

    /// Parameters in effect.
    #[inline]
    #[must_use]
    pub const fn params(&self) -> &TerrainParameters {
        &self.params
    }

    /// Samples the height model at a world column.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn sample_column(&self, wx: i32, wz: i32) -> ColumnSample {
        let fx = f64::from(wx);
        let fz = f64::from(wz);

        let fc = self.params.base_frequency;
        let continental = 0.5 * (1.0 + self.continental.fbm2d(fx * fc, fz * fc, 4, 0.5));

        let mountain_detail = if continental > MOUNTAIN_THRESHOLD {
            let fm = self.params.mountain_frequency;
            let ridge = (1.0 - self.mountain.fbm2d(fx * fm, fz * fm, 3, 0.5).abs()).powi(3);
            ridge * (continental - MOUNTAIN_THRESHOLD) * 2.5
        } else {
            0.0
        };

        let scaled = ((continental + mountain_detail) * f64::from(self.params.max_terrain_height)).round();
        let height = (scaled as i32).clamp(1, CHUNK_HEIGHT as i32 - 1);

        ColumnSample {
            continental,
            mountain_detail,
            height,
            rocky: mountain_detail > ROCK_DETAIL_THRESHOLD,
        }
    }

    /// Block at height `y` of a column with the given sample.
    #[must_use]
    pub fn block_at(&self, sample: &ColumnSample, y: i32) -> BlockKind {
        let height = sample.height;
        let water = self.params.water_level;
        let near_water = height <= water + 1;

        if y == 0 {
            BlockKind::Bedrock
        } else if y < height - SOIL_DEPTH {
            BlockKind::Stone
        } else if y < height {
            if sample.rocky {
                BlockKind::Stone
            } else if near_water {
                BlockKind::Sand
            } else {
                BlockKind::Dirt
            }
        } else if y == height {
            if sample.rocky {
                BlockKind::Stone
            } else if near_water {
                BlockKind::Sand
            } else {
                BlockKind::Grass
            }
        } else if y <= water {
            BlockKind::Water
        } else {
            BlockKind::Air
        }
    }

    /// Generates a chunk at the given coordinates, state `Generated`.
    #[must_use]
    pub fn generate(&self, id: ChunkId) -> Chunk {
        let mut chunk = Chunk::new(id);
        self.populate(&mut chunk);
        chunk
    }

    /// Writes terrain into an existing chunk and marks it `Generated`.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn populate(&self, chunk: &mut Chunk) {
        let origin = chunk_origin(chunk.id());

        for z in 0..CHUNK_DEPTH {
            for x in 0..CHUNK_WIDTH {
                let sample = self.sample_column(origin.x + x as i32, origin.z + z as i32);
                // Nothing above max(height, water) is ever non-Air
                let top = sample.height.max(self.params.water_level).min(CHUNK_HEIGHT as i32 - 1);
                for y in 0..=top {
                    let kind = self.block_at(&sample, y);
                    chunk.write_raw(x, y as usize, z, BlockCell::new(kind));
                }
                for y in (top + 1) as usize..CHUNK_HEIGHT {
                    chunk.write_raw(x, y, z, BlockCell::AIR);
                }
            }
        }

        chunk.mark_generated();
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(TerrainParameters::default())
    }
}
