//! # Value Noise Implementation
//!
//! Multi-octave value noise over 1D, 2D and 3D lattices.
//!
//! ## Lattice Hash
//!
//! Each lattice point `n` hashes to `frac(sin(n + seed) * 43758.5453)`,
//! a value in `[0, 1)`. 2D points are flattened as `i + 57*j`, 3D points
//! as `i + 57*j + 113*k`. Corners are blended with smoothstep weights.
//!
//! ## Determinism Guarantee
//!
//! Given the same `WorldSeed`, coordinates, octave count and persistence,
//! every function here returns the same value. The noise is not
//! cryptographically strong and is not meant to match any reference.

/// World seed for deterministic generation.
///
/// All procedural generation derives from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Creates a new world seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The companion seed used by the mountain layer (`seed * 2`).
    #[inline]
    #[must_use]
    pub const fn mountain(self) -> Self {
        Self(self.0.wrapping_mul(2))
    }
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self(1337)
    }
}

/// Smoothstep weight on [0, 1].
#[inline]
fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Seeded value-noise generator.
///
/// # Example
///
/// ```rust,ignore
/// let noise = ValueNoise::new(WorldSeed::new(42));
///
/// let value = noise.noise2d(100.5, 200.3);
/// assert!((0.0..1.0).contains(&value));
///
/// // Layered noise for terrain
/// let terrain = noise.fbm2d(x, z, 4, 0.5);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ValueNoise {
    /// Seed as added to every lattice index.
    offset: f64,
    seed: WorldSeed,
}

impl ValueNoise {
    /// Creates a generator for a seed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            offset: seed.value() as f64,
            seed,
        }
    }

    /// The seed this generator was built from.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Lattice hash in `[0, 1)`.
    #[inline]
    fn hash(&self, n: f64) -> f64 {
        let v = (n + self.offset).sin() * 43_758.545_3;
        v - v.floor()
    }

    /// 1D value noise in `[0, 1)`.
    #[must_use]
    pub fn noise1d(&self, x: f64) -> f64 {
        let i = x.floor();
        let u = smoothstep(x - i);
        lerp(self.hash(i), self.hash(i + 1.0), u)
    }

    /// 2D value noise in `[0, 1)`.
    #[must_use]
    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        let i = x.floor();
        let j = y.floor();
        let u = smoothstep(x - i);
        let v = smoothstep(y - j);

        let a = self.hash(i + 57.0 * j);
        let b = self.hash(i + 1.0 + 57.0 * j);
        let c = self.hash(i + 57.0 * (j + 1.0));
        let d = self.hash(i + 1.0 + 57.0 * (j + 1.0));

        lerp(lerp(a, b, u), lerp(c, d, u), v)
    }

    /// 3D value noise in `[0, 1)`.
    #[must_use]
    pub fn noise3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let i = x.floor();
        let j = y.floor();
        let k = z.floor();
        let u = smoothstep(x - i);
        let v = smoothstep(y - j);
        let w = smoothstep(z - k);

        let corner = |di: f64, dj: f64, dk: f64| {
            self.hash((i + di) + 57.0 * (j + dj) + 113.0 * (k + dk))
        };

        let x00 = lerp(corner(0.0, 0.0, 0.0), corner(1.0, 0.0, 0.0), u);
        let x10 = lerp(corner(0.0, 1.0, 0.0), corner(1.0, 1.0, 0.0), u);
        let x01 = lerp(corner(0.0, 0.0, 1.0), corner(1.0, 0.0, 1.0), u);
        let x11 = lerp(corner(0.0, 1.0, 1.0), corner(1.0, 1.0, 1.0), u);

        lerp(lerp(x00, x10, v), lerp(x01, x11, v), w)
    }

    /// Fractal (fbm) 2D noise.
    ///
    /// Sums `noise2d(x * 2^k, y * 2^k) * persistence^k` for
    /// `k in 0..octaves` and divides by the total amplitude, so the
    /// result stays within the range of a single octave.
    /// Zero octaves yields `0.0`.
    #[must_use]
    pub fn fbm2d(&self, x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves {
            total += self.noise2d(x * frequency, y * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        if max_amplitude > 0.0 {
            total / max_amplitude
        } else {
            0.0
        }
    }

    /// Fractal (fbm) 3D noise. Same accumulation as [`Self::fbm2d`].
    #[must_use]
    pub fn fbm3d(&self, x: f64, y: f64, z: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves {
            total += self.noise3d(x * frequency, y * frequency, z * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        if max_amplitude > 0.0 {
            total / max_amplitude
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_determinism() {
        let seed = WorldSeed::new(12345);
        let noise1 = ValueNoise::new(seed);
        let noise2 = ValueNoise::new(seed);

        // Same seed should produce identical results
        for i in 0..100 {
            let x = f64::from(i) * 0.1;
            let y = f64::from(i) * 0.17;
            assert_eq!(noise1.noise2d(x, y), noise2.noise2d(x, y), "Noise should be deterministic");
            assert_eq!(noise1.fbm2d(x, y, 4, 0.5), noise2.fbm2d(x, y, 4, 0.5));
            assert_eq!(noise1.noise3d(x, y, x), noise2.noise3d(x, y, x));
        }
    }

    #[test]
    fn test_different_seeds_different_results() {
        let noise1 = ValueNoise::new(WorldSeed::new(1));
        let noise2 = ValueNoise::new(WorldSeed::new(2));

        let v1 = noise1.noise2d(100.3, 100.7);
        let v2 = noise2.noise2d(100.3, 100.7);

        assert_ne!(v1, v2, "Different seeds should produce different results");
    }

    #[test]
    fn test_range() {
        let noise = ValueNoise::new(WorldSeed::new(42));
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..10_000 {
            let x = rng.gen_range(-5_000.0..5_000.0);
            let y = rng.gen_range(-5_000.0..5_000.0);
            let z = rng.gen_range(-5_000.0..5_000.0);

            let v2 = noise.noise2d(x, y);
            let v3 = noise.noise3d(x, y, z);
            let v1 = noise.noise1d(x);
            for value in [v1, v2, v3] {
                assert!((0.0..=1.0).contains(&value), "Value {value} out of range at ({x}, {y}, {z})");
            }
        }
    }

    #[test]
    fn test_fbm_stays_in_unit_range() {
        let noise = ValueNoise::new(WorldSeed::new(1337));
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        for octaves in 0..=8 {
            for _ in 0..500 {
                let x = rng.gen_range(-1.0e4..1.0e4);
                let y = rng.gen_range(-1.0e4..1.0e4);
                let v = noise.fbm2d(x, y, octaves, 0.5);
                let w = noise.fbm3d(x, y, x * 0.5, octaves, 0.5);
                assert!((-1.0..=1.0).contains(&v), "fbm2d {v} with {octaves} octaves");
                assert!((-1.0..=1.0).contains(&w), "fbm3d {w} with {octaves} octaves");
            }
        }
    }

    #[test]
    fn test_lattice_points_hit_hash_exactly() {
        let noise = ValueNoise::new(WorldSeed::new(9));
        // At integer coordinates the blend weights vanish
        assert_eq!(noise.noise2d(3.0, 4.0), noise.hash(3.0 + 57.0 * 4.0));
        assert_eq!(noise.noise1d(-2.0), noise.hash(-2.0));
    }

    #[test]
    fn test_continuity() {
        let noise = ValueNoise::new(WorldSeed::new(42));

        // Sample adjacent points - should be similar
        let x = 100.25;
        let y = 100.75;
        let delta = 0.0001;

        let v1 = noise.noise2d(x, y);
        let v2 = noise.noise2d(x + delta, y);
        let v3 = noise.noise2d(x, y + delta);

        assert!((v1 - v2).abs() < 0.01, "Noise should be continuous");
        assert!((v1 - v3).abs() < 0.01, "Noise should be continuous");
    }

    #[test]
    fn test_mountain_seed() {
        assert_eq!(WorldSeed::new(1337).mountain(), WorldSeed::new(2674));
        assert_eq!(WorldSeed::new(u64::MAX).mountain().value(), u64::MAX.wrapping_mul(2));
    }
}
