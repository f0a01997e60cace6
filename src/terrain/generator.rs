//! Noise-based procedural terrain height

use super::noise::{fbm, lerp, ridge_noise, smoothstep};

/// Parameters controlling terrain height
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    pub lake_level: f32,         // Floor for every height; flat frozen lakes below it
    pub hill_amplitude: f32,     // Large rolling hills
    pub medium_amplitude: f32,   // Medium-scale relief
    pub detail_amplitude: f32,   // Small bumps
    pub warp_strength: f32,      // Domain warp applied before the ridge layer
    pub mountain_amplitude: f32, // Peak height where the mountain mask is high
    pub base_offset: f32,        // Lowers the base so valleys dip below the lake
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            lake_level: 0.0,
            hill_amplitude: 25.0,
            medium_amplitude: 12.0,
            detail_amplitude: 4.0,
            warp_strength: 20.0,
            mountain_amplitude: 35.0,
            base_offset: 8.0,
        }
    }
}

const HILL_FREQUENCY: f32 = 0.003;
const MEDIUM_FREQUENCY: f32 = 0.008;
const DETAIL_FREQUENCY: f32 = 0.02;
const WARP_FREQUENCY: f32 = 0.005;
const MOUNTAIN_FREQUENCY: f32 = 0.004;
const MASK_FREQUENCY: f32 = 0.002;

/// Pure height function of `(x, z, seed, params)`.
///
/// Blends rolling hills, medium relief and detail, then adds domain-warped
/// ridges where a low-frequency mask is high. The result never drops below
/// `params.lake_level`.
pub fn terrain_height(x: f32, z: f32, seed: i32, params: &TerrainParams) -> f32 {
    let layer = |offset: i32| seed.wrapping_add(offset);

    let large_hills = fbm(x * HILL_FREQUENCY, z * HILL_FREQUENCY, 4, layer(0)) * params.hill_amplitude;
    let medium_hills = fbm(x * MEDIUM_FREQUENCY, z * MEDIUM_FREQUENCY, 5, layer(1)) * params.medium_amplitude;
    let detail = fbm(x * DETAIL_FREQUENCY, z * DETAIL_FREQUENCY, 6, layer(2)) * params.detail_amplitude;

    let warp_x = fbm(x * WARP_FREQUENCY, z * WARP_FREQUENCY, 3, layer(3)) * params.warp_strength;
    let warp_z = fbm(x * WARP_FREQUENCY, z * WARP_FREQUENCY, 3, layer(4)) * params.warp_strength;

    let ridge = ridge_noise(
        (x + warp_x) * MOUNTAIN_FREQUENCY,
        (z + warp_z) * MOUNTAIN_FREQUENCY,
        layer(5),
    );
    let mountains = ridge.powf(1.5) * params.mountain_amplitude;

    let base = large_hills + medium_hills * 0.7 + detail * 0.3 - params.base_offset;
    let mask = smoothstep(fbm(x * MASK_FREQUENCY, z * MASK_FREQUENCY, 3, layer(6)) * 0.5 + 0.5);

    // f32::max returns the lake level for a NaN height as well
    (base + mountains * mask).max(params.lake_level)
}

/// Seeded terrain height sampler
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    seed: i32,
    params: TerrainParams,
}

impl TerrainGenerator {
    /// Create a new terrain generator
    pub fn new(seed: i32, params: TerrainParams) -> Self {
        Self { seed, params }
    }

    /// World seed
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Get terrain parameters
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Minimum height any sample can take
    pub fn lake_level(&self) -> f32 {
        self.params.lake_level
    }

    /// Get terrain height at world position (x, z)
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        terrain_height(x, z, self.seed, &self.params)
    }

    /// Bilinear height over the unit lattice cell containing (x, z).
    ///
    /// Exact at integer points and continuous between them, so a camera
    /// sliding across the ground never jumps.
    pub fn interpolated_height(&self, x: f32, z: f32) -> f32 {
        let x0 = x.floor();
        let z0 = z.floor();
        let fx = x - x0;
        let fz = z - z0;

        let h00 = self.height_at(x0, z0);
        let h10 = self.height_at(x0 + 1.0, z0);
        let h01 = self.height_at(x0, z0 + 1.0);
        let h11 = self.height_at(x0 + 1.0, z0 + 1.0);

        let h0 = lerp(h00, h10, fx);
        let h1 = lerp(h01, h11, fx);
        lerp(h0, h1, fz)
    }
}
