//! World configuration loaded once at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::streaming::retention::WEDGE_SLOTS;

/// Largest accepted load radius; (2r+1)^2 chunks are generated around the viewpoint
pub const MAX_LOAD_RADIUS: u32 = 16;

/// Immutable world parameters shared by terrain, generation and streaming.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for every hash-derived value in the world.
    pub seed: i32,
    /// Edge length of a chunk in world units.
    pub chunk_size: u32,
    /// Ground grid cells per chunk edge.
    pub ground_segments_per_chunk: u32,
    /// Chunks loaded in each direction around the viewpoint chunk.
    pub chunk_load_radius: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 2,
            chunk_size: 32,
            ground_segments_per_chunk: 4,
            chunk_load_radius: 1,
        }
    }
}

/// On-disk layout: world settings live under `"world"`, other sections are ignored.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    world: WorldConfig,
}

impl WorldConfig {
    /// Parse from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json)?;
        file.world.validate()?;
        Ok(file.world)
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from a JSON file, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!(
                    "Loaded world config: seed={}, chunk_size={}, segments={}, load_radius={}",
                    config.seed,
                    config.chunk_size,
                    config.ground_segments_per_chunk,
                    config.chunk_load_radius
                );
                config
            }
            Err(e) => {
                log::warn!("World config {} not loaded ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Reject values the generators cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be positive".into()));
        }
        if self.ground_segments_per_chunk == 0 {
            return Err(Error::Config("ground_segments_per_chunk must be positive".into()));
        }
        if self.ground_segments_per_chunk > self.chunk_size {
            return Err(Error::Config(format!(
                "ground_segments_per_chunk ({}) exceeds chunk_size ({})",
                self.ground_segments_per_chunk, self.chunk_size
            )));
        }
        if self.chunk_load_radius > MAX_LOAD_RADIUS {
            return Err(Error::Config(format!(
                "chunk_load_radius {} exceeds {MAX_LOAD_RADIUS}",
                self.chunk_load_radius
            )));
        }
        Ok(())
    }

    /// Chunk edge length as a float
    pub fn chunk_extent(&self) -> f32 {
        self.chunk_size as f32
    }

    pub fn half_chunk_size(&self) -> f32 {
        self.chunk_size as f32 / 2.0
    }

    /// World-space spacing of the ground grid
    pub fn ground_segment_size(&self) -> f32 {
        self.chunk_size as f32 / self.ground_segments_per_chunk as f32
    }

    /// Chunks in the load square, `(2r+1)^2`
    pub fn load_square_count(&self) -> usize {
        let side = self.chunk_load_radius as usize * 2 + 1;
        side * side
    }

    /// Upper bound on resident chunks: the load square plus the forward wedge
    pub fn max_resident_chunks(&self) -> usize {
        self.load_square_count() + WEDGE_SLOTS
    }
}
