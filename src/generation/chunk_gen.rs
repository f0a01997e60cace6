//! Chunk synthesis: ground plane plus hash-placed trees.

use std::f32::consts::PI;

use glam::Vec3;

use crate::generation::config::WorldConfig;
use crate::generation::tree_gen::{TreeGenerator, TreeParams};
use crate::mesh::{append_ground_plane, MeshBuilder, MeshError, PlaneSpec, Shading};
use crate::streaming::chunk::{Chunk, ChunkKey};
use crate::streaming::lod::TreeLod;
use crate::terrain::{hash2, TerrainGenerator, TerrainParams};

/// Upper bound on trees per chunk
pub const MAX_TREES_PER_CHUNK: usize = 4;

/// Trees are kept inside this fraction of the half-chunk extent
const TREE_PLACEMENT_EXTENT: f32 = 0.8;

/// Counters for one generated chunk
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkGenStats {
    pub trees: usize,
    pub skipped_trees: usize,
    pub skipped_branches: usize,
}

/// A tree placed in a chunk, before its mesh is grown
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreePlacement {
    pub base: Vec3,
    pub params: TreeParams,
}

/// Builds chunks from `(seed, key)` alone
#[derive(Clone, Debug)]
pub struct ChunkGenerator {
    config: WorldConfig,
    terrain: TerrainGenerator,
    trees: TreeGenerator,
}

impl ChunkGenerator {
    pub fn new(config: &WorldConfig) -> Self {
        Self::with_terrain(config, TerrainParams::default())
    }

    pub fn with_terrain(config: &WorldConfig, params: TerrainParams) -> Self {
        Self {
            config: config.clone(),
            terrain: TerrainGenerator::new(config.seed, params),
            trees: TreeGenerator::new(config.seed),
        }
    }

    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Hash for one per-tree property; `salt` separates properties
    fn tree_hash(&self, key: ChunkKey, tree: usize, salt: i32) -> f32 {
        let t = tree as i32;
        hash2(
            key.x.wrapping_mul(73).wrapping_add(t.wrapping_mul(salt)),
            key.z.wrapping_mul(151).wrapping_sub(salt),
            self.config.seed.wrapping_add(salt),
        )
    }

    /// Where the trees of a chunk go and how they are shaped.
    ///
    /// Trees on the frozen lake are already filtered out; the second value
    /// counts them.
    pub fn tree_placements(&self, key: ChunkKey, lod: TreeLod) -> (Vec<TreePlacement>, usize) {
        let count_roll = hash2(key.x.wrapping_mul(13), key.z.wrapping_mul(7), self.config.seed) * 0.5 + 0.5;
        let count = ((count_roll * (MAX_TREES_PER_CHUNK + 1) as f32) as usize).min(MAX_TREES_PER_CHUNK);

        let center = key.center(self.config.chunk_extent());
        let reach = self.config.half_chunk_size() * TREE_PLACEMENT_EXTENT;
        let mut placements = Vec::with_capacity(count);
        let mut on_ice = 0;

        for t in 0..count {
            let x = center.x + self.tree_hash(key, t, 31) * reach;
            let z = center.y + self.tree_hash(key, t, 43) * reach;
            let y = self.terrain.height_at(x, z);
            // Clamped heights sit exactly on the lake plane
            if y <= self.terrain.lake_level() {
                on_ice += 1;
                continue;
            }

            let params = TreeParams {
                base_radius: 0.5 + self.tree_hash(key, t, 59) * 0.15,
                growth_angle: self.tree_hash(key, t, 61) * PI,
                branch_chance: 0.85 + self.tree_hash(key, t, 67) * 0.1,
                max_branches: (4.0 + self.tree_hash(key, t, 71)).round() as usize,
                num_levels: lod.tree_levels,
                sides: lod.sides,
            };
            placements.push(TreePlacement { base: Vec3::new(x, y, z), params });
        }

        (placements, on_ice)
    }

    /// Generate one chunk.
    ///
    /// # Errors
    /// Only a failed ground plane fails the chunk. A tree that cannot be
    /// built is dropped and counted in [`ChunkGenStats::skipped_trees`].
    pub fn generate(&self, key: ChunkKey, lod: TreeLod) -> Result<(Chunk, ChunkGenStats), MeshError> {
        let plane = PlaneSpec {
            center: key.center(self.config.chunk_extent()),
            size: self.config.chunk_extent(),
            segment_size: self.config.ground_segment_size(),
        };
        let mut ground = MeshBuilder::new(Shading::Ground);
        append_ground_plane(&mut ground, &plane, &self.terrain)?;

        let (placements, on_ice) = self.tree_placements(key, lod);
        let mut stats = ChunkGenStats {
            skipped_trees: on_ice,
            ..Default::default()
        };

        let mut trees = Vec::with_capacity(placements.len());
        for placement in &placements {
            let mut builder = MeshBuilder::new(Shading::Bark);
            match self.trees.generate(&mut builder, placement.base, &placement.params) {
                Ok(skeleton) => {
                    stats.trees += 1;
                    stats.skipped_branches += skeleton.skipped_branches;
                    trees.push(builder.finish());
                }
                Err(e) => {
                    log::debug!("Skipping tree at {:?} in chunk {:?}: {e}", placement.base, key);
                    stats.skipped_trees += 1;
                }
            }
        }

        log::trace!(
            "Generated chunk ({}, {}): {} trees, lod {}",
            key.x, key.z, stats.trees, lod.level
        );

        Ok((Chunk::new(key, ground.finish(), trees, lod), stats))
    }
}
