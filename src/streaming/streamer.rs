//! Per-tick residency policy: evict what left the footprint, load what is missing.

use glam::IVec2;

use crate::core::camera::Viewpoint;
use crate::generation::{ChunkGenerator, WorldConfig};
use crate::streaming::chunk::ChunkKey;
use crate::streaming::lod::tree_lod_for_distance;
use crate::streaming::retention::RetentionFootprint;
use crate::streaming::store::ChunkStore;
use crate::terrain::TerrainParams;

/// What one streaming tick did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Chunks removed by the eviction pass
    pub evicted: usize,
    /// Chunks generated and inserted
    pub loaded: usize,
    /// Required chunks whose generation failed; retried next tick
    pub skipped_chunks: usize,
    /// Trees built across loaded chunks
    pub trees: usize,
    /// Trees dropped (on ice or failed)
    pub skipped_trees: usize,
    /// Resident chunks after the tick
    pub resident: usize,
}

/// Keeps the chunk store in step with a moving viewpoint
#[derive(Clone, Debug)]
pub struct ChunkStreamer {
    config: WorldConfig,
    generator: ChunkGenerator,
}

impl ChunkStreamer {
    pub fn new(config: &WorldConfig) -> Self {
        Self::with_terrain(config, TerrainParams::default())
    }

    pub fn with_terrain(config: &WorldConfig, params: TerrainParams) -> Self {
        Self {
            config: config.clone(),
            generator: ChunkGenerator::with_terrain(config, params),
        }
    }

    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    /// Chunk the viewpoint stands in
    pub fn viewpoint_chunk(&self, viewpoint: &Viewpoint) -> ChunkKey {
        ChunkKey::from_world(viewpoint.position, self.config.chunk_extent())
    }

    /// Retained offsets for the viewpoint's current heading
    pub fn footprint(&self, viewpoint: &Viewpoint) -> RetentionFootprint {
        RetentionFootprint::new(
            self.config.chunk_load_radius,
            viewpoint.planar_right(),
            viewpoint.planar_forward(),
        )
    }

    /// Run one tick: evict, then load.
    ///
    /// Never fails as a whole; a chunk that cannot be generated is
    /// reported in [`TickReport::skipped_chunks`] and retried next tick.
    pub fn tick(&self, store: &mut ChunkStore, viewpoint: &Viewpoint) -> TickReport {
        let evicted = self.evict(store, viewpoint);
        let mut report = self.load(store, viewpoint);
        report.evicted = evicted;
        report.resident = store.len();

        let limit = self.config.max_resident_chunks();
        if store.len() > limit {
            log::warn!("Resident chunks {} exceed limit {}", store.len(), limit);
        }
        if report.evicted > 0 || report.loaded > 0 {
            log::debug!(
                "Streaming tick: evicted {}, loaded {}, skipped {}, resident {}",
                report.evicted, report.loaded, report.skipped_chunks, report.resident
            );
        }
        report
    }

    /// Remove every chunk outside the retention footprint.
    ///
    /// # Returns
    /// Number of chunks evicted
    pub fn evict(&self, store: &mut ChunkStore, viewpoint: &Viewpoint) -> usize {
        let center = self.viewpoint_chunk(viewpoint);
        let footprint = self.footprint(viewpoint);
        store.remove_if(|chunk| !footprint.contains(chunk.key.delta_from(center)))
    }

    /// Generate every missing chunk of the load square.
    pub fn load(&self, store: &mut ChunkStore, viewpoint: &Viewpoint) -> TickReport {
        let center = self.viewpoint_chunk(viewpoint);
        let r = self.config.chunk_load_radius as i32;
        let mut report = TickReport::default();

        for dz in -r..=r {
            for dx in -r..=r {
                let key = center.offset(IVec2::new(dx, dz));
                if store.contains(key) {
                    continue;
                }

                let lod = tree_lod_for_distance(key.chebyshev_distance(center));
                match self.generator.generate(key, lod) {
                    Ok((chunk, stats)) => {
                        store.insert(chunk);
                        report.loaded += 1;
                        report.trees += stats.trees;
                        report.skipped_trees += stats.skipped_trees;
                    }
                    Err(e) => {
                        log::warn!("Failed to generate chunk ({}, {}): {e}", key.x, key.z);
                        report.skipped_chunks += 1;
                    }
                }
            }
        }

        report
    }
}
