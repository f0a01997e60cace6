//! The streamed world: chunk store plus the policies that fill and draw it
//!
//! One [`World::tick`] runs the streaming phase (evict, then load); one
//! [`World::render`] runs after it and only reads the store.

pub mod mode;

pub use mode::{GameMode, WorldMode};

use crate::core::camera::Viewpoint;
use crate::generation::WorldConfig;
use crate::render::{Light, MeshRenderer, RenderOrderer, RenderStats};
use crate::streaming::{ChunkStore, ChunkStreamer, TickReport};
use crate::terrain::{TerrainGenerator, TerrainParams};

/// Chunk store, streamer and orderer sharing one immutable config
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    store: ChunkStore,
    streamer: ChunkStreamer,
    orderer: RenderOrderer,
    lights: Vec<Light>,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        Self::with_terrain(config, TerrainParams::default())
    }

    pub fn with_terrain(config: WorldConfig, params: TerrainParams) -> Self {
        log::info!(
            "World seed {} ({}m chunks, load radius {})",
            config.seed, config.chunk_size, config.chunk_load_radius
        );
        Self {
            store: ChunkStore::new(config.load_square_count()),
            streamer: ChunkStreamer::with_terrain(&config, params),
            orderer: RenderOrderer::new(&config),
            lights: vec![Light::sun()],
            config,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn terrain(&self) -> &TerrainGenerator {
        self.streamer.generator().terrain()
    }

    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    /// Streaming phase for one fixed tick
    pub fn tick(&mut self, viewpoint: &Viewpoint) -> TickReport {
        self.streamer.tick(&mut self.store, viewpoint)
    }

    /// Draw resident chunks front to back
    pub fn render(&self, viewpoint: &Viewpoint, renderer: &mut dyn MeshRenderer) -> RenderStats {
        self.orderer.render(&self.store, viewpoint, &self.lights, renderer)
    }

    /// Drop every resident chunk
    pub fn unload_all(&mut self) {
        self.store.clear();
    }
}
