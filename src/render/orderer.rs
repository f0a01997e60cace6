//! Front-to-back chunk submission with a cheap behind-viewpoint skip

use crate::core::camera::Viewpoint;
use crate::generation::WorldConfig;
use crate::render::renderer::{Light, MeshRenderer};
use crate::streaming::chunk::Chunk;
use crate::streaming::store::ChunkStore;

/// Counters for one render pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Chunks handed to the renderer
    pub submitted: usize,
    /// Chunks skipped as behind the viewpoint
    pub culled: usize,
    /// Triangles reported by the renderer
    pub triangles: usize,
}

/// Collects resident chunks, sorts by planar distance and submits them.
#[derive(Clone, Debug)]
pub struct RenderOrderer {
    chunk_size: f32,
    /// Expected resident count, used to size the per-pass buffer
    capacity: usize,
}

impl RenderOrderer {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            chunk_size: config.chunk_extent(),
            capacity: config.max_resident_chunks(),
        }
    }

    /// Planar (XZ) distance from the viewpoint to a chunk's center
    pub fn planar_distance(&self, chunk: &Chunk, viewpoint: &Viewpoint) -> f32 {
        let center = chunk.key.center(self.chunk_size);
        let p = viewpoint.position;
        (center.x - p.x).hypot(center.y - p.z)
    }

    /// Whether a chunk's center lies more than one chunk behind the viewpoint.
    ///
    /// Always false in top-down mode.
    pub fn is_behind(&self, chunk: &Chunk, viewpoint: &Viewpoint) -> bool {
        if !viewpoint.culls_behind() {
            return false;
        }
        let center = chunk.key.center(self.chunk_size);
        let to_chunk = glam::Vec2::new(center.x - viewpoint.position.x, center.y - viewpoint.position.z);
        to_chunk.dot(viewpoint.planar_forward()) < -self.chunk_size
    }

    /// Loaded chunks sorted nearest first; equal distances keep store order
    pub fn sorted<'a>(&self, store: &'a ChunkStore, viewpoint: &Viewpoint) -> Vec<&'a Chunk> {
        let mut chunks = Vec::with_capacity(self.capacity);
        store.collect(|_| true, &mut chunks);

        let mut keyed: Vec<(f32, &'a Chunk)> = chunks
            .into_iter()
            .map(|c| (self.planar_distance(c, viewpoint), c))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        keyed.into_iter().map(|(_, c)| c).collect()
    }

    /// Submit every visible chunk front to back.
    ///
    /// Meshes are only borrowed for this call.
    pub fn render(
        &self,
        store: &ChunkStore,
        viewpoint: &Viewpoint,
        lights: &[Light],
        renderer: &mut dyn MeshRenderer,
    ) -> RenderStats {
        let mut stats = RenderStats::default();

        for chunk in self.sorted(store, viewpoint) {
            if self.is_behind(chunk, viewpoint) {
                stats.culled += 1;
                continue;
            }
            stats.submitted += 1;
            for mesh in chunk.meshes() {
                if !mesh.is_empty() {
                    stats.triangles += renderer.render_mesh(mesh, lights);
                }
            }
        }

        log::trace!(
            "Rendered {} chunks ({} culled), {} triangles",
            stats.submitted, stats.culled, stats.triangles
        );
        stats
    }
}
