//! Chunk residency: the chunk table, retention footprint and per-tick streamer

pub mod chunk;
pub mod store;
pub mod lod;
pub mod retention;
pub mod streamer;

pub use chunk::{Chunk, ChunkKey};
pub use store::{bucket_index, ChunkStore, DEFAULT_BUCKETS};
pub use lod::{lod_from_chunk_distance, tree_lod_for_distance, TreeLod, LOD_CHUNK_DISTANCES, MAX_LOD};
pub use retention::{RetentionFootprint, WEDGE_DEPTH, WEDGE_SLOTS, WEDGE_WIDTH};
pub use streamer::{ChunkStreamer, TickReport};
