//! World generation: configuration, recursive trees and chunk synthesis.
//!
//! A chunk is built in one synchronous call:
//! 1. Ground plane displaced by terrain height
//! 2. Tree placement from hashes of the chunk key and seed
//! 3. One recursive tree mesh per placement, at the chunk's LOD

pub mod config;
pub mod tree_gen;
pub mod chunk_gen;

pub use config::WorldConfig;
pub use tree_gen::{TreeGenerator, TreeParams, TreeSegment, TreeSkeleton};
pub use chunk_gen::{ChunkGenStats, ChunkGenerator, TreePlacement, MAX_TREES_PER_CHUNK};
