//! Procedural terrain: hash noise and the height function built on it

pub mod noise;
pub use noise::{fbm, hash2, noise2d, ridge_noise};

pub mod generator;
pub use generator::{terrain_height, TerrainGenerator, TerrainParams};
