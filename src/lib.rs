//! Tundra - streaming procedural snowscape core

pub mod core;
pub mod terrain;
pub mod mesh;
pub mod generation;
pub mod streaming;
pub mod render;
pub mod world;
