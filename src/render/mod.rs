//! Render submission: the renderer interface and front-to-back chunk ordering

pub mod renderer;
pub mod orderer;

pub use renderer::{HeadlessRenderer, Light, MeshRenderer};
pub use orderer::{RenderOrderer, RenderStats};
