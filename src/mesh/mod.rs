//! Triangle mesh buffers and the primitives appended into them

pub mod builder;
pub mod cylinder;
pub mod plane;

pub use builder::{Mesh, MeshBuilder, MeshError, Shading, Vertex};
pub use cylinder::{append_cylinder, CylinderSpec};
pub use plane::{append_ground_plane, PlaneSpec};
