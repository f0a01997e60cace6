//! Chunk records: the unit of streaming

use glam::{IVec2, Vec2, Vec3};

use crate::mesh::Mesh;
use crate::streaming::lod::TreeLod;

/// Integer chunk-grid coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkKey {
    pub x: i32,
    pub z: i32,
}

impl ChunkKey {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing a world position.
    ///
    /// Chunk `(cx, cz)` is centered on `(cx * size, cz * size)`, so the
    /// boundaries sit at half-chunk offsets.
    pub fn from_world(position: Vec3, chunk_size: f32) -> Self {
        let half = chunk_size / 2.0;
        Self {
            x: ((position.x + half) / chunk_size).floor() as i32,
            z: ((position.z + half) / chunk_size).floor() as i32,
        }
    }

    /// World XZ center of this chunk
    pub fn center(&self, chunk_size: f32) -> Vec2 {
        Vec2::new(self.x as f32 * chunk_size, self.z as f32 * chunk_size)
    }

    /// Key shifted by a grid offset
    pub fn offset(&self, delta: IVec2) -> Self {
        Self::new(self.x.wrapping_add(delta.x), self.z.wrapping_add(delta.y))
    }

    /// Grid offset from `origin` to this key
    pub fn delta_from(&self, origin: ChunkKey) -> IVec2 {
        IVec2::new(self.x.wrapping_sub(origin.x), self.z.wrapping_sub(origin.z))
    }

    /// Max of the per-axis distances
    pub fn chebyshev_distance(&self, other: ChunkKey) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dz = self.z.abs_diff(other.z);
        dx.max(dz)
    }
}

/// A generated chunk: one ground mesh plus its trees.
///
/// Geometry is fixed at creation. Dropping the chunk releases every mesh.
#[derive(Debug)]
pub struct Chunk {
    pub key: ChunkKey,
    pub ground: Mesh,
    pub trees: Vec<Mesh>,
    /// Detail bucket the trees were built with
    pub lod: TreeLod,
    pub loaded: bool,
}

impl Chunk {
    pub fn new(key: ChunkKey, ground: Mesh, trees: Vec<Mesh>, lod: TreeLod) -> Self {
        Self {
            key,
            ground,
            trees,
            lod,
            loaded: true,
        }
    }

    /// Ground followed by every tree
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        std::iter::once(&self.ground).chain(self.trees.iter())
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes().map(Mesh::triangle_count).sum()
    }

    /// Approximate heap memory held by this chunk's meshes
    pub fn memory_size(&self) -> usize {
        self.meshes().map(Mesh::memory_size).sum()
    }
}
