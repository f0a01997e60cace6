//! Append-only triangle mesh buffer

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use thiserror::Error;

/// Failures while appending geometry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// Degenerate or out-of-range parameter; names the offending parameter
    #[error("invalid mesh argument: {0}")]
    InvalidArgument(&'static str),

    /// Buffer growth failed; the mesh is left at its last valid state
    #[error("failed to grow mesh buffer by {requested} triangles")]
    Allocation { requested: usize },
}

/// Vertex layout handed to the renderer.
/// Tightly packed: 32 bytes, no padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub uv: Vec2,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, uv: Vec2, normal: Vec3) -> Self {
        Self { position, uv, normal }
    }
}

/// Shading reference attached to a mesh
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shading {
    /// Snow-covered ground
    #[default]
    Ground,
    /// Tree bark
    Bark,
}

/// Non-indexed triangle list with one face normal per triangle.
///
/// A mesh is either empty or complete: `face_normals.len() * 3 ==
/// vertices.len()` always holds for meshes produced by [`MeshBuilder`].
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub face_normals: Vec<Vec3>,
    pub shading: Shading,
}

impl Mesh {
    /// Create an empty mesh
    pub fn empty(shading: Shading) -> Self {
        Self {
            vertices: Vec::new(),
            face_normals: Vec::new(),
            shading,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.face_normals.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Either fully empty or a whole number of triangles with matching normals
    pub fn is_valid(&self) -> bool {
        if self.vertices.is_empty() {
            return self.face_normals.is_empty();
        }
        self.vertices.len() % 3 == 0 && self.face_normals.len() == self.vertices.len() / 3
    }

    /// Raw vertex data for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Approximate heap memory held by this mesh
    pub fn memory_size(&self) -> usize {
        self.vertices.capacity() * std::mem::size_of::<Vertex>()
            + self.face_normals.capacity() * std::mem::size_of::<Vec3>()
    }
}

/// Owns a mesh while it is being built.
///
/// Every append reserves its full size before writing anything, so a
/// failed append leaves previously appended geometry untouched.
#[derive(Debug)]
pub struct MeshBuilder {
    mesh: Mesh,
}

impl MeshBuilder {
    pub fn new(shading: Shading) -> Self {
        Self { mesh: Mesh::empty(shading) }
    }

    /// Reserve room for `triangles` more triangles.
    ///
    /// # Errors
    /// [`MeshError::Allocation`] if either buffer cannot grow. Nothing is
    /// written in that case.
    pub fn reserve_triangles(&mut self, triangles: usize) -> Result<(), MeshError> {
        let alloc_err = || MeshError::Allocation { requested: triangles };
        let vertices = triangles.checked_mul(3).ok_or_else(alloc_err)?;
        self.mesh.vertices.try_reserve(vertices).map_err(|_| alloc_err())?;
        self.mesh.face_normals.try_reserve(triangles).map_err(|_| alloc_err())?;
        Ok(())
    }

    /// Append one flat-shaded triangle.
    ///
    /// Callers reserve first; this only writes.
    pub(crate) fn push_triangle(&mut self, corners: [(Vec3, Vec2); 3], face_normal: Vec3) {
        for (position, uv) in corners {
            self.mesh.vertices.push(Vertex::new(position, uv, face_normal));
        }
        self.mesh.face_normals.push(face_normal);
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// In-progress mesh
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Hand over the finished mesh
    pub fn finish(self) -> Mesh {
        self.mesh
    }
}

/// Unit normal of triangle (v0, v1, v2), counter-clockwise front face
pub(crate) fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalize_or_zero()
}
