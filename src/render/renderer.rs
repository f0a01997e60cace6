//! Renderer interface consumed by the world, plus a headless implementation

use glam::Vec3;

use crate::mesh::Mesh;

/// Light passed along with every mesh
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    /// Direction the light travels (directional) or position (point)
    pub direction: Vec3,
    /// Linear RGB color
    pub color: Vec3,
    pub directional: bool,
}

impl Light {
    /// White sun shining down and along -X/-Z
    pub fn sun() -> Self {
        Self {
            direction: Vec3::new(-1.0, -1.0, -1.0).normalize(),
            color: Vec3::ONE,
            directional: true,
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::sun()
    }
}

/// Something that draws finished meshes.
///
/// Meshes are borrowed for the duration of the call only.
pub trait MeshRenderer {
    /// Draw one mesh; returns the triangles drawn
    fn render_mesh(&mut self, mesh: &Mesh, lights: &[Light]) -> usize;
}

/// Renderer that only counts what it is given
#[derive(Clone, Debug, Default)]
pub struct HeadlessRenderer {
    pub meshes: usize,
    pub triangles: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.meshes = 0;
        self.triangles = 0;
    }
}

impl MeshRenderer for HeadlessRenderer {
    fn render_mesh(&mut self, mesh: &Mesh, _lights: &[Light]) -> usize {
        let triangles = mesh.triangle_count();
        self.meshes += 1;
        self.triangles += triangles;
        triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Shading;

    #[test]
    fn test_sun_is_unit_directional() {
        let sun = Light::default();
        assert!(sun.directional);
        assert!((sun.direction.length() - 1.0).abs() < 1e-6);
        assert!(sun.direction.y < 0.0);
    }

    #[test]
    fn test_headless_counts() {
        let mut renderer = HeadlessRenderer::new();
        let mut mesh = Mesh::empty(Shading::Ground);
        mesh.vertices = vec![Default::default(); 3];
        mesh.face_normals = vec![Vec3::Y];

        assert_eq!(renderer.render_mesh(&mesh, &[Light::sun()]), 1);
        assert_eq!(renderer.render_mesh(&Mesh::empty(Shading::Bark), &[]), 0);
        assert_eq!(renderer.meshes, 2);
        assert_eq!(renderer.triangles, 1);

        renderer.reset();
        assert_eq!(renderer.meshes, 0);
    }
}
