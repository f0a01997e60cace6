//! Terrain-displaced ground plane

use glam::{Vec2, Vec3};

use super::builder::{face_normal, MeshBuilder, MeshError};
use crate::terrain::TerrainGenerator;

/// Square grid of ground to build
#[derive(Clone, Copy, Debug)]
pub struct PlaneSpec {
    /// World XZ center of the plane
    pub center: Vec2,
    /// Edge length in world units
    pub size: f32,
    /// Requested spacing between grid lines
    pub segment_size: f32,
}

impl PlaneSpec {
    /// Grid cells per edge
    pub fn segments(&self) -> usize {
        ((self.size / self.segment_size).round() as usize).max(1)
    }
}

/// Append a ground plane displaced by terrain height.
///
/// The flat lattice is built first, every lattice point is then lifted to
/// `terrain.height_at`, and only afterwards are face normals taken from the
/// displaced triangles. Vertex normals copy the face normal (flat shading).
///
/// # Returns
/// Number of triangles appended
///
/// # Errors
/// [`MeshError::InvalidArgument`] for a non-positive or non-finite size or
/// segment size, [`MeshError::Allocation`] if the buffer cannot grow.
pub fn append_ground_plane(
    builder: &mut MeshBuilder,
    spec: &PlaneSpec,
    terrain: &TerrainGenerator,
) -> Result<usize, MeshError> {
    if !(spec.size.is_finite() && spec.size > 0.0) {
        return Err(MeshError::InvalidArgument("size"));
    }
    if !(spec.segment_size.is_finite() && spec.segment_size > 0.0) || spec.segment_size > spec.size {
        return Err(MeshError::InvalidArgument("segment_size"));
    }

    let segments = spec.segments();
    let step = spec.size / segments as f32;
    let origin = spec.center - Vec2::splat(spec.size / 2.0);

    let triangles = segments
        .checked_mul(segments)
        .and_then(|cells| cells.checked_mul(2))
        .ok_or(MeshError::Allocation { requested: usize::MAX })?;
    builder.reserve_triangles(triangles)?;

    let stride = segments + 1;
    let points = stride
        .checked_mul(stride)
        .ok_or(MeshError::Allocation { requested: triangles })?;
    let mut lattice: Vec<Vec3> = Vec::new();
    lattice
        .try_reserve_exact(points)
        .map_err(|_| MeshError::Allocation { requested: triangles })?;

    // Flat lattice
    for j in 0..stride {
        for i in 0..stride {
            lattice.push(Vec3::new(
                origin.x + i as f32 * step,
                0.0,
                origin.y + j as f32 * step,
            ));
        }
    }

    // Displacement
    for p in &mut lattice {
        p.y = terrain.height_at(p.x, p.z);
    }

    let uv = |i: usize, j: usize| Vec2::new(i as f32 / segments as f32, j as f32 / segments as f32);
    for j in 0..segments {
        for i in 0..segments {
            let p00 = lattice[j * stride + i];
            let p10 = lattice[j * stride + i + 1];
            let p01 = lattice[(j + 1) * stride + i];
            let p11 = lattice[(j + 1) * stride + i + 1];

            let n = face_normal(p00, p01, p10);
            builder.push_triangle([(p00, uv(i, j)), (p01, uv(i, j + 1)), (p10, uv(i + 1, j))], n);

            let n = face_normal(p10, p01, p11);
            builder.push_triangle([(p10, uv(i + 1, j)), (p01, uv(i, j + 1)), (p11, uv(i + 1, j + 1))], n);
        }
    }

    Ok(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Shading;
    use crate::terrain::TerrainParams;

    fn terrain() -> TerrainGenerator {
        TerrainGenerator::new(2, TerrainParams::default())
    }

    #[test]
    fn test_plane_triangle_count() {
        let mut builder = MeshBuilder::new(Shading::Ground);
        let spec = PlaneSpec { center: Vec2::ZERO, size: 32.0, segment_size: 8.0 };
        let count = append_ground_plane(&mut builder, &spec, &terrain()).unwrap();

        assert_eq!(count, 32);
        let mesh = builder.finish();
        assert_eq!(mesh.triangle_count(), 32);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_plane_is_displaced() {
        let terrain = terrain();
        let mut builder = MeshBuilder::new(Shading::Ground);
        let spec = PlaneSpec { center: Vec2::new(64.0, -32.0), size: 32.0, segment_size: 4.0 };
        append_ground_plane(&mut builder, &spec, &terrain).unwrap();

        for v in &builder.mesh().vertices {
            let expected = terrain.height_at(v.position.x, v.position.z);
            assert_eq!(v.position.y, expected);
            assert!(v.position.x >= 48.0 - 1e-3 && v.position.x <= 80.0 + 1e-3);
            assert!(v.position.z >= -48.0 - 1e-3 && v.position.z <= -16.0 + 1e-3);
        }
    }

    #[test]
    fn test_plane_normals_face_up_and_match_geometry() {
        let mut builder = MeshBuilder::new(Shading::Ground);
        let spec = PlaneSpec { center: Vec2::ZERO, size: 32.0, segment_size: 2.0 };
        append_ground_plane(&mut builder, &spec, &terrain()).unwrap();
        let mesh = builder.finish();

        for (t, n) in mesh.face_normals.iter().enumerate() {
            assert!(n.y > 0.0, "normal {n:?} points down");
            let v = &mesh.vertices[t * 3..t * 3 + 3];
            let expected = face_normal(v[0].position, v[1].position, v[2].position);
            assert!((*n - expected).length() < 1e-5);
            assert!(v.iter().all(|vert| vert.normal == *n));
        }
    }

    #[test]
    fn test_plane_rejects_bad_sizes() {
        let t = terrain();
        let mut builder = MeshBuilder::new(Shading::Ground);

        let spec = PlaneSpec { center: Vec2::ZERO, size: 0.0, segment_size: 1.0 };
        assert_eq!(append_ground_plane(&mut builder, &spec, &t), Err(MeshError::InvalidArgument("size")));

        let spec = PlaneSpec { center: Vec2::ZERO, size: 32.0, segment_size: -1.0 };
        assert_eq!(
            append_ground_plane(&mut builder, &spec, &t),
            Err(MeshError::InvalidArgument("segment_size"))
        );

        let spec = PlaneSpec { center: Vec2::ZERO, size: 4.0, segment_size: 8.0 };
        assert!(append_ground_plane(&mut builder, &spec, &t).is_err());

        assert!(builder.mesh().is_empty());
    }

    #[test]
    fn test_plane_too_fine_reports_allocation() {
        let t = terrain();
        let mut builder = MeshBuilder::new(Shading::Ground);
        let spec = PlaneSpec { center: Vec2::ZERO, size: 32.0, segment_size: 8.0 };
        append_ground_plane(&mut builder, &spec, &t).unwrap();

        // Cell count overflows usize
        let spec = PlaneSpec { center: Vec2::ZERO, size: 32.0, segment_size: 1e-12 };
        assert!(matches!(
            append_ground_plane(&mut builder, &spec, &t),
            Err(MeshError::Allocation { .. })
        ));

        // Fits in usize but not in memory
        let spec = PlaneSpec { center: Vec2::ZERO, size: 32.0, segment_size: 1e-5 };
        assert!(matches!(
            append_ground_plane(&mut builder, &spec, &t),
            Err(MeshError::Allocation { .. })
        ));

        // Earlier geometry is untouched
        let mesh = builder.finish();
        assert_eq!(mesh.triangle_count(), 32);
        assert!(mesh.is_valid());
    }
}
