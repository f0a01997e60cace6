//! Tapered cylinder segments (tree trunks and branches)

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::builder::{MeshBuilder, MeshError};

/// Radius below which a cylinder end is treated as a point
pub const NEGLIGIBLE_RADIUS: f32 = 1e-4;

/// Minimum distance between the end centers
pub const MIN_AXIS_LENGTH: f32 = 0.001;

/// Generalized cylinder between two arbitrary points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CylinderSpec {
    pub bottom_center: Vec3,
    pub top_center: Vec3,
    pub bottom_radius: f32,
    pub top_radius: f32,
    /// Tessellation around the axis (at least 3)
    pub sides: u32,
    /// Rotation of the first side around the axis, in radians
    pub angle_offset: f32,
}

impl CylinderSpec {
    /// Axis length
    pub fn height(&self) -> f32 {
        (self.top_center - self.bottom_center).length()
    }

    /// Check parameters in order: sides, radii, height
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.sides < 3 {
            return Err(MeshError::InvalidArgument("sides"));
        }
        // Negated comparisons also reject NaN
        if !(self.bottom_radius >= 0.0) || !(self.top_radius >= 0.0) {
            return Err(MeshError::InvalidArgument("radius"));
        }
        if !(self.height() > MIN_AXIS_LENGTH) {
            return Err(MeshError::InvalidArgument("height"));
        }
        Ok(())
    }

    /// Triangles [`append_cylinder`] will emit for this spec
    pub fn triangle_count(&self) -> usize {
        if self.bottom_radius < NEGLIGIBLE_RADIUS && self.top_radius < NEGLIGIBLE_RADIUS {
            return 0;
        }
        let sides = self.sides as usize;
        let mut count = sides * 2;
        if self.bottom_radius > NEGLIGIBLE_RADIUS {
            count += sides;
        }
        if self.top_radius > NEGLIGIBLE_RADIUS {
            count += sides;
        }
        count
    }
}

/// Two unit vectors perpendicular to `axis` and to each other, with
/// `right x forward == axis`.
fn ring_basis(axis: Vec3) -> (Vec3, Vec3) {
    let mut right = axis.cross(Vec3::Y);
    if right.length() < 0.1 {
        right = axis.cross(Vec3::X);
    }
    let right = right.normalize();
    let forward = axis.cross(right);
    (right, forward)
}

/// Append a tapered cylinder with outward-facing sides and end caps.
///
/// Caps are emitted only for ends whose radius exceeds
/// [`NEGLIGIBLE_RADIUS`]; a twig tapering to a point simply has no top cap.
///
/// # Returns
/// Number of triangles appended. A cylinder whose both radii are
/// negligible is valid and appends nothing.
///
/// # Errors
/// [`MeshError::InvalidArgument`] for fewer than 3 sides, a negative radius
/// or an axis shorter than [`MIN_AXIS_LENGTH`]; [`MeshError::Allocation`]
/// if the buffer cannot grow. The builder is unchanged on error.
pub fn append_cylinder(builder: &mut MeshBuilder, spec: &CylinderSpec) -> Result<usize, MeshError> {
    spec.validate()?;

    let triangles = spec.triangle_count();
    if triangles == 0 {
        return Ok(0);
    }
    builder.reserve_triangles(triangles)?;

    let axis = (spec.top_center - spec.bottom_center).normalize();
    let (right, forward) = ring_basis(axis);
    let sides = spec.sides as usize;

    let ring = |center: Vec3, radius: f32, i: usize| {
        let angle = spec.angle_offset + i as f32 / sides as f32 * TAU;
        center + (right * angle.cos() + forward * angle.sin()) * radius
    };

    for i in 0..sides {
        let u0 = i as f32 / sides as f32;
        let u1 = (i + 1) as f32 / sides as f32;

        let b1 = ring(spec.bottom_center, spec.bottom_radius, i);
        let b2 = ring(spec.bottom_center, spec.bottom_radius, i + 1);
        let t1 = ring(spec.top_center, spec.top_radius, i);
        let t2 = ring(spec.top_center, spec.top_radius, i + 1);

        // One normal per quad; stays well defined when either ring collapses
        let tangent = (b2 - b1) + (t2 - t1);
        let along = (t1 + t2) - (b1 + b2);
        let n = tangent.cross(along).normalize_or_zero();

        builder.push_triangle(
            [(b1, Vec2::new(u0, 0.0)), (b2, Vec2::new(u1, 0.0)), (t1, Vec2::new(u0, 1.0))],
            n,
        );
        builder.push_triangle(
            [(b2, Vec2::new(u1, 0.0)), (t2, Vec2::new(u1, 1.0)), (t1, Vec2::new(u0, 1.0))],
            n,
        );
    }

    let cap_uv = |i: usize| {
        let angle = i as f32 / sides as f32 * TAU;
        Vec2::new(0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin())
    };
    let center_uv = Vec2::splat(0.5);

    if spec.bottom_radius > NEGLIGIBLE_RADIUS {
        let c = spec.bottom_center;
        for i in 0..sides {
            let v1 = ring(c, spec.bottom_radius, i);
            let v2 = ring(c, spec.bottom_radius, i + 1);
            builder.push_triangle([(c, center_uv), (v2, cap_uv(i + 1)), (v1, cap_uv(i))], -axis);
        }
    }

    if spec.top_radius > NEGLIGIBLE_RADIUS {
        let c = spec.top_center;
        for i in 0..sides {
            let v1 = ring(c, spec.top_radius, i);
            let v2 = ring(c, spec.top_radius, i + 1);
            builder.push_triangle([(c, center_uv), (v1, cap_uv(i)), (v2, cap_uv(i + 1))], axis);
        }
    }

    Ok(triangles)
}
