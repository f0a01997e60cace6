//! Viewpoint that drives streaming and render ordering

use crate::core::types::{Quat, Vec2, Vec3};
use crate::terrain::TerrainGenerator;

/// How the viewpoint looks at the world
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Walking camera; chunks behind it may be skipped
    #[default]
    FirstPerson,
    /// Looking straight down; "behind" has no meaning
    TopDown,
}

/// Position and orientation of the observer
#[derive(Clone, Copy, Debug)]
pub struct Viewpoint {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
    /// Current view mode
    pub mode: ViewMode,
}

impl Viewpoint {
    /// Create a viewpoint at `position` looking down -Z
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            mode: ViewMode::FirstPerson,
        }
    }

    /// Create a viewpoint with yaw and pitch in radians
    pub fn with_euler(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut viewpoint = Self::new(position);
        viewpoint.set_rotation_euler(yaw, pitch);
        viewpoint
    }

    /// Get forward direction (negative Z in view space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get right direction (positive X in view space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Forward direction projected onto the XZ plane, normalized.
    ///
    /// Falls back to the projected up vector when looking straight down,
    /// so a top-down camera still has a usable heading.
    pub fn planar_forward(&self) -> Vec2 {
        let f = self.forward();
        let planar = Vec2::new(f.x, f.z);
        if planar.length_squared() > 1e-6 {
            return planar.normalize();
        }
        let up = self.rotation * Vec3::Y;
        let planar_up = Vec2::new(up.x, up.z);
        if planar_up.length_squared() > 1e-6 {
            planar_up.normalize()
        } else {
            Vec2::new(0.0, -1.0)
        }
    }

    /// Right direction projected onto the XZ plane, normalized
    pub fn planar_right(&self) -> Vec2 {
        let f = self.planar_forward();
        // (x, z) rotated a quarter turn clockwise seen from above
        Vec2::new(-f.y, f.x)
    }

    /// Set rotation from euler angles (yaw, pitch in radians)
    pub fn set_rotation_euler(&mut self, yaw: f32, pitch: f32) {
        self.rotation = Quat::from_euler(glam::EulerRot::YXZ, yaw, pitch, 0.0);
    }

    /// Whether the behind-camera cull applies in the current mode
    pub fn culls_behind(&self) -> bool {
        self.mode != ViewMode::TopDown
    }

    /// Snap height to the ground plus a clearance that grows with altitude.
    ///
    /// Uses the interpolated height so that continuous motion gives a
    /// continuous camera height.
    pub fn follow_terrain(&mut self, terrain: &TerrainGenerator) -> f32 {
        let ground = terrain.interpolated_height(self.position.x, self.position.z);
        let clearance = (ground.abs() * 0.1 + 2.0).max(3.0);
        self.position.y = ground + clearance;
        ground
    }
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 5.0, 0.0))
    }
}
