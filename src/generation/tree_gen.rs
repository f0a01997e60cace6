//! Recursive tree mesh generator.
//!
//! A tree is grown depth-first: each call emits one tapered cylinder into a
//! shared [`MeshBuilder`] and then spawns child branches from its top. Every
//! random-looking choice (lean, branch count, angles, radii) is a hash of
//! segment coordinates, level and seed, so a tree is a pure function of its
//! base position and parameters.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::mesh::{append_cylinder, CylinderSpec, MeshBuilder, MeshError};
use crate::terrain::{hash2, ridge_noise};

/// Trunk segment height in world units
pub const TRUNK_HEIGHT: f32 = 8.0;
/// Base outward spread of branches
pub const SPREAD_FACTOR: f32 = 1.25;
/// Branching stops once the (decayed) chance drops to this value
pub const BRANCH_CUTOFF: f32 = 0.2;
/// Per-level multiplier applied to the branch chance
pub const BRANCH_DECAY: f32 = 0.7;
/// Child start is pulled back along its direction by this fraction of its radius
pub const OVERLAP_FACTOR: f32 = 0.6;

const MID_TAPER: f32 = 0.85;
const TERMINAL_TAPER: f32 = 0.01;
const TRUNK_LEAN: f32 = 0.1;
const TRUNK_YAW_JITTER: f32 = 0.15;
const TRUNK_CHANCE_BONUS: f32 = 0.15;
const TRUNK_CHANCE_CAP: f32 = 0.95;

/// Parameters for one tree
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeParams {
    /// Trunk radius at the ground
    pub base_radius: f32,
    /// Initial heading in radians
    pub growth_angle: f32,
    /// Probability-like threshold for spawning branches, decays per level
    pub branch_chance: f32,
    /// Upper bound on children per segment
    pub max_branches: usize,
    /// Levels including trunk and terminal twigs
    pub num_levels: usize,
    /// Tessellation of every segment
    pub sides: u32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            base_radius: 0.5,
            growth_angle: 0.0,
            branch_chance: 0.9,
            max_branches: 4,
            num_levels: 5,
            sides: 8,
        }
    }
}

/// One emitted cylinder
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeSegment {
    pub level: usize,
    pub bottom_center: Vec3,
    pub top_center: Vec3,
    pub bottom_radius: f32,
    pub top_radius: f32,
    /// Index of the parent segment in [`TreeSkeleton::segments`]
    pub parent: Option<usize>,
}

/// What a call to [`TreeGenerator::generate`] produced
#[derive(Clone, Debug, Default)]
pub struct TreeSkeleton {
    /// Segments in emission (depth-first) order; index 0 is the trunk
    pub segments: Vec<TreeSegment>,
    /// Branches aborted by a local error
    pub skipped_branches: usize,
    /// Triangles appended to the mesh
    pub triangles: usize,
}

impl TreeSkeleton {
    /// Children of segment `index`
    pub fn children(&self, index: usize) -> impl Iterator<Item = &TreeSegment> {
        self.segments.iter().filter(move |s| s.parent == Some(index))
    }

    /// Deepest level reached
    pub fn depth(&self) -> usize {
        self.segments.iter().map(|s| s.level + 1).max().unwrap_or(0)
    }
}

/// A branch waiting to be grown
#[derive(Clone, Copy, Debug)]
struct Bud {
    position: Vec3,
    radius: f32,
    angle: f32,
    chance: f32,
    level: usize,
    parent: Option<usize>,
}

/// Seeded tree generator
#[derive(Clone, Copy, Debug)]
pub struct TreeGenerator {
    seed: i32,
}

impl TreeGenerator {
    pub fn new(seed: i32) -> Self {
        Self { seed }
    }

    fn hash(&self, x: f32, z: f32) -> f32 {
        hash2(x as i32, z as i32, self.seed)
    }

    /// Grow a tree rooted at `base` into `builder`.
    ///
    /// # Errors
    /// Fails only if the trunk itself cannot be built (zero levels, fewer
    /// than three sides, a negative radius, allocation failure). Failing
    /// child branches are counted in [`TreeSkeleton::skipped_branches`]
    /// and never affect their siblings or ancestors.
    pub fn generate(
        &self,
        builder: &mut MeshBuilder,
        base: Vec3,
        params: &TreeParams,
    ) -> Result<TreeSkeleton, MeshError> {
        if params.num_levels == 0 {
            return Err(MeshError::InvalidArgument("levels"));
        }

        let mut skeleton = TreeSkeleton::default();
        let root = Bud {
            position: base,
            radius: params.base_radius,
            angle: params.growth_angle,
            chance: params.branch_chance,
            level: 0,
            parent: None,
        };
        self.grow(builder, root, params, &mut skeleton)?;
        Ok(skeleton)
    }

    fn grow(
        &self,
        builder: &mut MeshBuilder,
        bud: Bud,
        params: &TreeParams,
        skeleton: &mut TreeSkeleton,
    ) -> Result<(), MeshError> {
        let level = bud.level;
        let terminal = level + 1 == params.num_levels;
        let mut growth_angle = bud.angle;
        let mut upward = 0.5 + level as f32 * 0.15;

        let (height, taper, lean) = if level == 0 {
            growth_angle += self.hash(bud.position.x, bud.position.z) * TRUNK_YAW_JITTER;
            upward = 1.0;
            (TRUNK_HEIGHT, MID_TAPER, TRUNK_LEAN)
        } else {
            let ridge = ridge_noise(
                bud.position.x + level as f32,
                bud.position.z + level as f32,
                self.seed,
            );
            if terminal {
                ((ridge * 1.2).max(0.3), TERMINAL_TAPER, 0.0)
            } else {
                ((ridge * 3.5).max(0.5), MID_TAPER, SPREAD_FACTOR + level as f32 * 0.05)
            }
        };

        let top_radius = bud.radius * taper;
        let top = bud.position
            + Vec3::new(
                growth_angle.sin() * height * lean,
                height * upward,
                growth_angle.cos() * height * lean,
            );

        let spec = CylinderSpec {
            bottom_center: bud.position,
            top_center: top,
            bottom_radius: bud.radius,
            top_radius,
            sides: params.sides,
            angle_offset: bud.angle,
        };
        skeleton.triangles += append_cylinder(builder, &spec)?;

        let index = skeleton.segments.len();
        skeleton.segments.push(TreeSegment {
            level,
            bottom_center: bud.position,
            top_center: top,
            bottom_radius: bud.radius,
            top_radius,
            parent: bud.parent,
        });

        if terminal || bud.chance <= BRANCH_CUTOFF {
            return Ok(());
        }

        let base_branches = if level == 0 { 4 } else { 2 };
        let variation = self.hash(
            bud.position.x * 37.0 + level as f32,
            bud.position.z * 41.0 + level as f32,
        );
        // Saturating cast: negative variation gives no extras
        let extra = (variation * 2.0 + 0.5) as usize;
        let num_branches = (base_branches + extra).min(params.max_branches);

        let effective_chance = if level == 0 {
            (bud.chance + TRUNK_CHANCE_BONUS).min(TRUNK_CHANCE_CAP)
        } else {
            bud.chance
        };
        let lvl = level as f32;

        for i in 0..num_branches {
            let fi = i as f32;
            let roll = self.hash(top.x * 13.0 + fi * 17.0, top.z * 19.0 + lvl * 23.0);
            if roll > effective_chance {
                continue;
            }

            let radius = top_radius * (0.75 + self.hash(fi * 29.0, lvl * 31.0) * 0.3);

            let branch_angle = if i == 0 {
                growth_angle + self.hash(top.x * 7.0, top.z * 11.0) * 0.5
            } else if self.hash(top.x * 43.0 + lvl, top.z * 47.0 + fi) > 0.3 {
                let even = (i - 1) as f32 / (num_branches - 1) as f32 * TAU;
                even + self.hash(top.x * 11.0 + fi, top.z * 13.0 + lvl) * 0.8
            } else {
                self.hash(top.x * 31.0 + fi, top.z * 37.0 + lvl) * TAU
            };

            let branch_upward = if level + 2 == params.num_levels {
                0.3
            } else {
                0.3 + (lvl + 1.0) * 0.15
            };

            let base_influence = if i == 0 { 0.7 } else { 0.3 };
            let influence = (base_influence + self.hash(top.x * 17.0 + fi, top.z * 19.0 + lvl) * 0.3)
                .clamp(0.1, 0.9);
            let parent_x = growth_angle.sin() * lean;
            let parent_z = growth_angle.cos() * lean;

            let spread = SPREAD_FACTOR + (lvl + 1.0) * 0.05 + self.hash(top.x * 23.0, top.z * 29.0) * 0.3;
            let direction = Vec3::new(
                lerp(branch_angle.sin() * spread, parent_x, influence),
                branch_upward,
                lerp(branch_angle.cos() * spread, parent_z, influence),
            )
            .normalize();

            // Pull the child back into its parent so the joint has no gap
            let overlap = radius * OVERLAP_FACTOR;
            let start = top - direction * Vec3::new(overlap, overlap * 0.5, overlap);

            let child = Bud {
                position: start,
                radius,
                angle: branch_angle,
                chance: bud.chance * BRANCH_DECAY,
                level: level + 1,
                parent: Some(index),
            };
            if let Err(e) = self.grow(builder, child, params, skeleton) {
                log::debug!("Skipping level {} branch: {e}", level + 1);
                skeleton.skipped_branches += 1;
            }
        }

        Ok(())
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}
