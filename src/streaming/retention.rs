//! Set of chunk offsets kept resident around the viewpoint
//!
//! The footprint is the full load square plus a small wedge ahead of the
//! viewpoint. The wedge is laid out in the viewpoint's planar right/forward
//! basis and each rotated offset is rounded to the nearest grid cell. One
//! wedge column sits on the heading itself, so the chunk straight ahead
//! survives eviction along with its right-hand neighbour.

use glam::{IVec2, Vec2};

/// Wedge width in chunks (across the heading)
pub const WEDGE_WIDTH: usize = 2;
/// Wedge depth in chunks (along the heading, beyond the load radius)
pub const WEDGE_DEPTH: usize = 3;
/// Extra slots the wedge can add on top of the load square
pub const WEDGE_SLOTS: usize = WEDGE_WIDTH * WEDGE_DEPTH;

/// Retained offsets relative to the viewpoint's chunk
#[derive(Clone, Debug)]
pub struct RetentionFootprint {
    offsets: Vec<IVec2>,
}

impl RetentionFootprint {
    /// Build the footprint for a load radius and planar basis.
    ///
    /// # Arguments
    /// * `load_radius` - Half-width of the load square in chunks
    /// * `right` - Planar right vector (x, z), unit length
    /// * `forward` - Planar forward vector (x, z), unit length
    pub fn new(load_radius: u32, right: Vec2, forward: Vec2) -> Self {
        let r = load_radius as i32;
        let mut offsets = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize + WEDGE_SLOTS);

        for dz in -r..=r {
            for dx in -r..=r {
                offsets.push(IVec2::new(dx, dz));
            }
        }

        for depth in 1..=WEDGE_DEPTH {
            let along = (load_radius as usize + depth) as f32;
            for column in 0..WEDGE_WIDTH {
                // Heading column first, then its right-hand neighbours
                let across = column as f32;
                let p = right * across + forward * along;
                let cell = IVec2::new(p.x.round() as i32, p.y.round() as i32);
                if !offsets.contains(&cell) {
                    offsets.push(cell);
                }
            }
        }

        Self { offsets }
    }

    /// Whether a chunk at `offset` from the viewpoint's chunk is retained
    pub fn contains(&self, offset: IVec2) -> bool {
        self.offsets.contains(&offset)
    }

    pub fn offsets(&self) -> &[IVec2] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
