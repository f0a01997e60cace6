//! Level of Detail (LOD) buckets for chunk vegetation
//!
//! Trees in chunks far from the viewpoint get fewer recursion levels and
//! coarser tessellation. The bucket is picked once, when the chunk is
//! generated, from its grid distance to the viewpoint's chunk; the geometry
//! is never rebuilt afterwards.

/// Tree detail used for one chunk
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TreeLod {
    /// Bucket index (0 = full detail)
    pub level: u8,
    /// Tree recursion levels including trunk and twigs
    pub tree_levels: usize,
    /// Cylinder sides per segment
    pub sides: u32,
}

impl TreeLod {
    /// Full detail: viewpoint's own chunk
    pub const NEAR: Self = Self { level: 0, tree_levels: 5, sides: 8 };
    /// Direct neighbors
    pub const MID: Self = Self { level: 1, tree_levels: 4, sides: 6 };
    /// Everything further out
    pub const FAR: Self = Self { level: 2, tree_levels: 3, sides: 4 };
}

/// Chebyshev chunk distance at which each bucket stops applying
pub const LOD_CHUNK_DISTANCES: [u32; 3] = [1, 2, u32::MAX];

/// Maximum LOD bucket
pub const MAX_LOD: u8 = 2;

const BUCKETS: [TreeLod; 3] = [TreeLod::NEAR, TreeLod::MID, TreeLod::FAR];

/// Calculate LOD bucket from chunk distance
///
/// # Arguments
/// * `distance` - Chebyshev distance in chunks from the viewpoint's chunk
///
/// # Returns
/// LOD bucket (0-2)
///
/// # Examples
/// ```
/// use tundra::streaming::lod::lod_from_chunk_distance;
///
/// assert_eq!(lod_from_chunk_distance(0), 0); // Full detail
/// assert_eq!(lod_from_chunk_distance(1), 1);
/// assert_eq!(lod_from_chunk_distance(7), 2); // Coarsest
/// ```
pub fn lod_from_chunk_distance(distance: u32) -> u8 {
    for (level, &max_dist) in LOD_CHUNK_DISTANCES.iter().enumerate() {
        if distance < max_dist {
            return level as u8;
        }
    }
    MAX_LOD
}

/// Tree detail for a chunk at the given distance
pub fn tree_lod_for_distance(distance: u32) -> TreeLod {
    BUCKETS[lod_from_chunk_distance(distance).min(MAX_LOD) as usize]
}
