//! Bucketed chunk table
//!
//! Fixed number of buckets, each an independent chain. The table does not
//! enforce key uniqueness: callers check [`ChunkStore::contains`] before
//! inserting. Bulk eviction through [`ChunkStore::remove_if`] is the hot
//! path, run once per streaming tick.

use std::collections::VecDeque;

use crate::streaming::chunk::{Chunk, ChunkKey};

/// Default bucket count
pub const DEFAULT_BUCKETS: usize = 9;

/// Spatial hash of a chunk coordinate into `buckets` slots
pub fn bucket_index(key: ChunkKey, buckets: usize) -> usize {
    let h = key.x.wrapping_mul(73_856_093) ^ key.z.wrapping_mul(19_349_663);
    h as u32 as usize % buckets
}

/// Chunk table with chained buckets
#[derive(Debug)]
pub struct ChunkStore {
    buckets: Vec<VecDeque<Chunk>>,
    /// Entries currently linked into a chain
    resident: usize,
}

impl ChunkStore {
    /// Create an empty store
    ///
    /// # Arguments
    /// * `buckets` - Number of chains; clamped to at least 1
    pub fn new(buckets: usize) -> Self {
        Self {
            buckets: (0..buckets.max(1)).map(|_| VecDeque::new()).collect(),
            resident: 0,
        }
    }

    fn bucket(&self, key: ChunkKey) -> usize {
        bucket_index(key, self.buckets.len())
    }

    /// Link a chunk at the head of its chain
    ///
    /// The key must not already be present; a duplicate is not detected
    /// and shadows the older entry until it is removed.
    pub fn insert(&mut self, chunk: Chunk) {
        let b = self.bucket(chunk.key);
        self.buckets[b].push_front(chunk);
        self.resident += 1;
    }

    /// Find a chunk by key
    ///
    /// # Returns
    /// The most recently inserted chunk with this key, if any
    pub fn lookup(&self, key: ChunkKey) -> Option<&Chunk> {
        self.buckets[self.bucket(key)].iter().find(|c| c.key == key)
    }

    pub fn lookup_mut(&mut self, key: ChunkKey) -> Option<&mut Chunk> {
        let b = self.bucket(key);
        self.buckets[b].iter_mut().find(|c| c.key == key)
    }

    pub fn contains(&self, key: ChunkKey) -> bool {
        self.lookup(key).is_some()
    }

    /// Unlink a chunk
    ///
    /// # Returns
    /// The removed chunk, or `None` if the key was absent
    pub fn remove(&mut self, key: ChunkKey) -> Option<Chunk> {
        let b = self.bucket(key);
        let chain = &mut self.buckets[b];
        let pos = chain.iter().position(|c| c.key == key)?;
        let chunk = chain.remove(pos)?;
        self.resident -= 1;
        Some(chunk)
    }

    /// Unlink and drop every chunk matching `predicate`, in one pass.
    ///
    /// # Returns
    /// Number of chunks removed
    pub fn remove_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Chunk) -> bool,
    {
        let mut removed = 0;
        for chain in &mut self.buckets {
            let before = chain.len();
            chain.retain(|chunk| !predicate(chunk));
            removed += before - chain.len();
        }
        self.resident -= removed;
        removed
    }

    /// Gather every loaded chunk matching `predicate` into `out`.
    ///
    /// `out` is cleared first; size it with the expected resident count to
    /// avoid regrowth.
    ///
    /// # Returns
    /// Number of chunks collected
    pub fn collect<'a, F>(&'a self, mut predicate: F, out: &mut Vec<&'a Chunk>) -> usize
    where
        F: FnMut(&Chunk) -> bool,
    {
        out.clear();
        out.extend(self.iter().filter(|&c| c.loaded && predicate(c)));
        out.len()
    }

    /// All entries, bucket by bucket
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.buckets.iter().flat_map(|chain| chain.iter())
    }

    pub fn keys(&self) -> impl Iterator<Item = ChunkKey> + '_ {
        self.iter().map(|c| c.key)
    }

    /// Number of resident chunks
    pub fn len(&self) -> usize {
        self.resident
    }

    pub fn is_empty(&self) -> bool {
        self.resident == 0
    }

    /// Count entries by walking every chain
    pub fn reachable_count(&self) -> usize {
        self.buckets.iter().map(VecDeque::len).sum()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Drop every chunk
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.resident = 0;
    }

    /// Total triangles across resident chunks
    pub fn triangle_count(&self) -> usize {
        self.iter().map(Chunk::triangle_count).sum()
    }

    /// Approximate heap memory held by resident meshes
    pub fn memory_size(&self) -> usize {
        self.iter().map(Chunk::memory_size).sum()
    }
}

impl Default for ChunkStore {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKETS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Mesh, Shading};
    use crate::streaming::lod::TreeLod;

    fn chunk(x: i32, z: i32) -> Chunk {
        Chunk::new(ChunkKey::new(x, z), Mesh::empty(Shading::Ground), Vec::new(), TreeLod::NEAR)
    }

    fn assert_counts(store: &ChunkStore) {
        assert_eq!(store.len(), store.reachable_count());
        assert_eq!(store.len(), store.iter().count());
    }

    #[test]
    fn test_insert_lookup() {
        let mut store = ChunkStore::default();
        store.insert(chunk(1, 2));
        store.insert(chunk(-4, 0));

        assert!(store.contains(ChunkKey::new(1, 2)));
        assert!(store.contains(ChunkKey::new(-4, 0)));
        assert!(!store.contains(ChunkKey::new(2, 1)));
        assert_eq!(store.len(), 2);
        assert_counts(&store);
    }

    #[test]
    fn test_remove() {
        let mut store = ChunkStore::default();
        store.insert(chunk(0, 0));
        store.insert(chunk(0, 1));

        let removed = store.remove(ChunkKey::new(0, 0));
        assert_eq!(removed.map(|c| c.key), Some(ChunkKey::new(0, 0)));
        assert!(store.lookup(ChunkKey::new(0, 0)).is_none());
        assert!(store.remove(ChunkKey::new(0, 0)).is_none());
        assert_eq!(store.len(), 1);
        assert_counts(&store);
    }

    #[test]
    fn test_remove_if_completeness() {
        let mut store = ChunkStore::new(4);
        for x in -5..=5 {
            for z in -5..=5 {
                store.insert(chunk(x, z));
            }
        }
        assert_eq!(store.len(), 121);

        let removed = store.remove_if(|c| c.key.x < 0 || c.key.z == 3);
        assert_eq!(removed, 55 + 6);
        assert!(store.iter().all(|c| !(c.key.x < 0 || c.key.z == 3)));
        assert_counts(&store);
    }

    #[test]
    fn test_count_invariant_through_churn() {
        let mut store = ChunkStore::default();
        for round in 0..20 {
            for i in 0..9 {
                let key = ChunkKey::new(round + i % 3, i / 3);
                if !store.contains(key) {
                    store.insert(chunk(key.x, key.z));
                }
            }
            store.remove_if(|c| c.key.x < round);
            if round % 3 == 0 {
                store.remove(ChunkKey::new(round, 0));
            }
            assert_counts(&store);
        }
    }

    #[test]
    fn test_lookup_follows_reinsert() {
        let mut store = ChunkStore::default();
        let key = ChunkKey::new(3, 3);
        store.insert(chunk(3, 3));
        store.remove_if(|c| c.key == key);
        assert!(store.lookup(key).is_none());
        store.insert(chunk(3, 3));
        assert!(store.lookup(key).is_some());
    }

    #[test]
    fn test_duplicate_insert_shadows_older_entry() {
        let mut store = ChunkStore::default();
        let key = ChunkKey::new(1, 1);
        store.insert(chunk(1, 1));
        store.insert(Chunk::new(key, Mesh::empty(Shading::Ground), Vec::new(), TreeLod::FAR));

        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup(key).map(|c| c.lod), Some(TreeLod::FAR));
        assert_eq!(store.remove_if(|c| c.key == key), 2);
        assert_counts(&store);
    }

    #[test]
    fn test_collect_skips_unloaded() {
        let mut store = ChunkStore::default();
        for x in 0..4 {
            store.insert(chunk(x, 0));
        }
        if let Some(c) = store.lookup_mut(ChunkKey::new(2, 0)) {
            c.loaded = false;
        }

        let mut out = Vec::with_capacity(4);
        let n = store.collect(|_| true, &mut out);
        assert_eq!(n, 3);
        assert!(out.iter().all(|c| c.key != ChunkKey::new(2, 0)));

        let n = store.collect(|c| c.key.x >= 1, &mut out);
        assert_eq!(n, 2);
    }

    #[test]
    fn test_bucket_index_in_range() {
        for x in -50..50 {
            for z in [-1_000_000, -1, 0, 7, i32::MAX] {
                assert!(bucket_index(ChunkKey::new(x, z), 9) < 9);
            }
        }
    }

    #[test]
    fn test_memory_size_tracks_meshes() {
        let mut store = ChunkStore::default();
        store.insert(chunk(0, 0));
        assert_eq!(store.memory_size(), 0);

        let mut ground = Mesh::empty(Shading::Ground);
        ground.vertices = vec![Default::default(); 6];
        ground.face_normals = vec![Default::default(); 2];
        store.insert(Chunk::new(ChunkKey::new(3, 3), ground, Vec::new(), TreeLod::FAR));
        assert!(store.memory_size() >= 6 * 32 + 2 * 12);

        store.remove(ChunkKey::new(3, 3));
        assert_eq!(store.memory_size(), 0);
    }

    #[test]
    fn test_clear() {
        let mut store = ChunkStore::default();
        store.insert(chunk(0, 0));
        store.clear();
        assert!(store.is_empty());
        assert_counts(&store);
    }
}
