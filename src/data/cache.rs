use std::hash::Hasher;

use ahash::AHasher;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Content fingerprint
// ---------------------------------------------------------------------------

/// 64-bit fingerprint of uploaded file bytes, used as the cache key.
pub fn fingerprint(bytes: &[u8]) -> u64 {
    let mut hasher = AHasher::default();
    hasher.write(bytes);
    hasher.write_usize(bytes.len());
    hasher.finish()
}

// ---------------------------------------------------------------------------
// LoadCache – size-bounded LRU of parsed datasets
// ---------------------------------------------------------------------------

/// Default number of parsed datasets kept around.
pub const DEFAULT_CAPACITY: usize = 8;

/// Maps a content fingerprint to its parsed [`Dataset`], evicting the least
/// recently used entry once `capacity` is reached.
///
/// The entry list is ordered least → most recently used; with a handful of
/// entries a linear scan beats anything fancier.
#[derive(Debug)]
pub struct LoadCache {
    capacity: usize,
    entries: Vec<(u64, Dataset)>,
}

impl Default for LoadCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl LoadCache {
    pub fn with_capacity(capacity: usize) -> Self {
        LoadCache {
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    /// Look up a dataset by fingerprint, refreshing its recency on a hit.
    pub fn get(&mut self, key: u64) -> Option<&Dataset> {
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        let entry = self.entries.remove(pos);
        self.entries.push(entry);
        self.entries.last().map(|(_, ds)| ds)
    }

    /// Insert a parsed dataset, evicting the least recently used entry when
    /// the cache is full.
    pub fn insert(&mut self, key: u64, dataset: Dataset) {
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries.remove(pos);
        } else if self.entries.len() >= self.capacity {
            let (evicted, _) = self.entries.remove(0);
            log::debug!("evicting cached dataset {evicted:#x}");
        }
        self.entries.push((key, dataset));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_dataset() -> Dataset {
        Dataset::from_records(Vec::new(), 0)
    }

    #[test]
    fn identical_bytes_share_a_fingerprint() {
        assert_eq!(fingerprint(b"abc"), fingerprint(b"abc"));
        assert_ne!(fingerprint(b"abc"), fingerprint(b"abd"));
    }

    #[test]
    fn evicts_least_recently_used_at_capacity() {
        let mut cache = LoadCache::with_capacity(2);
        cache.insert(1, empty_dataset());
        cache.insert(2, empty_dataset());

        // Touch 1 so 2 becomes the LRU entry.
        assert!(cache.get(1).is_some());
        cache.insert(3, empty_dataset());

        assert_eq!(cache.len(), 2);
        assert!(cache.get(2).is_none());
        assert!(cache.get(1).is_some());
        assert!(cache.get(3).is_some());
    }

    #[test]
    fn reinserting_a_key_does_not_grow_the_cache() {
        let mut cache = LoadCache::with_capacity(2);
        cache.insert(1, empty_dataset());
        cache.insert(1, empty_dataset());
        assert_eq!(cache.len(), 1);
    }
}
