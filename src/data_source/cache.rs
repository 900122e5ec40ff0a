//! A bounded least-recently-used cache, owned by a single data source instance.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Maps keys to values, evicting the least recently used entry once more than
/// `capacity` distinct keys are stored. A capacity of zero disables caching.
///
/// Not synchronized: one cache belongs to one data source, and callers that want
/// concurrency use one data source per worker.
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    tick: u64,
    entries: HashMap<K, (V, u64)>,
    // tick of last use -> key, oldest first
    recency: BTreeMap<u64, K>,
}

impl<K: Eq + Hash + Clone, V: Clone> LruCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tick: 0,
            entries: HashMap::new(),
            recency: BTreeMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns a clone of the cached value and marks the key as most recently used.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let tick = self.next_tick();
        let (value, last_used) = self.entries.get_mut(key)?;
        self.recency.remove(&*last_used);
        *last_used = tick;
        self.recency.insert(tick, key.clone());
        Some(value.clone())
    }

    /// Stores `value` under `key`. Returns the key evicted to make room, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<K> {
        if self.capacity == 0 {
            return None;
        }
        let tick = self.next_tick();
        if let Some((_, previous)) = self.entries.insert(key.clone(), (value, tick)) {
            self.recency.remove(&previous);
        }
        self.recency.insert(tick, key);

        if self.entries.len() > self.capacity {
            let (_, oldest) = self.recency.pop_first()?;
            self.entries.remove(&oldest);
            return Some(oldest);
        }
        None
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}
