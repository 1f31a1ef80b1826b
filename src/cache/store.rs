//! Bounded key-value store with least-recently-used eviction.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::num::NonZeroUsize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Eviction policy of a cache store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Eviction {
    /// Entries live until the store is cleared.
    Unbounded,
    /// At most this many entries; the least recently used one goes first.
    Lru(NonZeroUsize),
}

impl Eviction {
    /// LRU with the given capacity, or [`Eviction::Unbounded`] for zero.
    pub fn lru(capacity: usize) -> Self {
        NonZeroUsize::new(capacity).map_or(Eviction::Unbounded, Eviction::Lru)
    }

    pub fn capacity(&self) -> Option<usize> {
        match self {
            Eviction::Unbounded => None,
            Eviction::Lru(n) => Some(n.get()),
        }
    }
}

struct Entry<V> {
    value: V,
    last_used: u64,
}

/// A map that forgets its least recently used entries once full.
///
/// Both [`get`](Self::get) and [`insert`](Self::insert) count as a use.
pub struct LruStore<K, V> {
    entries: HashMap<K, Entry<V>>,
    recency: BTreeMap<u64, K>,
    eviction: Eviction,
    tick: u64,
    evicted: u64,
}

impl<K: Eq + Hash + Clone, V> LruStore<K, V> {
    pub fn new(eviction: Eviction) -> Self {
        Self {
            entries: HashMap::new(),
            recency: BTreeMap::new(),
            eviction,
            tick: 0,
            evicted: 0,
        }
    }

    pub fn eviction(&self) -> Eviction {
        self.eviction
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Looks up a key and marks it as used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let tick = self.next_tick();
        let entry = self.entries.get_mut(key)?;
        self.recency.remove(&entry.last_used);
        self.recency.insert(tick, key.clone());
        entry.last_used = tick;
        Some(&entry.value)
    }

    /// Looks up a key without touching its recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|e| &e.value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or replaces a value, evicting as needed.
    ///
    /// Returns the previous value for `key`, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let tick = self.next_tick();
        if let Some(entry) = self.entries.get_mut(&key) {
            self.recency.remove(&entry.last_used);
            self.recency.insert(tick, key);
            entry.last_used = tick;
            return Some(std::mem::replace(&mut entry.value, value));
        }

        if let Eviction::Lru(capacity) = self.eviction {
            while self.entries.len() >= capacity.get() {
                let Some((_, oldest)) = self.recency.pop_first() else {
                    break;
                };
                self.entries.remove(&oldest);
                self.evicted += 1;
            }
        }

        self.recency.insert(tick, key.clone());
        self.entries.insert(
            key,
            Entry {
                value,
                last_used: tick,
            },
        );
        None
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let entry = self.entries.remove(key)?;
        self.recency.remove(&entry.last_used);
        Some(entry.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries dropped by the eviction policy so far.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Drops every entry. The eviction counter is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }
}
