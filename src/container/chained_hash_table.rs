use log::{debug, info};

use crate::common::config::{
    Key, Value, GROWTH_LOAD_FACTOR, MIN_CAPACITY, SHRINK_LOAD_FACTOR,
};
use crate::common::exception::HashTableError;
use crate::container::hash_function::bucket_index;

#[derive(Debug, Clone)]
struct Entry {
    key: Key,
    value: Value,
    prev: Option<usize>,
    next: Option<usize>,
}

/** One slot of the bucket array: head/tail of a doubly-linked chain of entries. */
#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    head: Option<usize>,
    tail: Option<usize>,
}

/// A hash table mapping integer keys to integer values with separate chaining.
///
/// Entries live in a slab (`entries` plus a free list of vacated slots); each
/// bucket holds the head and tail indices of its chain, so appends and unlinks
/// are O(1) once the position is known. The table grows when the load factor
/// reaches [`GROWTH_LOAD_FACTOR`] and shrinks when it falls to
/// [`SHRINK_LOAD_FACTOR`] or below, never dropping under [`MIN_CAPACITY`].
///
/// Duplicate keys are allowed and kept as distinct entries in chain order;
/// lookup and removal act on the first match scanning head to tail.
pub struct ChainedHashTable {
    buckets: Vec<Bucket>,
    entries: Vec<Option<Entry>>,
    free_slots: Vec<usize>,
    size: usize,
}

impl ChainedHashTable {
    /// Creates a table with the given number of buckets.
    ///
    /// # Parameters
    /// - `initial_capacity`: The starting bucket count; must be at least 1.
    ///
    /// # Returns
    /// The empty table, or `HashTableError::InvalidCapacity` if the capacity
    /// is zero.
    pub fn new(initial_capacity: usize) -> Result<Self, HashTableError> {
        if initial_capacity < MIN_CAPACITY {
            return Err(HashTableError::InvalidCapacity(initial_capacity));
        }
        Ok(Self {
            buckets: vec![Bucket::default(); initial_capacity],
            entries: Vec::new(),
            free_slots: Vec::new(),
            size: 0,
        })
    }

    /// Number of buckets in the backing array.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current load factor (size / capacity).
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Inserts a key-value pair, appending at the tail of the target chain.
    ///
    /// Duplicate keys are not coalesced: a second insert of the same key adds
    /// a second entry behind the first. If the load factor reaches the growth
    /// threshold once the entry is in place, the bucket array doubles.
    pub fn insert(&mut self, key: Key, value: Value) {
        Self::append(
            &mut self.buckets,
            &mut self.entries,
            &mut self.free_slots,
            key,
            value,
        );
        self.size += 1;

        if self.load_factor() >= GROWTH_LOAD_FACTOR {
            self.resize(self.capacity() * 2);
        }
    }

    /// Removes the first entry matching `key`, scanning its chain head to tail.
    ///
    /// If the removal drops the load factor to the shrink threshold or below
    /// and the table is above its minimum capacity, the bucket array halves.
    ///
    /// # Returns
    /// `true` if an entry was removed, `false` if the key was absent.
    pub fn remove(&mut self, key: Key) -> bool {
        let index = bucket_index(key, self.capacity());
        let mut cursor = self.buckets[index].head;

        while let Some(slot) = cursor {
            let entry = self.entries[slot].as_ref().unwrap();
            if entry.key == key {
                self.unlink(index, slot);
                self.size -= 1;

                if self.load_factor() <= SHRINK_LOAD_FACTOR && self.capacity() > MIN_CAPACITY {
                    self.resize(self.capacity() / 2);
                }
                return true;
            }
            cursor = entry.next;
        }
        false
    }

    /// Looks up the value of the first entry matching `key` in chain order.
    ///
    /// Read-only; never triggers a resize.
    pub fn get(&self, key: Key) -> Option<Value> {
        let index = bucket_index(key, self.capacity());
        let mut cursor = self.buckets[index].head;

        while let Some(slot) = cursor {
            let entry = self.entries[slot].as_ref().unwrap();
            if entry.key == key {
                return Some(entry.value);
            }
            cursor = entry.next;
        }
        None
    }

    /// Rebuilds the table at twice the current capacity.
    ///
    /// Equivalent to the resize a growth-threshold crossing performs, exposed
    /// for callers that want to redistribute entries eagerly.
    pub fn rehash(&mut self) {
        info!("Manual rehash requested at capacity {}", self.capacity());
        self.resize(self.capacity() * 2);
    }

    /// Returns every bucket's chain as (key, value) pairs, head to tail, in
    /// bucket-index order. For external rendering only.
    pub fn dump_buckets(&self) -> Vec<Vec<(Key, Value)>> {
        self.buckets
            .iter()
            .map(|bucket| {
                let mut chain = Vec::new();
                let mut cursor = bucket.head;
                while let Some(slot) = cursor {
                    let entry = self.entries[slot].as_ref().unwrap();
                    chain.push((entry.key, entry.value));
                    cursor = entry.next;
                }
                chain
            })
            .collect()
    }

    /// Rebuilds the backing store at `new_capacity` (clamped to the minimum)
    /// and relocates every entry to its new bucket.
    ///
    /// The replacement store is fully built before it is swapped in, so a
    /// panic mid-build leaves the table untouched and the caller never
    /// observes a half-migrated state.
    fn resize(&mut self, new_capacity: usize) {
        let new_capacity = new_capacity.max(MIN_CAPACITY);
        if new_capacity == self.capacity() {
            return;
        }

        let mut buckets = vec![Bucket::default(); new_capacity];
        let mut entries = Vec::with_capacity(self.size);
        let mut free_slots = Vec::new();

        for bucket in &self.buckets {
            let mut cursor = bucket.head;
            while let Some(slot) = cursor {
                let entry = self.entries[slot].as_ref().unwrap();
                Self::append(
                    &mut buckets,
                    &mut entries,
                    &mut free_slots,
                    entry.key,
                    entry.value,
                );
                cursor = entry.next;
            }
        }

        debug!(
            "Resized table: capacity {} -> {}, {} entries relocated",
            self.capacity(),
            new_capacity,
            self.size
        );

        self.buckets = buckets;
        self.entries = entries;
        self.free_slots = free_slots;
    }

    /// Appends a new entry at the tail of the chain `key` hashes to.
    ///
    /// Operates on the store passed in rather than `self` so `resize` can
    /// populate its replacement store with the same code path.
    fn append(
        buckets: &mut [Bucket],
        entries: &mut Vec<Option<Entry>>,
        free_slots: &mut Vec<usize>,
        key: Key,
        value: Value,
    ) {
        let index = bucket_index(key, buckets.len());
        let tail = buckets[index].tail;

        let entry = Entry {
            key,
            value,
            prev: tail,
            next: None,
        };
        let slot = match free_slots.pop() {
            Some(slot) => {
                entries[slot] = Some(entry);
                slot
            }
            None => {
                entries.push(Some(entry));
                entries.len() - 1
            }
        };

        match tail {
            Some(tail_slot) => entries[tail_slot].as_mut().unwrap().next = Some(slot),
            None => buckets[index].head = Some(slot),
        }
        buckets[index].tail = Some(slot);
    }

    /// Detaches `slot` from its chain, fixing head/tail and neighbor links,
    /// and returns the slot to the free list.
    fn unlink(&mut self, index: usize, slot: usize) {
        let entry = self.entries[slot].take().unwrap();

        match entry.prev {
            Some(prev) => self.entries[prev].as_mut().unwrap().next = entry.next,
            None => self.buckets[index].head = entry.next,
        }
        match entry.next {
            Some(next) => self.entries[next].as_mut().unwrap().prev = entry.prev,
            None => self.buckets[index].tail = entry.prev,
        }

        self.free_slots.push(slot);
    }

    /// Checks the structural invariants, panicking on any violation.
    ///
    /// Walks every chain verifying neighbor links, bucket placement of each
    /// key, the size count, and the slab/free-list accounting.
    pub fn verify_integrity(&self) {
        let mut counted = 0;

        for (index, bucket) in self.buckets.iter().enumerate() {
            let mut cursor = bucket.head;
            let mut prev: Option<usize> = None;

            while let Some(slot) = cursor {
                let entry = self
                    .entries
                    .get(slot)
                    .and_then(|e| e.as_ref())
                    .unwrap_or_else(|| panic!("chain in bucket {} references dead slot {}", index, slot));

                assert_eq!(
                    bucket_index(entry.key, self.capacity()),
                    index,
                    "key {} stored in bucket {} but hashes elsewhere",
                    entry.key,
                    index
                );
                assert_eq!(entry.prev, prev, "broken prev link at slot {}", slot);

                counted += 1;
                prev = Some(slot);
                cursor = entry.next;
            }

            assert_eq!(bucket.tail, prev, "bucket {} tail out of sync", index);
        }

        assert_eq!(counted, self.size, "size does not match chain contents");
        assert_eq!(
            self.entries.iter().filter(|e| e.is_some()).count(),
            self.size,
            "live slab slots do not match size"
        );
        assert_eq!(
            self.free_slots.len() + self.size,
            self.entries.len(),
            "free list does not account for every vacated slot"
        );
    }
}
