//! Generic open-addressing hash table
//!
//! Provides:
//! - Linear probing from a deterministic home slot
//! - Proactive doubling growth (or a fixed capacity with `TableFull`)
//! - Probe loops bounded by the capacity, so misses never spin
//! - Removal by backward shift, or by plain reset when configured
//! - Shrink-to-fit compaction

use crate::config::{RemovalStrategy, TableConfig};
use crate::error::{Result, TableError};
use crate::hasher::SlotHash;
use crate::slot::{empty_slots, Entry, Slot};
use std::borrow::Borrow;
use std::fmt;

/// Outcome of walking a probe sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Probe {
    /// Slot holding an equal key
    Found(usize),
    /// First empty slot where the key may be placed
    Vacant(usize),
    /// Every slot was visited without a match or a vacancy
    Exhausted,
}

/// Hash table over a single contiguous slot buffer
///
/// The table exclusively owns its slots and the keys and values in them. Growth
/// and compaction move every entry into a new buffer, so no borrow of an entry
/// or iterator can outlive a mutating call.
#[derive(Clone)]
pub struct HashTable<K, V> {
    /// Slot buffer; its length is the capacity
    pub(crate) slots: Vec<Slot<K, V>>,

    /// Number of occupied slots
    pub(crate) count: usize,

    pub(crate) config: TableConfig,

    /// Rehashes performed so far (growth and compaction)
    pub(crate) rehashes: usize,
}

impl<K, V> HashTable<K, V> {
    /// Create a growable table with the default capacity
    pub fn new() -> Self {
        Self::from_valid_config(TableConfig::default())
    }

    /// Create a growable table with `capacity` initial slots
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(TableConfig::default().with_initial_capacity(capacity))
    }

    /// Create a table that never grows beyond `capacity` slots
    pub fn fixed(capacity: usize) -> Result<Self> {
        Self::with_config(
            TableConfig::default()
                .with_initial_capacity(capacity)
                .growable(false),
        )
    }

    /// Create a table from an explicit configuration
    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TableConfig) -> Self {
        tracing::trace!(?config, "creating hash table");
        HashTable {
            slots: empty_slots(config.initial_capacity),
            count: 0,
            config,
            rehashes: 0,
        }
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current slot count
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Ratio of occupied slots to capacity
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.slots.len() as f64
    }

    pub fn is_growable(&self) -> bool {
        self.config.growable
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Number of rehashes performed since creation
    pub fn rehash_count(&self) -> usize {
        self.rehashes
    }

    /// Remove every entry, keeping the current capacity
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = Slot::Empty);
        self.count = 0;
    }

    /// Mutable access to the value of an occupied slot
    fn value_at_mut(&mut self, idx: usize) -> Result<&mut V> {
        match &mut self.slots[idx] {
            Slot::Occupied(entry) => Ok(&mut entry.value),
            Slot::Empty => Err(TableError::KeyNotFound),
        }
    }
}

impl<K, V> HashTable<K, V>
where
    K: SlotHash + Eq,
{
    /// Walk the probe sequence of `key`, stopping at a match or an empty slot
    ///
    /// At most `capacity` slots are visited.
    fn probe<Q>(&self, key: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: SlotHash + Eq + ?Sized,
    {
        let capacity = self.slots.len();
        let start = key.slot_index(capacity);

        for step in 0..capacity {
            let idx = (start + step) % capacity;
            match &self.slots[idx] {
                Slot::Empty => return Probe::Vacant(idx),
                Slot::Occupied(entry) if key.eq(entry.key.borrow()) => return Probe::Found(idx),
                Slot::Occupied(_) => {}
            }
        }

        Probe::Exhausted
    }

    /// Probe for insertion
    ///
    /// With `Reset` removal an equal key may sit past an empty slot, so the whole
    /// cycle is scanned and the first vacancy remembered. Keys stay unique either way.
    fn probe_for_insert(&self, key: &K) -> Probe {
        if self.config.removal == RemovalStrategy::BackwardShift {
            return self.probe(key);
        }

        let capacity = self.slots.len();
        let start = key.slot_index(capacity);
        let mut vacancy = None;

        for step in 0..capacity {
            let idx = (start + step) % capacity;
            match &self.slots[idx] {
                Slot::Empty if vacancy.is_none() => vacancy = Some(idx),
                Slot::Empty => {}
                Slot::Occupied(entry) if entry.key == *key => return Probe::Found(idx),
                Slot::Occupied(_) => {}
            }
        }

        vacancy.map_or(Probe::Exhausted, Probe::Vacant)
    }

    /// Pick the slot a new key will occupy, growing first when needed
    fn claim_vacancy(&mut self, key: &K, probe: Probe) -> Result<usize> {
        let capacity = self.slots.len();

        if self.config.growable && self.count + 1 >= capacity {
            let target = self.grown_capacity(self.count + 1)?;
            self.rehash(target, "grow");
            return match self.probe_for_insert(key) {
                Probe::Vacant(idx) => Ok(idx),
                _ => Err(TableError::TableFull { capacity: target }),
            };
        }

        match probe {
            Probe::Vacant(idx) => Ok(idx),
            _ => Err(TableError::TableFull { capacity }),
        }
    }

    /// Smallest doubling of the current capacity strictly greater than `needed`
    fn grown_capacity(&self, needed: usize) -> Result<usize> {
        let capacity = self.slots.len();
        let mut target = capacity;
        while target <= needed {
            target = target
                .checked_mul(2)
                .ok_or(TableError::CapacityOverflow { capacity })?;
        }
        Ok(target)
    }

    /// Move every entry into a fresh buffer of `new_capacity` slots
    ///
    /// Requires `new_capacity >= count` and `new_capacity > 0`.
    fn rehash(&mut self, new_capacity: usize, reason: &'static str) {
        debug_assert!(new_capacity > 0 && new_capacity >= self.count);

        let old_capacity = self.slots.len();
        let old_slots = std::mem::replace(&mut self.slots, empty_slots(new_capacity));

        for slot in old_slots {
            if let Slot::Occupied(entry) = slot {
                let mut idx = entry.key.slot_index(new_capacity);
                while self.slots[idx].is_occupied() {
                    idx = (idx + 1) % new_capacity;
                }
                self.slots[idx] = Slot::Occupied(entry);
            }
        }

        self.rehashes += 1;
        tracing::debug!(
            reason,
            old_capacity,
            new_capacity,
            entries = self.count,
            "rehashed table"
        );
    }

    fn occupy(&mut self, idx: usize, key: K, value: V) {
        self.slots[idx] = Slot::Occupied(Entry::new(key, value));
        self.count += 1;
    }

    /// Insert or update a key
    ///
    /// Returns the previous value when the key was already present. A new key
    /// on a growable table that would fill its last empty slot doubles the
    /// capacity first, so `len() < capacity()` holds after every insertion.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        match self.probe_for_insert(&key) {
            Probe::Found(idx) => {
                let slot_value = self.value_at_mut(idx)?;
                Ok(Some(std::mem::replace(slot_value, value)))
            }
            probe => {
                let idx = self.claim_vacancy(&key, probe)?;
                self.occupy(idx, key, value);
                Ok(None)
            }
        }
    }

    /// Value for `key`, inserting `make()` first if the key is absent
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> Result<&mut V>
    where
        F: FnOnce() -> V,
    {
        let idx = match self.probe_for_insert(&key) {
            Probe::Found(idx) => idx,
            probe => {
                let idx = self.claim_vacancy(&key, probe)?;
                self.occupy(idx, key, make());
                idx
            }
        };
        self.value_at_mut(idx)
    }

    /// Subscript access: value for `key`, inserting `V::default()` on a miss
    pub fn get_or_insert_default(&mut self, key: K) -> Result<&mut V>
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: SlotHash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Result<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: SlotHash + Eq + ?Sized,
    {
        match self.probe(key) {
            Probe::Found(idx) => self.slots[idx].as_pair().ok_or(TableError::KeyNotFound),
            _ => Err(TableError::KeyNotFound),
        }
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: SlotHash + Eq + ?Sized,
    {
        match self.probe(key) {
            Probe::Found(idx) => self.value_at_mut(idx),
            _ => Err(TableError::KeyNotFound),
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: SlotHash + Eq + ?Sized,
    {
        matches!(self.probe(key), Probe::Found(_))
    }

    /// Index of the slot currently holding `key`
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: SlotHash + Eq + ?Sized,
    {
        match self.probe(key) {
            Probe::Found(idx) => Some(idx),
            _ => None,
        }
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: SlotHash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Remove `key` and return the owned pair
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V)>
    where
        K: Borrow<Q>,
        Q: SlotHash + Eq + ?Sized,
    {
        let idx = match self.probe(key) {
            Probe::Found(idx) => idx,
            _ => return Err(TableError::KeyNotFound),
        };

        let entry = self.slots[idx].take().ok_or(TableError::KeyNotFound)?;
        self.count -= 1;

        if self.config.removal == RemovalStrategy::BackwardShift {
            self.shift_back(idx);
        }

        Ok(entry.into_pair())
    }

    /// Close the hole at `hole` by pulling later cluster members back
    ///
    /// An entry may move into the hole only if the hole lies on its probe path,
    /// between its home slot and where it currently sits.
    fn shift_back(&mut self, mut hole: usize) {
        let capacity = self.slots.len();
        let mut idx = hole;

        for _ in 1..capacity {
            idx = (idx + 1) % capacity;
            let home = match &self.slots[idx] {
                Slot::Empty => return,
                Slot::Occupied(entry) => entry.key.slot_index(capacity),
            };

            let displacement = (idx + capacity - home) % capacity;
            let gap = (idx + capacity - hole) % capacity;
            if displacement >= gap {
                self.slots.swap(hole, idx);
                hole = idx;
            }
        }
    }

    /// Make room for `additional` new keys without further growth
    ///
    /// Fixed tables fail with `TableFull` when the request exceeds their capacity.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let capacity = self.slots.len();
        let needed = self
            .count
            .checked_add(additional)
            .ok_or(TableError::CapacityOverflow { capacity })?;

        if !self.config.growable {
            return if needed > capacity {
                Err(TableError::TableFull { capacity })
            } else {
                Ok(())
            };
        }

        if needed >= capacity {
            let target = self.grown_capacity(needed)?;
            self.rehash(target, "reserve");
        }
        Ok(())
    }

    /// Shrink the buffer to `max(len, 1)` slots
    ///
    /// A compacted table may have no empty slot left; the next insertion of a
    /// new key grows it again (or fails with `TableFull` if growth is disabled).
    pub fn compact(&mut self) {
        let target = self.count.max(1);
        if target < self.slots.len() {
            self.rehash(target, "compact");
        }
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for HashTable<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
