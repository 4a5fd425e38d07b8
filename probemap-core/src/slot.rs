//! Storage cells of the table buffer

/// Key-value pair owned by an occupied slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Entry { key, value }
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// One cell of the slot buffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot<K, V> {
    Empty,
    Occupied(Entry<K, V>),
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<K, V> Slot<K, V> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    /// Borrow the entry, if any
    #[inline]
    pub fn entry(&self) -> Option<&Entry<K, V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            Slot::Empty => None,
        }
    }

    /// Borrow key and value, if any
    #[inline]
    pub fn as_pair(&self) -> Option<(&K, &V)> {
        self.entry().map(|entry| (&entry.key, &entry.value))
    }

    #[inline]
    pub(crate) fn as_pair_mut(&mut self) -> Option<(&K, &mut V)> {
        match self {
            Slot::Occupied(entry) => Some((&entry.key, &mut entry.value)),
            Slot::Empty => None,
        }
    }

    /// Move the entry out, leaving the slot empty
    #[inline]
    pub(crate) fn take(&mut self) -> Option<Entry<K, V>> {
        match std::mem::take(self) {
            Slot::Occupied(entry) => Some(entry),
            Slot::Empty => None,
        }
    }
}

/// Buffer of `capacity` empty slots
pub(crate) fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, Slot::default);
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_states() {
        let empty: Slot<u32, &str> = Slot::Empty;
        assert!(empty.is_empty());
        assert_eq!(empty.as_pair(), None);

        let full = Slot::Occupied(Entry::new(7u32, "seven"));
        assert!(full.is_occupied());
        assert_eq!(full.as_pair(), Some((&7, &"seven")));
    }

    #[test]
    fn test_take_leaves_empty() {
        let mut slot = Slot::Occupied(Entry::new(1u8, 2u8));
        assert_eq!(slot.take().map(Entry::into_pair), Some((1, 2)));
        assert!(slot.is_empty());
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_empty_slots() {
        let slots: Vec<Slot<i32, i32>> = empty_slots(5);
        assert_eq!(slots.len(), 5);
        assert!(slots.iter().all(Slot::is_empty));
    }
}
