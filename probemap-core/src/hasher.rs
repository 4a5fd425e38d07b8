//! Deterministic key-to-slot hashing
//!
//! Provides:
//! - Multiplicative hashing for integer keys
//! - Position-weighted character sums for text keys
//!
//! No random seeding: the same key and capacity always produce the same slot,
//! so placement and iteration order are reproducible across runs.

/// Odd multiplier used to spread consecutive integer keys
pub const MULTIPLIER: u64 = 31337;

/// Slot count used when no capacity is requested
pub const DEFAULT_CAPACITY: usize = 4;

/// Maps a key to its home slot in a buffer of `capacity` slots
///
/// Implementations must be pure functions of `(key, capacity)` and must return a
/// value in `[0, capacity)`. Callers guarantee `capacity > 0`.
///
/// A borrowed form of a key (e.g. `str` for `String`) must hash identically to the
/// owned form, since lookups accept either.
pub trait SlotHash {
    fn slot_index(&self, capacity: usize) -> usize;
}

/// Home slot of `key` in a buffer of `capacity` slots
#[inline]
pub fn slot_index<K: SlotHash + ?Sized>(key: &K, capacity: usize) -> usize {
    key.slot_index(capacity)
}

macro_rules! impl_integer_slot_hash {
    ($($t:ty),* $(,)?) => {
        $(
            impl SlotHash for $t {
                #[inline]
                fn slot_index(&self, capacity: usize) -> usize {
                    // Negative keys sign-extend, which keeps the mapping deterministic.
                    let spread = (*self as u128).wrapping_mul(MULTIPLIER as u128);
                    (spread % capacity as u128) as usize
                }
            }
        )*
    };
}

impl_integer_slot_hash!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Sum of `code_point * position` over the characters of `text`
///
/// The first character carries weight 0. Permutations of the same characters
/// land on different sums unless their weighted totals coincide.
fn weighted_char_sum(text: &str) -> u64 {
    text.chars()
        .enumerate()
        .fold(0u64, |acc, (i, c)| acc.wrapping_add((c as u64).wrapping_mul(i as u64)))
}

impl SlotHash for str {
    #[inline]
    fn slot_index(&self, capacity: usize) -> usize {
        (weighted_char_sum(self) % capacity as u64) as usize
    }
}

impl SlotHash for String {
    #[inline]
    fn slot_index(&self, capacity: usize) -> usize {
        self.as_str().slot_index(capacity)
    }
}

impl<T: SlotHash + ?Sized> SlotHash for &T {
    #[inline]
    fn slot_index(&self, capacity: usize) -> usize {
        (**self).slot_index(capacity)
    }
}

impl<T: SlotHash + ?Sized> SlotHash for Box<T> {
    #[inline]
    fn slot_index(&self, capacity: usize) -> usize {
        (**self).slot_index(capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_hash() {
        // 31337 = 4 * 7834 + 1
        assert_eq!(slot_index(&1i32, 4), 1);
        assert_eq!(slot_index(&5i32, 4), 1);
        assert_eq!(slot_index(&0u64, 7), 0);
        assert_eq!(slot_index(&2usize, 1000), 62674 % 1000);
    }

    #[test]
    fn test_integer_hash_in_range() {
        for capacity in 1..64usize {
            for key in -100i64..100 {
                assert!(key.slot_index(capacity) < capacity);
            }
        }
    }

    #[test]
    fn test_negative_keys_deterministic() {
        assert_eq!((-7i32).slot_index(13), (-7i32).slot_index(13));
        assert!((-1i8).slot_index(3) < 3);
    }

    #[test]
    fn test_text_hash_position_weighted() {
        // "ab": 'a'*0 + 'b'*1 = 98, "ba": 'b'*0 + 'a'*1 = 97
        assert_eq!(slot_index("ab", 1000), 98);
        assert_eq!(slot_index("ba", 1000), 97);
        assert_eq!(slot_index("", 5), 0);
        assert_eq!(slot_index("z", 5), 0);
    }

    #[test]
    fn test_owned_and_borrowed_text_agree() {
        let owned = String::from("hello world");
        for capacity in [1, 2, 3, 17, 1024] {
            assert_eq!(owned.slot_index(capacity), "hello world".slot_index(capacity));
            assert_eq!(
                Box::<str>::from("hello world").slot_index(capacity),
                owned.slot_index(capacity)
            );
        }
    }
}
