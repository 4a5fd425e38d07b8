//! Probemap - open-addressing hash table with linear probing
//!
//! Core library providing:
//! - Deterministic per-key-category hashing (multiplicative for integers,
//!   position-weighted sums for text)
//! - Linear probing with capacity-bounded probe loops
//! - Doubling growth, or fixed capacity with an explicit `TableFull` error
//! - Backward-shift removal keeping probe chains intact
//! - Lazy iteration over entries or raw slot states

pub mod config;
pub mod error;
pub mod hasher;
pub mod hashtable;
pub mod iter;
pub mod slot;

pub use config::{RemovalStrategy, TableConfig};
pub use error::{Result, TableError};
pub use hasher::{slot_index, SlotHash, DEFAULT_CAPACITY, MULTIPLIER};
pub use hashtable::HashTable;
pub use iter::{IntoIter, Iter, IterMut};
pub use slot::{Entry, Slot};
