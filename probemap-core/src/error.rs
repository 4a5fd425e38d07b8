//! Error taxonomy for table operations
//!
//! Errors are returned to the immediate caller and never logged here. A call that
//! fails leaves the table exactly as it was before the call.

use thiserror::Error;

/// Errors produced by [`HashTable`](crate::HashTable) operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// The key is absent after a bounded probe
    #[error("key not found in table")]
    KeyNotFound,

    /// Every slot of a fixed-capacity table is occupied
    #[error("table is full: all {capacity} slots occupied and growth is disabled")]
    TableFull { capacity: usize },

    /// A table cannot be built with zero slots
    #[error("invalid capacity {requested}: a table needs at least one slot")]
    InvalidCapacity { requested: usize },

    /// Doubling the slot buffer would overflow `usize`
    #[error("cannot grow table beyond {capacity} slots")]
    CapacityOverflow { capacity: usize },
}

pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(TableError::KeyNotFound.to_string(), "key not found in table");
        assert_eq!(
            TableError::TableFull { capacity: 3 }.to_string(),
            "table is full: all 3 slots occupied and growth is disabled"
        );
        assert_eq!(
            TableError::InvalidCapacity { requested: 0 }.to_string(),
            "invalid capacity 0: a table needs at least one slot"
        );
    }
}
