//! Construction-time table configuration

use crate::error::{Result, TableError};
use crate::hasher::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};

/// How `remove` repairs the probe chain it leaves behind
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalStrategy {
    /// Shift later members of the cluster back into the hole, keeping every
    /// remaining key reachable
    #[default]
    BackwardShift,

    /// Reset the slot to empty and nothing else
    ///
    /// Keys that probed past the removed slot may become unreachable by lookup
    /// while still occupying a slot. Only useful to reproduce that behavior.
    Reset,
}

/// Table configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Slot count of the initial buffer (at least 1)
    pub initial_capacity: usize,

    /// Whether the buffer doubles when it runs out of room
    pub growable: bool,

    /// Probe chain repair on removal
    pub removal: RemovalStrategy,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            initial_capacity: DEFAULT_CAPACITY,
            growable: true,
            removal: RemovalStrategy::default(),
        }
    }
}

impl TableConfig {
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn growable(mut self, growable: bool) -> Self {
        self.growable = growable;
        self
    }

    pub fn with_removal(mut self, removal: RemovalStrategy) -> Self {
        self.removal = removal;
        self
    }

    /// Reject configurations no table can be built from
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(TableError::InvalidCapacity { requested: 0 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::default();
        assert_eq!(config.initial_capacity, 4);
        assert!(config.growable);
        assert_eq!(config.removal, RemovalStrategy::BackwardShift);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = TableConfig::default().with_initial_capacity(0);
        assert_eq!(
            config.validate(),
            Err(TableError::InvalidCapacity { requested: 0 })
        );
    }

    #[test]
    fn test_builder() {
        let config = TableConfig::default()
            .with_initial_capacity(16)
            .growable(false)
            .with_removal(RemovalStrategy::Reset);
        assert_eq!(config.initial_capacity, 16);
        assert!(!config.growable);
        assert_eq!(config.removal, RemovalStrategy::Reset);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: TableConfig =
            serde_json::from_str(r#"{"initial_capacity": 32, "removal": "reset"}"#).unwrap();
        assert_eq!(config.initial_capacity, 32);
        assert!(config.growable);
        assert_eq!(config.removal, RemovalStrategy::Reset);

        let json = serde_json::to_string(&TableConfig::default()).unwrap();
        assert_eq!(
            json,
            r#"{"initial_capacity":4,"growable":true,"removal":"backward_shift"}"#
        );
    }
}
