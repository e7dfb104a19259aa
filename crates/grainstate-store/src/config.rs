//! Store configuration.
//!
//! Options arrive either as a provider property map (the shape a host
//! passes at init) or as a TOML file for standalone use. Only two
//! options are recognized: the connection string (required) and the
//! table name (optional, defaulted).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StateError, StateResult};

/// Property-map key for the connection string.
pub const PROP_CONNECTION_STRING: &str = "connectionString";

/// Property-map key for the table name.
pub const PROP_TABLE_NAME: &str = "tableName";

/// Default backing table name.
pub const DEFAULT_TABLE_NAME: &str = "OrleansGrainState";

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

/// Validated options for constructing a table client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Credentials/endpoint for the backing store.
    pub connection_string: String,
    /// Logical table/collection name.
    #[serde(default = "default_table_name")]
    pub table_name: String,
}

impl StoreConfig {
    /// Build a config with the default table name.
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            table_name: default_table_name(),
        }
    }

    /// Parse from a provider property map.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Configuration`] when the connection string
    /// is missing or blank.
    pub fn from_properties(properties: &HashMap<String, String>) -> StateResult<Self> {
        let connection_string = properties
            .get(PROP_CONNECTION_STRING)
            .cloned()
            .unwrap_or_default();
        let table_name = properties
            .get(PROP_TABLE_NAME)
            .cloned()
            .unwrap_or_else(default_table_name);

        let config = Self {
            connection_string,
            table_name,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn from_file(path: &Path) -> StateResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StateError::Configuration(format!("{}: {e}", path.display())))?;
        let config: StoreConfig = toml::from_str(&content)
            .map_err(|e| StateError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that required options are present and well-formed.
    pub fn validate(&self) -> StateResult<()> {
        if self.connection_string.trim().is_empty() {
            return Err(StateError::Configuration(
                format!("{PROP_CONNECTION_STRING} property not set"),
            ));
        }
        if self.table_name.trim().is_empty() {
            return Err(StateError::Configuration(format!(
                "{PROP_TABLE_NAME} must not be blank"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn from_properties_with_defaults() {
        let config =
            StoreConfig::from_properties(&props(&[(PROP_CONNECTION_STRING, "memory://x")]))
                .unwrap();
        assert_eq!(config.connection_string, "memory://x");
        assert_eq!(config.table_name, DEFAULT_TABLE_NAME);
    }

    #[test]
    fn from_properties_with_table_override() {
        let config = StoreConfig::from_properties(&props(&[
            (PROP_CONNECTION_STRING, "memory://x"),
            (PROP_TABLE_NAME, "CounterState"),
        ]))
        .unwrap();
        assert_eq!(config.table_name, "CounterState");
    }

    #[test]
    fn missing_connection_string_fails() {
        let err = StoreConfig::from_properties(&props(&[])).unwrap_err();
        assert!(matches!(err, StateError::Configuration(_)));
    }

    #[test]
    fn blank_connection_string_fails() {
        let err = StoreConfig::from_properties(&props(&[(PROP_CONNECTION_STRING, "   ")]))
            .unwrap_err();
        assert!(matches!(err, StateError::Configuration(_)));
    }

    #[test]
    fn unknown_properties_are_ignored() {
        let config = StoreConfig::from_properties(&props(&[
            (PROP_CONNECTION_STRING, "memory://x"),
            ("retryPolicy", "exponential"),
        ]))
        .unwrap();
        assert_eq!(config.connection_string, "memory://x");
    }

    #[test]
    fn from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.toml");
        std::fs::write(
            &path,
            "connection_string = \"memory://x\"\ntable_name = \"Grains\"\n",
        )
        .unwrap();

        let config = StoreConfig::from_file(&path).unwrap();
        assert_eq!(config.connection_string, "memory://x");
        assert_eq!(config.table_name, "Grains");
    }

    #[test]
    fn from_file_applies_table_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.toml");
        std::fs::write(&path, "connection_string = \"memory://x\"\n").unwrap();

        let config = StoreConfig::from_file(&path).unwrap();
        assert_eq!(config.table_name, DEFAULT_TABLE_NAME);
    }

    #[test]
    fn from_file_missing_is_a_config_error() {
        let err = StoreConfig::from_file(Path::new("/nonexistent/store.toml")).unwrap_err();
        assert!(matches!(err, StateError::Configuration(_)));
    }
}
