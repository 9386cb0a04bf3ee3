//! Connector configuration and lifecycle state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConnectorError;

/// Connector configuration: a type tag plus string-keyed options.
///
/// Options identify external locations (an input address, an output
/// address) and connector-specific tuning. The pipeline core never
/// interprets them; each connector reads its own keys during `open()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Connector type tag (e.g. `"channel"`, `"mock"`).
    connector_type: String,
    /// Free-form options.
    options: HashMap<String, String>,
}

impl ConnectorConfig {
    /// Creates a config for the given connector type.
    #[must_use]
    pub fn new(connector_type: impl Into<String>) -> Self {
        Self {
            connector_type: connector_type.into(),
            options: HashMap::new(),
        }
    }

    /// Adds an option (builder style).
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// The connector type tag.
    #[must_use]
    pub fn connector_type(&self) -> &str {
        &self.connector_type
    }

    /// Looks up an option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Looks up an option, falling back to a default.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Looks up a required option.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Configuration`] if the key is absent.
    pub fn require(&self, key: &str) -> Result<&str, ConnectorError> {
        self.get(key).ok_or_else(|| {
            ConnectorError::Configuration(format!(
                "connector '{}' is missing required option '{key}'",
                self.connector_type
            ))
        })
    }
}

/// Connector lifecycle state.
///
/// Connectors are acquired with `open()` and released with `close()`;
/// data operations are only valid while `Open`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorState {
    /// Constructed, not yet opened.
    #[default]
    Created,
    /// Opened and usable.
    Open,
    /// Closed; terminal.
    Closed,
}

impl ConnectorState {
    /// Returns `Ok(())` when `self` matches `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::InvalidState`] otherwise.
    pub fn ensure(self, expected: ConnectorState) -> Result<(), ConnectorError> {
        if self == expected {
            Ok(())
        } else {
            Err(ConnectorError::InvalidState {
                expected,
                actual: self,
            })
        }
    }
}

impl std::fmt::Display for ConnectorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}
