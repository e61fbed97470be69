//! Engine configuration: which storage backend to use and under which key.
//!
//! Configuration is validated eagerly. An unrecognized backend name fails
//! when the configuration is parsed, never on first use.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{AclError, AclResult};

/// Where session snapshots are kept.
///
/// Accepted spellings (case-sensitive):
/// - `"none"`
/// - `"session"` or `"sessionStorage"`
/// - `"persistent"` or `"localStorage"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StorageBackend {
    /// Saving is a no-op and `resume` always reports no prior state.
    None,
    /// Storage that lives as long as the hosting session.
    #[default]
    Session,
    /// Storage that survives process restarts.
    Persistent,
}

impl StorageBackend {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, StorageBackend::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::None => "none",
            StorageBackend::Session => "session",
            StorageBackend::Persistent => "persistent",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = AclError;

    fn from_str(s: &str) -> AclResult<Self> {
        match s {
            "none" => Ok(StorageBackend::None),
            "session" | "sessionStorage" => Ok(StorageBackend::Session),
            "persistent" | "localStorage" => Ok(StorageBackend::Persistent),
            other => Err(AclError::ConfigError {
                reason: format!(
                    "unknown storage backend '{}' (expected one of: none, session, sessionStorage, persistent, localStorage)",
                    other
                ),
            }),
        }
    }
}

impl TryFrom<String> for StorageBackend {
    type Error = AclError;

    fn try_from(s: String) -> AclResult<Self> {
        s.parse()
    }
}

impl From<StorageBackend> for String {
    fn from(backend: StorageBackend) -> Self {
        backend.as_str().to_string()
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration consumed once when an `AclService` is constructed.
///
/// Example in TOML:
/// ```toml
/// [storage]
/// backend = "persistent"
/// key = "forum-acl"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    #[serde(rename = "backend")]
    pub storage: StorageBackend,

    /// Name of the slot snapshots are written to.
    #[serde(rename = "key")]
    pub storage_key: String,
}

impl AclConfig {
    pub const DEFAULT_STORAGE_KEY: &'static str = "AclService";

    /// Build and validate a configuration.
    pub fn new(storage: StorageBackend, storage_key: impl Into<String>) -> AclResult<Self> {
        let config = Self {
            storage,
            storage_key: storage_key.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// A configuration with persistence switched off.
    pub fn disabled() -> Self {
        Self {
            storage: StorageBackend::None,
            ..Self::default()
        }
    }

    /// Reject configurations that cannot name a storage slot.
    pub fn validate(&self) -> AclResult<()> {
        if self.storage.is_enabled() && self.storage_key.trim().is_empty() {
            return Err(AclError::ConfigError {
                reason: format!("storage backend '{}' requires a non-empty storage key", self.storage),
            });
        }
        Ok(())
    }
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
