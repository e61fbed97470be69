//! TOML ACL documents.
//!
//! An `AclDocument` bundles the storage configuration and the ability
//! definitions a host wants to start a session with. Both tables are
//! optional; a missing `[storage]` table yields the default configuration and
//! a missing `[abilities]` table an empty definition.
//!
//! Loading is a two-step parse so errors point at the right layer:
//!
//! 1. The document as a whole (TOML syntax, `[storage]`): any failure here is
//!    `AclError::ConfigError`, including an unknown storage backend.
//! 2. The `[abilities]` table into an `AbilitiesDefinition`: a failure here
//!    is `AclError::DefinitionError`.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use acl_contracts::{
    config::AclConfig,
    definition::AbilitiesDefinition,
    error::{AclError, AclResult},
};
use acl_core::AclService;

/// Raw document shape before the abilities table is interpreted.
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    storage: AclConfig,

    #[serde(default)]
    abilities: toml::Table,
}

/// Storage configuration plus ability definitions loaded from TOML.
///
/// ```rust,ignore
/// use acl_policy::AclDocument;
///
/// let document = AclDocument::from_file(Path::new("acl/forum.toml"))?;
/// let mut acl = AclService::new(document.config.clone(), store)?;
/// document.apply(&mut acl);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AclDocument {
    pub config: AclConfig,
    pub abilities: AbilitiesDefinition,
}

impl AclDocument {
    /// Parse `s` as an ACL document.
    pub fn from_toml_str(s: &str) -> AclResult<Self> {
        let raw: RawDocument = toml::from_str(s).map_err(|e| AclError::ConfigError {
            reason: format!("failed to parse ACL document: {}", e),
        })?;
        raw.storage.validate()?;

        let abilities: AbilitiesDefinition = toml::Value::Table(raw.abilities)
            .try_into()
            .map_err(|e| AclError::DefinitionError {
                reason: format!("failed to interpret [abilities] table: {}", e),
            })?;

        debug!(
            storage = %raw.storage.storage,
            storage_key = %raw.storage.storage_key,
            roles_defined = abilities.0.len(),
            "ACL document loaded"
        );

        Ok(Self {
            config: raw.storage,
            abilities,
        })
    }

    /// Read the file at `path` and parse it as an ACL document.
    pub fn from_file(path: &Path) -> AclResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AclError::ConfigError {
            reason: format!("failed to read ACL document '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Replace `service`'s ability map with this document's definitions.
    pub fn apply(&self, service: &mut AclService) {
        service.set_abilities(self.abilities.clone());
    }
}
