//! `KeyedSnapshotStore`: a `SnapshotStore` over one slot of a medium.

use tracing::{debug, warn};

use acl_contracts::{
    config::{AclConfig, StorageBackend},
    error::AclResult,
    state::{SessionSnapshot, SessionState},
};
use acl_core::traits::{NoopSnapshotStore, SnapshotStore};

use crate::{
    envelope::SnapshotEnvelope,
    medium::{FileMedium, SessionMedium, StorageMedium},
};

/// Persists session snapshots under `key` in medium `M`.
#[derive(Debug, Clone)]
pub struct KeyedSnapshotStore<M> {
    medium: M,
    key: String,
}

impl<M: StorageMedium> KeyedSnapshotStore<M> {
    pub fn new(medium: M, key: impl Into<String>) -> Self {
        Self {
            medium,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// Empty the slot this store writes to.
    pub fn clear(&self) -> AclResult<()> {
        self.medium.remove_item(&self.key)
    }
}

impl<M: StorageMedium> SnapshotStore for KeyedSnapshotStore<M> {
    fn save(&self, state: &SessionState) -> AclResult<()> {
        let envelope = SnapshotEnvelope::seal(state)?;
        self.medium.set_item(&self.key, &envelope.encode()?)?;

        debug!(
            storage_key = %self.key,
            checksum = %envelope.checksum,
            roles = state.roles.len(),
            "session snapshot saved"
        );
        Ok(())
    }

    fn load(&self) -> AclResult<Option<SessionSnapshot>> {
        let Some(raw) = self.medium.get_item(&self.key)? else {
            return Ok(None);
        };

        let envelope = SnapshotEnvelope::decode(&raw)?;
        let saved_at = envelope.saved_at;
        match envelope.open() {
            Ok(snapshot) => {
                debug!(storage_key = %self.key, saved_at = %saved_at, "session snapshot loaded");
                Ok(Some(snapshot))
            }
            Err(e) => {
                warn!(storage_key = %self.key, error = %e, "stored session snapshot rejected");
                Err(e)
            }
        }
    }
}

/// Select the store `config` asks for.
///
/// `none` yields a `NoopSnapshotStore`; `session` writes into `session`;
/// `persistent` writes into `persistent`. Both media are slot stores, so the
/// configured key picks the slot.
pub fn open_store(
    config: &AclConfig,
    session: &SessionMedium,
    persistent: &FileMedium,
) -> Box<dyn SnapshotStore> {
    match config.storage {
        StorageBackend::None => Box::new(NoopSnapshotStore),
        StorageBackend::Session => {
            Box::new(KeyedSnapshotStore::new(session.clone(), config.storage_key.clone()))
        }
        StorageBackend::Persistent => {
            Box::new(KeyedSnapshotStore::new(persistent.clone(), config.storage_key.clone()))
        }
    }
}
