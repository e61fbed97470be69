//! The persistence seam between the engine and whatever medium holds
//! session snapshots.
//!
//! The engine never inspects how or where a snapshot is stored. It calls
//! `save` after every mutation and `load` once when asked to resume.

use acl_contracts::{
    error::AclResult,
    state::{SessionSnapshot, SessionState},
};

/// A store that persists session snapshots under a single slot.
///
/// Saving is best-effort from the engine's point of view: an `Err` from
/// `save` is logged by the service and otherwise ignored, and an `Err` from
/// `load` is treated exactly like "no prior state".
pub trait SnapshotStore: Send + Sync {
    /// Persist the full session state, replacing any previous snapshot.
    fn save(&self, state: &SessionState) -> AclResult<()>;

    /// Read back the last saved snapshot, or `None` if nothing was saved.
    fn load(&self) -> AclResult<Option<SessionSnapshot>>;
}

/// A store that keeps nothing. Used when persistence is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSnapshotStore;

impl SnapshotStore for NoopSnapshotStore {
    fn save(&self, _state: &SessionState) -> AclResult<()> {
        Ok(())
    }

    fn load(&self) -> AclResult<Option<SessionSnapshot>> {
        Ok(None)
    }
}
