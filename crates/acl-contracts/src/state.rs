//! Session state and its snapshot form.
//!
//! `SessionState` is the unit the service persists after every mutation.
//! `SessionSnapshot` is what a store hands back on load: every field is
//! optional, and only the fields present overwrite the live state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    permission::PermissionSet,
    role::{Ability, Role},
};

/// The abilities granted to one role: ability → permission set.
pub type RoleAbilityMap = BTreeMap<Ability, PermissionSet>;

/// Role → ability → permission set.
///
/// A role may have abilities defined without being attached.
pub type AbilityMap = BTreeMap<Role, RoleAbilityMap>;

/// Unique identifier for one engine session.
///
/// Appears in every tracing event the service emits so that independent
/// in-process sessions can be told apart in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    /// Create a new, unique session ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// The mutable record of attached roles and defined abilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Attached roles in attachment order. Never contains duplicates.
    pub roles: Vec<Role>,
    pub abilities: AbilityMap,
}

impl SessionState {
    /// Overwrite the fields present in `snapshot`, leaving the rest untouched.
    ///
    /// Duplicate roles in the snapshot are dropped (first occurrence wins)
    /// so the no-duplicates invariant survives a hand-edited store.
    pub fn merge(&mut self, snapshot: SessionSnapshot) {
        if let Some(roles) = snapshot.roles {
            let mut unique: Vec<Role> = Vec::with_capacity(roles.len());
            for role in roles {
                if !unique.contains(&role) {
                    unique.push(role);
                }
            }
            self.roles = unique;
        }
        if let Some(abilities) = snapshot.abilities {
            self.abilities = abilities;
        }
    }
}

/// A possibly partial session state read back from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub roles: Option<Vec<Role>>,
    pub abilities: Option<AbilityMap>,
}

impl From<SessionState> for SessionSnapshot {
    fn from(state: SessionState) -> Self {
        Self {
            roles: Some(state.roles),
            abilities: Some(state.abilities),
        }
    }
}
