//! `AclService`: the session state store and the public face of the engine.
//!
//! The service owns exactly one `SessionState` (the current actor's roles
//! plus the ability map) and one `SnapshotStore`. Every public mutation ends
//! with a single snapshot save; every query is answered synchronously from
//! the in-memory state by `crate::decision`.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use acl_contracts::{
    config::AclConfig,
    definition::{AbilitiesDefinition, PermissionInput, RoleAbilities},
    error::AclResult,
    permission::{Permission, PermissionSet},
    role::{Ability, Role},
    state::{AbilityMap, RoleAbilityMap, SessionId, SessionState},
};

use crate::{
    decision,
    traits::{NoopSnapshotStore, SnapshotStore},
};

static NO_ABILITIES: RoleAbilityMap = BTreeMap::new();

/// Role-based access control for a single actor session.
///
/// Construct one service per session. The service is not internally
/// synchronized; mutations take `&mut self`, so a multi-threaded host must
/// serialize access itself.
///
/// ```rust,ignore
/// let mut acl = AclService::new(AclConfig::default(), Box::new(store))?;
/// acl.add_ability_with("moderator", "users", ["read", "ban", "unban"]);
/// acl.attach_role("moderator");
/// assert!(acl.can("users", "ban"));
/// ```
pub struct AclService {
    session_id: SessionId,
    config: AclConfig,
    state: SessionState,
    store: Box<dyn SnapshotStore>,
}

impl AclService {
    /// Create a service with an empty session.
    ///
    /// Returns `AclError::ConfigError` if `config` is invalid. When
    /// `config.storage` is `none`, `store` is never called.
    pub fn new(config: AclConfig, store: Box<dyn SnapshotStore>) -> AclResult<Self> {
        config.validate()?;

        let session_id = SessionId::new();
        debug!(
            session_id = %session_id.0,
            storage = %config.storage,
            storage_key = %config.storage_key,
            "acl session created"
        );

        Ok(Self {
            session_id,
            config,
            state: SessionState::default(),
            store,
        })
    }

    /// A service with persistence switched off.
    pub fn ephemeral() -> Self {
        Self {
            session_id: SessionId::new(),
            config: AclConfig::disabled(),
            state: SessionState::default(),
            store: Box::new(NoopSnapshotStore),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn config(&self) -> &AclConfig {
        &self.config
    }

    /// Read-only view of the whole session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    // ── Resume ───────────────────────────────────────────────────────────────

    /// Restore state saved by a previous session.
    ///
    /// Fields present in the stored snapshot overwrite the live ones. Returns
    /// `true` if a snapshot was found, `false` if there was none, storage is
    /// disabled, or the store failed to load (the failure is logged).
    pub fn resume(&mut self) -> bool {
        if !self.config.storage.is_enabled() {
            debug!(session_id = %self.session_id.0, "storage disabled; nothing to resume");
            return false;
        }

        match self.store.load() {
            Ok(Some(snapshot)) => {
                self.state.merge(snapshot);
                info!(
                    session_id = %self.session_id.0,
                    storage_key = %self.config.storage_key,
                    roles = self.state.roles.len(),
                    "acl session resumed from storage"
                );
                true
            }
            Ok(None) => {
                debug!(
                    session_id = %self.session_id.0,
                    storage_key = %self.config.storage_key,
                    "no stored acl session found"
                );
                false
            }
            Err(e) => {
                warn!(
                    session_id = %self.session_id.0,
                    storage_key = %self.config.storage_key,
                    error = %e,
                    "failed to load stored acl session; starting fresh"
                );
                false
            }
        }
    }

    // ── Roles ────────────────────────────────────────────────────────────────

    /// Attach `role` to the current actor. Attaching twice is a no-op.
    pub fn attach_role(&mut self, role: impl Into<Role>) {
        let role = role.into();
        if self.state.roles.contains(&role) {
            return;
        }

        debug!(session_id = %self.session_id.0, role = %role, "role attached");
        self.state.roles.push(role);
        self.persist();
    }

    /// Detach `role` from the current actor. Detaching an absent role is a no-op.
    pub fn detach_role(&mut self, role: &str) {
        let Some(index) = self.state.roles.iter().position(|r| r.as_str() == role) else {
            return;
        };

        self.state.roles.remove(index);
        debug!(session_id = %self.session_id.0, role = %role, "role detached");
        self.persist();
    }

    /// Detach every role.
    pub fn flush_roles(&mut self) {
        self.state.roles.clear();
        debug!(session_id = %self.session_id.0, "roles flushed");
        self.persist();
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.state.roles.iter().any(|r| r.as_str() == role)
    }

    /// Attached roles in attachment order.
    pub fn roles(&self) -> &[Role] {
        &self.state.roles
    }

    // ── Abilities ────────────────────────────────────────────────────────────

    /// Replace the entire ability map with `definition`.
    ///
    /// Abilities defined before this call but absent from `definition` are
    /// gone afterwards.
    pub fn set_abilities(&mut self, definition: AbilitiesDefinition) {
        self.state.abilities = AbilityMap::new();
        for (role, abilities) in definition {
            self.replace_role_abilities(role, abilities);
        }

        debug!(
            session_id = %self.session_id.0,
            roles_defined = self.state.abilities.len(),
            "ability map replaced"
        );
        self.persist();
    }

    /// Replace the abilities of one role, leaving other roles untouched.
    ///
    /// A bare string (`RoleAbilities::Single`) names an *ability* that is
    /// granted with the default `["any"]`; it is not a permission token.
    pub fn set_role_abilities(&mut self, role: impl Into<Role>, abilities: impl Into<RoleAbilities>) {
        let role = role.into();
        debug!(session_id = %self.session_id.0, role = %role, "role abilities replaced");
        self.replace_role_abilities(role, abilities.into());
        self.persist();
    }

    /// Grant `ability` to `role` with the default permissions `["any"]`.
    pub fn add_ability(&mut self, role: impl Into<Role>, ability: impl Into<Ability>) {
        self.upsert_ability(role.into(), ability.into(), PermissionSet::any());
        self.persist();
    }

    /// Grant `ability` to `role` with explicit permissions, replacing any
    /// previous grant of the same ability to the same role.
    pub fn add_ability_with(
        &mut self,
        role: impl Into<Role>,
        ability: impl Into<Ability>,
        permissions: impl Into<PermissionInput>,
    ) {
        let permissions = PermissionSet::from(permissions.into());
        self.upsert_ability(role.into(), ability.into(), permissions);
        self.persist();
    }

    /// True if an ability map exists for `role` (it may be empty).
    pub fn role_has_abilities(&self, role: &str) -> bool {
        self.state.abilities.contains_key(role)
    }

    /// The abilities defined for `role`, or an empty map.
    pub fn role_abilities(&self, role: &str) -> &RoleAbilityMap {
        self.state.abilities.get(role).unwrap_or(&NO_ABILITIES)
    }

    pub fn abilities(&self) -> &AbilityMap {
        &self.state.abilities
    }

    // ── Decisions ────────────────────────────────────────────────────────────

    /// Can the current actor exercise `permission` on `ability`?
    ///
    /// See `crate::decision` for the full resolution rules.
    pub fn can(&self, ability: &str, permission: impl Into<Permission>) -> bool {
        let permission = permission.into();
        let granted = decision::can(&self.state, ability, &permission);

        debug!(
            session_id = %self.session_id.0,
            ability = %ability,
            permission = %permission,
            granted,
            "permission check"
        );
        granted
    }

    /// Does the current actor hold `ability` at any permission level?
    ///
    /// Equivalent to `can(ability, "any")`.
    pub fn has_ability(&self, ability: &str) -> bool {
        self.can(ability, Permission::Any)
    }

    /// Does any attached role define at least one of `abilities`?
    ///
    /// Literal name check only: no `write` expansion and no `none` override.
    pub fn can_any<I, S>(&self, abilities: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let granted = decision::can_any(&self.state, abilities);
        debug!(session_id = %self.session_id.0, granted, "ability existence check");
        granted
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn replace_role_abilities(&mut self, role: Role, abilities: RoleAbilities) {
        let role_abilities = self.state.abilities.entry(role).or_default();
        role_abilities.clear();
        role_abilities.extend(abilities.into_entries());
    }

    fn upsert_ability(&mut self, role: Role, ability: Ability, permissions: PermissionSet) {
        debug!(
            session_id = %self.session_id.0,
            role = %role,
            ability = %ability,
            permissions = permissions.len(),
            "ability granted"
        );
        self.state
            .abilities
            .entry(role)
            .or_default()
            .insert(ability, permissions);
    }

    /// Hand the full state to the store. Failures are logged, not surfaced.
    fn persist(&self) {
        if !self.config.storage.is_enabled() {
            return;
        }

        if let Err(e) = self.store.save(&self.state) {
            warn!(
                session_id = %self.session_id.0,
                storage_key = %self.config.storage_key,
                error = %e,
                "failed to save acl session"
            );
        }
    }
}
