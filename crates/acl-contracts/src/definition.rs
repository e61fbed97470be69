//! Input shapes accepted when defining abilities.
//!
//! Ability definitions may be written in several shapes. Each shape is a
//! variant resolved once at the boundary (serde's untagged representation),
//! so the service never inspects raw values at runtime.
//!
//! ```toml
//! admin = "users"                       # Single: one ability, default ["any"]
//! guest = ["login"]                     # List: several abilities, default ["any"]
//! moderator = { users = ["read", "ban"], posts = "edit" }   # Map
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    permission::{Permission, PermissionSet},
    role::{Ability, Role},
};

/// The permissions given for one ability: a bare token or a list of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermissionInput {
    Token(Permission),
    List(Vec<Permission>),
}

impl From<PermissionInput> for PermissionSet {
    fn from(input: PermissionInput) -> Self {
        match input {
            PermissionInput::Token(permission) => PermissionSet::from(permission),
            PermissionInput::List(permissions) => PermissionSet::from(permissions),
        }
    }
}

impl From<Permission> for PermissionInput {
    fn from(permission: Permission) -> Self {
        PermissionInput::Token(permission)
    }
}

impl From<&str> for PermissionInput {
    fn from(token: &str) -> Self {
        PermissionInput::Token(Permission::parse(token))
    }
}

impl From<Vec<Permission>> for PermissionInput {
    fn from(permissions: Vec<Permission>) -> Self {
        PermissionInput::List(permissions)
    }
}

impl<const N: usize> From<[&str; N]> for PermissionInput {
    fn from(tokens: [&str; N]) -> Self {
        PermissionInput::List(tokens.iter().map(|t| Permission::parse(t)).collect())
    }
}

/// Everything a single role is granted, in one of three shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleAbilities {
    /// A bare string names one ability, granted with the default `["any"]`.
    ///
    /// Note that the string is an *ability name*, not a permission token.
    Single(Ability),

    /// Several ability names, each granted with the default `["any"]`.
    List(Vec<Ability>),

    /// Explicit ability → permissions mapping.
    Map(BTreeMap<Ability, PermissionInput>),
}

impl RoleAbilities {
    /// Flatten every shape into `(ability, permissions)` pairs.
    pub fn into_entries(self) -> Vec<(Ability, PermissionSet)> {
        match self {
            RoleAbilities::Single(ability) => vec![(ability, PermissionSet::any())],
            RoleAbilities::List(abilities) => abilities
                .into_iter()
                .map(|ability| (ability, PermissionSet::any()))
                .collect(),
            RoleAbilities::Map(map) => map
                .into_iter()
                .map(|(ability, input)| (ability, PermissionSet::from(input)))
                .collect(),
        }
    }
}

impl From<&str> for RoleAbilities {
    fn from(ability: &str) -> Self {
        RoleAbilities::Single(Ability::from(ability))
    }
}

impl From<Vec<Ability>> for RoleAbilities {
    fn from(abilities: Vec<Ability>) -> Self {
        RoleAbilities::List(abilities)
    }
}

impl From<BTreeMap<Ability, PermissionInput>> for RoleAbilities {
    fn from(map: BTreeMap<Ability, PermissionInput>) -> Self {
        RoleAbilities::Map(map)
    }
}

/// A complete ability definition: role → what that role is granted.
///
/// Passed to `AclService::set_abilities`, which replaces the entire ability
/// map with the contents of this definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilitiesDefinition(pub BTreeMap<Role, RoleAbilities>);

impl AbilitiesDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper: add (or replace) one role's grants.
    pub fn with_role(mut self, role: impl Into<Role>, abilities: impl Into<RoleAbilities>) -> Self {
        self.0.insert(role.into(), abilities.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for AbilitiesDefinition {
    type Item = (Role, RoleAbilities);
    type IntoIter = std::collections::btree_map::IntoIter<Role, RoleAbilities>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
