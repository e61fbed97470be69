//! Permission tokens and permission sets.
//!
//! A permission set qualifies how a role may use an ability. Two tokens are
//! special: `any` grants every permission query, and `none` denies the
//! ability for that role no matter what else the set contains. `write` is an
//! alias for the `create` / `edit` / `delete` verbs; the alias expansion
//! itself lives in the decision engine (`acl_core::decision`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single permission token.
///
/// Tokens are written as lowercase strings in definitions and snapshots.
/// Matching is case-sensitive: `"Read"` is a custom token, not `read`.
/// Every token text maps to exactly one variant, so a token reads back from
/// storage as the same value it was saved as.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Permission {
    /// Grants every permission query for the ability.
    Any,
    /// Denies the ability for the role, overriding every other token.
    None,
    Read,
    /// Alias matching `create`, `edit` and `delete`.
    Write,
    Create,
    Edit,
    Delete,
    /// Any other token (e.g. `"ban"`). Matched literally only.
    Custom(CustomPermission),
}

/// The text of a non-keyword token. Only `Permission::parse` builds one, so
/// it never holds a keyword such as `"create"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomPermission(String);

impl CustomPermission {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Permission {
    /// Parse a token. Unrecognized strings become `Permission::Custom`.
    pub fn parse(token: &str) -> Self {
        match token {
            "any" => Permission::Any,
            "none" => Permission::None,
            "read" => Permission::Read,
            "write" => Permission::Write,
            "create" => Permission::Create,
            "edit" => Permission::Edit,
            "delete" => Permission::Delete,
            other => Permission::Custom(CustomPermission(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Permission::Any => "any",
            Permission::None => "none",
            Permission::Read => "read",
            Permission::Write => "write",
            Permission::Create => "create",
            Permission::Edit => "edit",
            Permission::Delete => "delete",
            Permission::Custom(token) => token.as_str(),
        }
    }

    /// True for the three verbs aliased by `write`.
    pub fn is_write_verb(&self) -> bool {
        matches!(self, Permission::Create | Permission::Edit | Permission::Delete)
    }
}

impl From<&str> for Permission {
    fn from(token: &str) -> Self {
        Permission::parse(token)
    }
}

impl From<String> for Permission {
    fn from(token: String) -> Self {
        Permission::parse(&token)
    }
}

impl From<Permission> for String {
    fn from(permission: Permission) -> Self {
        permission.as_str().to_string()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The permissions a role holds on one ability.
///
/// Never empty: an empty input collapses to the default `["any"]`, the same
/// default used when no permissions are given at all. Duplicates are kept
/// as given; they are harmless to every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Permission>", into = "Vec<Permission>")]
pub struct PermissionSet(Vec<Permission>);

impl PermissionSet {
    /// The default grant: `["any"]`.
    pub fn any() -> Self {
        Self(vec![Permission::Any])
    }

    pub fn contains(&self, permission: &Permission) -> bool {
        self.0.contains(permission)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: an empty input becomes `["any"]`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PermissionSet {
    fn default() -> Self {
        Self::any()
    }
}

impl From<Vec<Permission>> for PermissionSet {
    fn from(permissions: Vec<Permission>) -> Self {
        if permissions.is_empty() {
            Self::any()
        } else {
            Self(permissions)
        }
    }
}

impl From<PermissionSet> for Vec<Permission> {
    fn from(set: PermissionSet) -> Self {
        set.0
    }
}

impl From<Permission> for PermissionSet {
    fn from(permission: Permission) -> Self {
        Self(vec![permission])
    }
}
