//! Role and ability identifiers.
//!
//! Both are opaque strings. They are wrapped in newtypes so that a role can
//! never be passed where an ability is expected, while `Borrow<str>` keeps
//! map lookups by plain `&str` cheap.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// A named actor category, e.g. `"moderator"` or `"admin"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(pub String);

impl Role {
    /// Construct a role from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A named capability or resource scoped to a role, e.g. `"users"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ability(pub String);

impl Ability {
    /// Construct an ability from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_id_impls {
    ($ty:ident) => {
        impl From<&str> for $ty {
            fn from(name: &str) -> Self {
                Self(name.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id_impls!(Role);
string_id_impls!(Ability);
