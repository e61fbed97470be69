//! Permission resolution: the pure decision procedures behind
//! `AclService::can` and `AclService::can_any`.
//!
//! Evaluation algorithm for `can(ability, permission)`:
//!
//! 1. Expand `permission` into its equivalence class:
//!    - `write` → {create, edit, delete, write}
//!    - `create` / `edit` / `delete` → {write, <itself>}
//!    - anything else → {<itself>}
//! 2. For each attached role that defines `ability`:
//!    a. a set containing `none` never grants (the deny is scoped to this
//!       role; other roles may still grant);
//!    b. a set containing `any` grants, as does any non-empty set when the
//!       query itself is `any`;
//!    c. otherwise the role grants if its set intersects the expansion.
//! 3. The result is the OR across roles.
//!
//! `can_any` is deliberately simpler: it only asks whether an attached role
//! defines one of the named abilities, with no expansion and no `none` check.

use acl_contracts::{
    permission::{Permission, PermissionSet},
    state::SessionState,
};

/// Return the equivalence class of `permission` under the `write` alias.
pub fn expand_permission(permission: &Permission) -> Vec<Permission> {
    match permission {
        Permission::Write => vec![
            Permission::Create,
            Permission::Edit,
            Permission::Delete,
            Permission::Write,
        ],
        verb if verb.is_write_verb() => vec![Permission::Write, verb.clone()],
        other => vec![other.clone()],
    }
}

/// Decide whether one role's permission set satisfies an expanded query.
///
/// `none` is checked first, so it overrides `any` and every literal match
/// within the same role/ability pair.
pub fn role_grants(allowed: &PermissionSet, expanded: &[Permission]) -> bool {
    if allowed.contains(&Permission::None) {
        return false;
    }

    if allowed.contains(&Permission::Any)
        || (!allowed.is_empty() && expanded.contains(&Permission::Any))
    {
        return true;
    }

    expanded.iter().any(|permission| allowed.contains(permission))
}

/// Can the actor described by `state` exercise `permission` on `ability`?
///
/// Unknown abilities and roles without definitions contribute no grant;
/// they are never an error.
pub fn can(state: &SessionState, ability: &str, permission: &Permission) -> bool {
    let expanded = expand_permission(permission);

    state
        .roles
        .iter()
        .filter_map(|role| state.abilities.get(role)?.get(ability))
        .any(|allowed| role_grants(allowed, &expanded))
}

/// Does any attached role define at least one of `abilities`?
///
/// This is a literal ability-name check. Permission levels are ignored, so
/// an ability defined as `none` still counts as present here.
pub fn can_any<I, S>(state: &SessionState, abilities: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let wanted: Vec<S> = abilities.into_iter().collect();

    state
        .roles
        .iter()
        .filter_map(|role| state.abilities.get(role))
        .any(|role_abilities| {
            wanted.iter().any(|ability| {
                let name: &str = ability.as_ref();
                role_abilities.contains_key(name)
            })
        })
}
