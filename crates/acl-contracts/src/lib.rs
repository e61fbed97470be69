//! # acl-contracts
//!
//! Shared types, input variants, configuration and errors for the ACL
//! evaluator.
//!
//! All crates in the workspace import from here. No decision logic lives in
//! this crate, only data definitions, their normalization, and error types.

pub mod config;
pub mod definition;
pub mod error;
pub mod permission;
pub mod role;
pub mod state;

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;
    use config::{AclConfig, StorageBackend};
    use definition::{AbilitiesDefinition, PermissionInput, RoleAbilities};
    use error::AclError;
    use permission::{Permission, PermissionSet};
    use role::{Ability, Role};
    use state::{SessionSnapshot, SessionState};

    // ── Permission ───────────────────────────────────────────────────────────

    #[test]
    fn permission_parses_keywords_and_custom_tokens() {
        assert_eq!(Permission::parse("any"), Permission::Any);
        assert_eq!(Permission::parse("none"), Permission::None);
        assert_eq!(Permission::parse("write"), Permission::Write);
        assert!(matches!(Permission::parse("ban"), Permission::Custom(ref t) if t.as_str() == "ban"));

        // Keywords are case-sensitive.
        assert!(matches!(Permission::parse("Read"), Permission::Custom(ref t) if t.as_str() == "Read"));
    }

    #[test]
    fn keyword_text_never_becomes_a_custom_token() {
        for token in ["any", "none", "read", "write", "create", "edit", "delete"] {
            let permission = Permission::from(token.to_string());
            assert!(!matches!(permission, Permission::Custom(_)), "{token} parsed as custom");
            assert_eq!(Permission::parse(permission.as_str()), permission);
        }

        let custom = Permission::parse("unban");
        assert_eq!(Permission::parse(custom.as_str()), custom);
    }

    #[test]
    fn permission_serializes_as_plain_token() {
        let json = serde_json::to_string(&vec![Permission::Edit, Permission::parse("unban")]).unwrap();
        assert_eq!(json, r#"["edit","unban"]"#);

        let decoded: Vec<Permission> = serde_json::from_str(r#"["none","ban"]"#).unwrap();
        assert_eq!(decoded, vec![Permission::None, Permission::parse("ban")]);
    }

    #[test]
    fn only_create_edit_delete_are_write_verbs() {
        assert!(Permission::Create.is_write_verb());
        assert!(Permission::Edit.is_write_verb());
        assert!(Permission::Delete.is_write_verb());
        assert!(!Permission::Write.is_write_verb());
        assert!(!Permission::Read.is_write_verb());
        assert!(!Permission::parse("ban").is_write_verb());
    }

    // ── PermissionSet ────────────────────────────────────────────────────────

    #[test]
    fn empty_permission_list_defaults_to_any() {
        let set = PermissionSet::from(Vec::new());
        assert_eq!(set, PermissionSet::any());
        assert!(!set.is_empty());

        let decoded: PermissionSet = serde_json::from_str("[]").unwrap();
        assert_eq!(decoded, PermissionSet::any());
    }

    #[test]
    fn bare_token_input_becomes_one_element_set() {
        let set = PermissionSet::from(PermissionInput::from("read"));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&Permission::Read));
    }

    // ── Definition shapes ────────────────────────────────────────────────────

    #[test]
    fn role_abilities_resolve_each_shape() {
        let single: RoleAbilities = serde_json::from_value(json!("users")).unwrap();
        assert_eq!(single, RoleAbilities::Single(Ability::new("users")));

        let list: RoleAbilities = serde_json::from_value(json!(["login", "logout"])).unwrap();
        assert_eq!(
            list,
            RoleAbilities::List(vec![Ability::new("login"), Ability::new("logout")])
        );

        let map: RoleAbilities =
            serde_json::from_value(json!({ "content": "read", "users": ["read", "ban"] })).unwrap();
        let mut expected = BTreeMap::new();
        expected.insert(Ability::new("content"), PermissionInput::Token(Permission::Read));
        expected.insert(
            Ability::new("users"),
            PermissionInput::List(vec![Permission::Read, Permission::parse("ban")]),
        );
        assert_eq!(map, RoleAbilities::Map(expected));
    }

    #[test]
    fn single_shape_names_an_ability_not_a_permission() {
        let entries = RoleAbilities::from("write").into_entries();
        assert_eq!(entries, vec![(Ability::new("write"), PermissionSet::any())]);
    }

    #[test]
    fn abilities_definition_builder_collects_roles() {
        let definition = AbilitiesDefinition::new()
            .with_role("guest", vec![Ability::new("login")])
            .with_role("admin", "users");

        let roles: Vec<Role> = definition.clone().into_iter().map(|(role, _)| role).collect();
        assert_eq!(roles, vec![Role::new("admin"), Role::new("guest")]);
        assert!(!definition.is_empty());
    }

    // ── SessionState merge ───────────────────────────────────────────────────

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut state = SessionState::default();
        state.roles.push(Role::new("guest"));
        state
            .abilities
            .entry(Role::new("guest"))
            .or_default()
            .insert(Ability::new("login"), PermissionSet::any());

        state.merge(SessionSnapshot {
            roles: Some(vec![Role::new("admin")]),
            abilities: None,
        });

        assert_eq!(state.roles, vec![Role::new("admin")]);
        assert!(state.abilities.contains_key("guest"), "abilities must be left untouched");
    }

    #[test]
    fn merge_drops_duplicate_roles() {
        let mut state = SessionState::default();
        state.merge(SessionSnapshot {
            roles: Some(vec![Role::new("a"), Role::new("b"), Role::new("a")]),
            abilities: None,
        });
        assert_eq!(state.roles, vec![Role::new("a"), Role::new("b")]);
    }

    #[test]
    fn partial_snapshot_decodes_missing_fields_as_none() {
        let snapshot: SessionSnapshot = serde_json::from_str(r#"{"roles":["admin"]}"#).unwrap();
        assert_eq!(snapshot.roles, Some(vec![Role::new("admin")]));
        assert_eq!(snapshot.abilities, None);
    }

    // ── Config ───────────────────────────────────────────────────────────────

    #[test]
    fn storage_backend_accepts_known_spellings() {
        assert_eq!("none".parse::<StorageBackend>().unwrap(), StorageBackend::None);
        assert_eq!("sessionStorage".parse::<StorageBackend>().unwrap(), StorageBackend::Session);
        assert_eq!("session".parse::<StorageBackend>().unwrap(), StorageBackend::Session);
        assert_eq!("localStorage".parse::<StorageBackend>().unwrap(), StorageBackend::Persistent);
        assert_eq!("persistent".parse::<StorageBackend>().unwrap(), StorageBackend::Persistent);
    }

    #[test]
    fn unknown_storage_backend_is_a_config_error() {
        match "cookies".parse::<StorageBackend>() {
            Err(AclError::ConfigError { reason }) => {
                assert!(reason.contains("cookies"), "unexpected reason: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }

        // The same check runs when a config is deserialized.
        let result: Result<AclConfig, _> =
            serde_json::from_value(json!({ "backend": "cookies", "key": "acl" }));
        assert!(result.is_err());
    }

    #[test]
    fn config_defaults_to_session_storage() {
        let config = AclConfig::default();
        assert_eq!(config.storage, StorageBackend::Session);
        assert_eq!(config.storage_key, "AclService");

        let partial: AclConfig = serde_json::from_value(json!({ "backend": "none" })).unwrap();
        assert_eq!(partial.storage, StorageBackend::None);
        assert_eq!(partial.storage_key, "AclService");
    }

    #[test]
    fn empty_storage_key_is_rejected_when_storage_is_enabled() {
        assert!(AclConfig::new(StorageBackend::Persistent, "  ").is_err());
        assert!(AclConfig::new(StorageBackend::None, "").is_ok());
    }

    // ── AclError display messages ────────────────────────────────────────────

    #[test]
    fn error_display_messages() {
        let err = AclError::ConfigError { reason: "bad backend".to_string() };
        assert!(err.to_string().contains("configuration error"));

        let err = AclError::SnapshotCorrupt { reason: "checksum mismatch".to_string() };
        let msg = err.to_string();
        assert!(msg.contains("corrupt"));
        assert!(msg.contains("checksum mismatch"));
    }
}
