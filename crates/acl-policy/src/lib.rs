//! # acl-policy
//!
//! TOML-driven ability definitions and storage configuration.
//!
//! ## Overview
//!
//! This crate provides [`AclDocument`], which reads a TOML file holding an
//! optional `[storage]` table and an optional `[abilities]` table and turns
//! them into an `AclConfig` and an `AbilitiesDefinition`.
//!
//! ## Document format
//!
//! ```toml
//! [storage]
//! backend = "persistent"     # none | session | persistent
//! key = "forum-acl"
//!
//! [abilities]
//! admin = "users"            # one ability, default ["any"]
//! guest = ["login"]          # several abilities, default ["any"]
//!
//! [abilities.moderator]
//! users = ["read", "ban", "unban"]
//! posts = "edit"
//! ```

pub mod document;

pub use document::AclDocument;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use acl_contracts::{
        config::StorageBackend,
        definition::{PermissionInput, RoleAbilities},
        error::AclError,
        permission::Permission,
        role::Ability,
    };
    use acl_core::AclService;

    use crate::AclDocument;

    const FORUM: &str = r#"
        [storage]
        backend = "localStorage"
        key = "forum-acl"

        [abilities]
        admin = "users"
        guest = ["login", "view_content"]

        [abilities.moderator]
        users = ["read", "ban", "unban"]
        posts = "edit"
    "#;

    // ── 1. parsing ────────────────────────────────────────────────────────────

    #[test]
    fn test_full_document() {
        let document = AclDocument::from_toml_str(FORUM).unwrap();

        assert_eq!(document.config.storage, StorageBackend::Persistent);
        assert_eq!(document.config.storage_key, "forum-acl");

        let roles = &document.abilities.0;
        assert_eq!(roles.len(), 3);
        assert_eq!(roles.get("admin"), Some(&RoleAbilities::Single(Ability::new("users"))));
        assert_eq!(
            roles.get("guest"),
            Some(&RoleAbilities::List(vec![Ability::new("login"), Ability::new("view_content")]))
        );

        match roles.get("moderator") {
            Some(RoleAbilities::Map(map)) => {
                assert_eq!(map.get("posts"), Some(&PermissionInput::Token(Permission::Edit)));
                assert_eq!(
                    map.get("users"),
                    Some(&PermissionInput::List(vec![
                        Permission::Read,
                        Permission::parse("ban"),
                        Permission::parse("unban"),
                    ]))
                );
            }
            other => panic!("expected a map for moderator, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let document = AclDocument::from_toml_str("").unwrap();

        assert_eq!(document.config.storage, StorageBackend::Session);
        assert_eq!(document.config.storage_key, "AclService");
        assert!(document.abilities.is_empty());
    }

    // ── 2. errors ─────────────────────────────────────────────────────────────

    #[test]
    fn test_unknown_backend_is_rejected_at_load() {
        let toml = r#"
            [storage]
            backend = "cookies"
        "#;

        match AclDocument::from_toml_str(toml) {
            Err(AclError::ConfigError { reason }) => {
                assert!(reason.contains("cookies"), "unexpected reason: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_key_is_rejected_at_load() {
        let toml = r#"
            [storage]
            backend = "session"
            key = ""
        "#;

        assert!(matches!(
            AclDocument::from_toml_str(toml),
            Err(AclError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_malformed_abilities_is_a_definition_error() {
        let toml = r#"
            [abilities]
            admin = 42
        "#;

        match AclDocument::from_toml_str(toml) {
            Err(AclError::DefinitionError { reason }) => {
                assert!(reason.contains("[abilities]"), "unexpected reason: {reason}");
            }
            other => panic!("expected DefinitionError, got {:?}", other),
        }
    }

    #[test]
    fn test_toml_parse_error() {
        let bad_toml = r#"
            this is not valid toml ][[[
        "#;

        match AclDocument::from_toml_str(bad_toml) {
            Err(AclError::ConfigError { reason }) => {
                assert!(
                    reason.contains("failed to parse ACL document"),
                    "expected parse error message, got: {reason}"
                );
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let result = AclDocument::from_file(std::path::Path::new("/nonexistent/acl.toml"));
        assert!(matches!(result, Err(AclError::ConfigError { .. })));
    }

    // ── 3. applying to a service ──────────────────────────────────────────────

    #[test]
    fn test_apply_drives_decisions() {
        let document = AclDocument::from_toml_str(FORUM).unwrap();
        let mut acl = AclService::ephemeral();
        document.apply(&mut acl);

        acl.attach_role("moderator");
        assert!(acl.can("users", "ban"));
        assert!(!acl.can("users", "create"));
        assert!(acl.can("posts", "write"));
        assert!(!acl.can("posts", "read"));

        acl.attach_role("admin");
        assert!(acl.can("users", "create"));

        acl.flush_roles();
        acl.attach_role("guest");
        assert!(acl.can_any(["view_content"]));
        assert!(acl.can("login", "read"));
    }

    #[test]
    fn test_apply_replaces_existing_abilities() {
        let mut acl = AclService::ephemeral();
        acl.add_ability("legacy", "old");
        acl.attach_role("legacy");
        assert!(acl.has_ability("old"));

        AclDocument::from_toml_str(FORUM).unwrap().apply(&mut acl);
        assert!(!acl.has_ability("old"));
    }
}
