//! # acl-core
//!
//! The permission-resolution engine and session state store.
//!
//! This crate provides:
//! - The `SnapshotStore` trait, the seam to any persistence medium
//! - `AclService`, which owns one actor session and answers `can` queries
//! - `decision`, the pure resolution procedures behind those queries
//!
//! ## Usage
//!
//! ```rust,ignore
//! use acl_core::AclService;
//!
//! let mut acl = AclService::ephemeral();
//! acl.add_ability_with("editor", "posts", ["read", "edit"]);
//! acl.attach_role("editor");
//! assert!(acl.can("posts", "write"));
//! ```

pub mod decision;
pub mod service;
pub mod traits;

pub use service::AclService;
pub use traits::{NoopSnapshotStore, SnapshotStore};

// ── Tests ─────────────────────────────────────────────────────────────────────
