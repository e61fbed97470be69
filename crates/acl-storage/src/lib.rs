//! # acl-storage
//!
//! Snapshot persistence for the ACL evaluator.
//!
//! ## Overview
//!
//! A `StorageMedium` is a plain key → string slot store (in-memory session
//! storage or a directory of files). `KeyedSnapshotStore` implements
//! `acl_core::SnapshotStore` on top of one slot, wrapping each snapshot in a
//! SHA-256 checksummed envelope so a tampered or truncated slot is rejected
//! instead of silently resumed.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use acl_storage::{open_store, FileMedium, SessionMedium};
//!
//! let store = open_store(&config, &SessionMedium::new(), &FileMedium::new("/var/lib/acl"));
//! let mut acl = AclService::new(config, store)?;
//! acl.resume();
//! ```

pub mod envelope;
pub mod medium;
pub mod store;

pub use envelope::{checksum, SnapshotEnvelope};
pub use medium::{FileMedium, SessionMedium, StorageMedium};
pub use store::{open_store, KeyedSnapshotStore};

// ── Tests ─────────────────────────────────────────────────────────────────────
