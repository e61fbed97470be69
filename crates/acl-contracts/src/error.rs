//! Error types for the ACL evaluator.
//!
//! The decision engine itself never fails. Errors only arise while reading
//! configuration, parsing ability documents, or talking to a storage medium.

use thiserror::Error;

/// The unified error type for the ACL crates.
#[derive(Debug, Error)]
pub enum AclError {
    /// A configuration value is missing or invalid (e.g. an unknown storage backend).
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// An ability definition could not be interpreted.
    #[error("invalid ability definition: {reason}")]
    DefinitionError { reason: String },

    /// The storage medium could not read or write a slot.
    #[error("storage error: {reason}")]
    StorageError { reason: String },

    /// A stored snapshot could not be decoded or failed its integrity check.
    #[error("stored snapshot is corrupt: {reason}")]
    SnapshotCorrupt { reason: String },
}

/// Convenience alias used throughout the ACL crates.
pub type AclResult<T> = Result<T, AclError>;
