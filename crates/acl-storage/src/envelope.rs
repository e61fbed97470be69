//! The stored form of a session snapshot.
//!
//! A snapshot is written as a JSON envelope:
//!
//! ```json
//! {
//!   "saved_at": "2026-01-01T12:00:00Z",
//!   "checksum": "<64 hex chars>",
//!   "state": { "abilities": { "admin": { "users": ["any"] } }, "roles": ["admin"] }
//! }
//! ```
//!
//! `checksum` is the SHA-256 of the canonical JSON bytes of `state`. The
//! canonical form is `serde_json::Value` serialization, whose object keys are
//! always sorted, so writer and reader hash identical bytes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use acl_contracts::{
    error::{AclError, AclResult},
    state::{SessionSnapshot, SessionState},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEnvelope {
    /// Wall-clock time (UTC) the snapshot was written.
    pub saved_at: DateTime<Utc>,

    /// Lowercase hex SHA-256 of the canonical JSON of `state`.
    pub checksum: String,

    pub state: serde_json::Value,
}

impl SnapshotEnvelope {
    /// Wrap `state`, stamping it with the current time and its checksum.
    pub fn seal(state: &SessionState) -> AclResult<Self> {
        let state = serde_json::to_value(state).map_err(|e| AclError::StorageError {
            reason: format!("failed to serialize session state: {}", e),
        })?;
        let checksum = checksum(&state)?;

        Ok(Self {
            saved_at: Utc::now(),
            checksum,
            state,
        })
    }

    /// Verify the checksum and decode the (possibly partial) snapshot.
    ///
    /// Returns `AclError::SnapshotCorrupt` if the checksum does not match or
    /// the state does not decode.
    pub fn open(self) -> AclResult<SessionSnapshot> {
        let recomputed = checksum(&self.state)?;
        if recomputed != self.checksum {
            return Err(AclError::SnapshotCorrupt {
                reason: format!(
                    "checksum mismatch (stored {}, computed {})",
                    self.checksum, recomputed
                ),
            });
        }

        serde_json::from_value(self.state).map_err(|e| AclError::SnapshotCorrupt {
            reason: format!("failed to decode session state: {}", e),
        })
    }

    /// Encode the envelope as a single-line JSON string.
    pub fn encode(&self) -> AclResult<String> {
        serde_json::to_string(self).map_err(|e| AclError::StorageError {
            reason: format!("failed to encode snapshot envelope: {}", e),
        })
    }

    /// Parse an envelope previously produced by `encode`.
    pub fn decode(raw: &str) -> AclResult<Self> {
        serde_json::from_str(raw).map_err(|e| AclError::SnapshotCorrupt {
            reason: format!("failed to parse snapshot envelope: {}", e),
        })
    }
}

/// SHA-256 over the canonical JSON bytes of `state`, as lowercase hex.
pub fn checksum(state: &serde_json::Value) -> AclResult<String> {
    let bytes = serde_json::to_vec(state).map_err(|e| AclError::StorageError {
        reason: format!("failed to canonicalize session state: {}", e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}
