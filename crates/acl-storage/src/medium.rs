//! Storage media: named string slots.
//!
//! A medium is the byte-level half of persistence. It knows nothing about
//! sessions or snapshots, only how to get, set and remove a string value
//! under a key. Two media ship with this crate:
//!
//! - `SessionMedium` — an in-memory map shared between clones, living as
//!   long as the hosting process session.
//! - `FileMedium` — one file per key inside a directory, surviving restarts.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use acl_contracts::error::{AclError, AclResult};

/// A key → string slot store.
pub trait StorageMedium: Send + Sync {
    /// Return the value stored under `key`, or `None` if the slot is empty.
    fn get_item(&self, key: &str) -> AclResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> AclResult<()>;

    /// Empty the slot. Removing an empty slot is not an error.
    fn remove_item(&self, key: &str) -> AclResult<()>;
}

// ── Session medium ────────────────────────────────────────────────────────────

/// In-memory, session-scoped storage.
///
/// Clones share the same underlying map, so a host can hand one clone to
/// each `AclService` it creates and have later sessions resume earlier ones.
#[derive(Debug, Clone, Default)]
pub struct SessionMedium {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> AclResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> AclResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> AclResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.slots.lock().map_err(|e| AclError::StorageError {
            reason: format!("session storage lock poisoned: {}", e),
        })
    }
}

impl StorageMedium for SessionMedium {
    fn get_item(&self, key: &str) -> AclResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AclResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AclResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

// ── File medium ───────────────────────────────────────────────────────────────

/// Directory-backed persistent storage: key `k` lives in `<dir>/<k>.json`.
///
/// Each byte of a key outside `[A-Za-z0-9_-]` is written as `%XX`, so a key
/// can never escape the directory and distinct keys never share a file.
#[derive(Debug, Clone)]
pub struct FileMedium {
    dir: PathBuf,
}

impl FileMedium {
    /// Use `dir` as the storage directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a given key maps to.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut file_stem = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-') {
                file_stem.push(char::from(byte));
            } else {
                file_stem.push('%');
                file_stem.push_str(&hex::encode_upper([byte]));
            }
        }
        self.dir.join(format!("{}.json", file_stem))
    }
}

impl StorageMedium for FileMedium {
    fn get_item(&self, key: &str) -> AclResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AclError::StorageError {
                reason: format!("failed to read '{}': {}", path.display(), e),
            }),
        }
    }

    /// Write through a temporary sibling file and rename it into place, so
    /// a crash mid-write never leaves a half-written slot behind.
    fn set_item(&self, key: &str, value: &str) -> AclResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| AclError::StorageError {
            reason: format!("failed to create storage directory '{}': {}", self.dir.display(), e),
        })?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| AclError::StorageError {
            reason: format!("failed to write '{}': {}", tmp.display(), e),
        })?;
        fs::rename(&tmp, &path).map_err(|e| AclError::StorageError {
            reason: format!("failed to move '{}' into place: {}", path.display(), e),
        })
    }

    fn remove_item(&self, key: &str) -> AclResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AclError::StorageError {
                reason: format!("failed to remove '{}': {}", path.display(), e),
            }),
        }
    }
}
