//! JSON file store.
//!
//! The whole map is rewritten on every change (temp file + rename), so a
//! group write either lands completely or not at all. Reads are served from
//! the in-memory copy loaded at open time.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use labgate_core::error::{LabgateError, Result};

use super::SessionStore;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// and its parent directory are created on first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(s) if s.trim().is_empty() => BTreeMap::new(),
            Ok(s) => serde_json::from_str(&s).map_err(|e| {
                LabgateError::Storage(format!("corrupt session file {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(LabgateError::Storage(format!(
                    "read {} failed: {e}",
                    path.display()
                )))
            }
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "session file opened");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let mut g = self
            .entries
            .lock()
            .map_err(|_| LabgateError::Storage("session store lock poisoned".into()))?;
        let mut next = g.clone();
        if !f(&mut next) {
            return Ok(());
        }
        self.flush(&next)?;
        *g = next;
        Ok(())
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| LabgateError::Storage(format!("create {} failed: {e}", dir.display())))?;
        }
        let body = serde_json::to_string_pretty(entries)
            .map_err(|e| LabgateError::Internal(format!("encode session failed: {e}")))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body)
            .map_err(|e| LabgateError::Storage(format!("write {} failed: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            LabgateError::Storage(format!("replace {} failed: {e}", self.path.display()))
        })
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        // Poisoned lock reads as absent; the next write reports the error.
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value)])
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.remove_many(&[key])
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        self.replace(entries, &[])
    }

    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        self.replace(&[], keys)
    }

    fn replace(&self, set: &[(&str, &str)], remove: &[&str]) -> Result<()> {
        self.update(|m| {
            let mut changed = !set.is_empty();
            for (k, v) in set {
                m.insert((*k).to_string(), (*v).to_string());
            }
            for k in remove {
                changed |= m.remove(*k).is_some();
            }
            changed
        })
    }
}
