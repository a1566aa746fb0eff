//! Durable key-value storage for the session.
//!
//! The session only ever needs `get/set/remove` over string keys. Group
//! variants exist so a backend that persists eagerly (the file store) can
//! land a whole login or logout in a single write.
//!
//! [`SessionStore::replace`] is the login write: either every change lands
//! or the touched keys are put back the way they were.

pub mod file;
pub mod memory;

use labgate_core::error::Result;

pub use file::FileStore;
pub use memory::InMemoryStore;

pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        for (k, v) in entries {
            self.set(k, v)?;
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        for k in keys {
            self.remove(k)?;
        }
        Ok(())
    }

    /// Set `set` and remove `remove` as one group.
    ///
    /// The default applies the changes one key at a time and, on the first
    /// error, restores every touched key to its previous value before
    /// returning that error. Stores that can write atomically override this.
    fn replace(&self, set: &[(&str, &str)], remove: &[&str]) -> Result<()> {
        let keys = set.iter().map(|(k, _)| *k).chain(remove.iter().copied());
        let before: Vec<(&str, Option<String>)> = keys.map(|k| (k, self.get(k))).collect();

        let applied = self.set_many(set).and_then(|()| self.remove_many(remove));
        if let Err(e) = applied {
            for (k, prev) in &before {
                let undo = match prev {
                    Some(v) => self.set(k, v),
                    None => self.remove(k),
                };
                if let Err(undo_err) = undo {
                    tracing::warn!(key = %k, error = %undo_err, "session rollback failed");
                }
            }
            return Err(e);
        }
        Ok(())
    }
}
