//! Read side of the session plus the two writes login/logout perform.
//!
//! Every accessor goes to the store; nothing is cached here, so two
//! `SessionState`s over the same store always agree.

use std::sync::Arc;

use labgate_core::error::Result;
use labgate_core::role::normalize_role;
use labgate_core::session::{
    parse_user_id, Session, ROLE_KEY, SESSION_KEYS, TOKEN_KEY, USERNAME_KEY, USER_ID_KEY,
};

use crate::store::SessionStore;

#[derive(Clone)]
pub struct SessionState {
    store: Arc<dyn SessionStore>,
}

impl SessionState {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }

    pub fn username(&self) -> Option<String> {
        self.store.get(USERNAME_KEY)
    }

    /// Raw role as the backend sent it.
    pub fn role(&self) -> Option<String> {
        self.store.get(ROLE_KEY)
    }

    /// Stored id, or `None` when absent or not an integer.
    pub fn user_id(&self) -> Option<i64> {
        parse_user_id(self.store.get(USER_ID_KEY).as_deref())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }

    /// Stored role present and equal to `expected` after normalization.
    /// Unlike the guard, two roles that both normalize to "" are equal here.
    pub fn has_role(&self, expected: &str) -> bool {
        self.role()
            .filter(|r| !r.is_empty())
            .is_some_and(|r| normalize_role(&r) == normalize_role(expected))
    }

    /// Snapshot of the whole session; `None` unless token, username and
    /// role are all present.
    pub fn session(&self) -> Option<Session> {
        let token = self.token().filter(|t| !t.is_empty())?;
        Some(Session {
            token,
            username: self.username()?,
            role: self.role()?,
            user_id: self.user_id(),
        })
    }

    /// Write a fresh session as one group. A stale id from an earlier login
    /// is dropped when the new one has none, so the store mirrors the new
    /// session only. On error the previous session is left in place.
    pub(crate) fn persist(&self, session: &Session) -> Result<()> {
        let entries = session.storage_entries();
        let pairs: Vec<(&str, &str)> = entries.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let stale: &[&str] = if session.user_id.is_none() { &[USER_ID_KEY] } else { &[] };
        self.store.replace(&pairs, stale)
    }

    /// Remove every session key. Never fails; storage errors are logged.
    pub(crate) fn clear(&self) {
        if let Err(e) = self.store.remove_many(&SESSION_KEYS) {
            tracing::warn!(error = %e, "session clear failed");
        }
    }
}
