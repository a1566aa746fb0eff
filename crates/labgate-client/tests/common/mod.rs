//! Shared fixtures: canned auth backend and a store that records writes.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use labgate_client::auth::{AuthBackend, AuthService};
use labgate_client::session::SessionState;
use labgate_client::store::{InMemoryStore, SessionStore};
use labgate_core::error::{LabgateError, Result};
use labgate_core::protocol::{AuthResponse, LoginRequest, RegisterRequest, RegisteredUser};

/// What the fake backend answers to login.
#[derive(Clone)]
pub enum LoginReply {
    Ok(AuthResponse),
    Status(u16),
    Down,
}

pub struct MockBackend {
    pub reply: LoginReply,
    pub register_status: Option<u16>,
    pub logins: Mutex<Vec<LoginRequest>>,
}

impl MockBackend {
    pub fn ok(token: &str, username: &str, role: &str, id: Option<i64>) -> Self {
        Self::with(LoginReply::Ok(AuthResponse {
            token: token.into(),
            username: username.into(),
            role: role.into(),
            id,
        }))
    }

    pub fn with(reply: LoginReply) -> Self {
        Self {
            reply,
            register_status: None,
            logins: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AuthBackend for MockBackend {
    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse> {
        self.logins.lock().unwrap().push(req.clone());
        match &self.reply {
            LoginReply::Ok(res) => Ok(res.clone()),
            LoginReply::Status(s) => Err(LabgateError::from_status(*s, "rejected")),
            LoginReply::Down => Err(LabgateError::Transport("connection refused".into())),
        }
    }

    async fn register(&self, req: &RegisterRequest) -> Result<RegisteredUser> {
        if let Some(s) = self.register_status {
            return Err(LabgateError::from_status(s, "rejected"));
        }
        Ok(RegisteredUser {
            id: 99,
            name: req.name.clone(),
            first_lastname: req.first_lastname.clone(),
            second_lastname: req.second_lastname.clone(),
            email: req.email.clone(),
            username: req.username.clone(),
            rut: req.rut.clone(),
            role: "USER".into(),
        })
    }
}

/// In-memory store that keeps a log of every key passed to `set`.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: InMemoryStore,
    pub writes: Mutex<Vec<String>>,
}

impl SessionStore for RecordingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.writes.lock().unwrap().push(key.to_string());
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }
}

pub fn service(store: Arc<dyn SessionStore>, backend: MockBackend) -> AuthService {
    AuthService::new(SessionState::new(store), Arc::new(backend))
}

/// In-memory store whose `set` fails for one key (or every key).
#[derive(Default)]
pub struct FailingStore {
    pub inner: InMemoryStore,
    /// `None` fails every `set`.
    pub fail_key: Option<&'static str>,
}

impl SessionStore for FailingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        match self.fail_key {
            Some(k) if k != key => self.inner.set(key, value),
            _ => Err(LabgateError::Storage("disk full".into())),
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }
}
