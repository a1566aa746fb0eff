//! Shared application state: config compiled into store, backend, auth
//! service and guard.

use std::sync::Arc;

use labgate_core::error::{LabgateError, Result};
use labgate_core::role::normalized;

use crate::auth::{AuthBackend, AuthService, HttpAuthBackend};
use crate::config::{ClientConfig, StorageKind};
use crate::policy::{GuardDecision, RouteGuard};
use crate::session::SessionState;
use crate::store::{FileStore, InMemoryStore, SessionStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ClientConfig,
    auth: AuthService,
    guard: RouteGuard,
}

impl AppState {
    /// Build the production stack: store from `storage`, HTTP backend from `backend`.
    pub fn new(cfg: ClientConfig) -> Result<Self> {
        let store: Arc<dyn SessionStore> = match cfg.storage.kind {
            StorageKind::Memory => Arc::new(InMemoryStore::new()),
            StorageKind::File => Arc::new(FileStore::open(&cfg.storage.path)?),
        };
        let session = SessionState::new(store.clone());
        let backend = Arc::new(HttpAuthBackend::new(&cfg.backend, session)?);
        Self::with_parts(cfg, store, backend)
    }

    /// Build with an explicit store and backend (tests, embedding).
    pub fn with_parts(
        cfg: ClientConfig,
        store: Arc<dyn SessionStore>,
        backend: Arc<dyn AuthBackend>,
    ) -> Result<Self> {
        cfg.validate()?;
        let guard = RouteGuard::new(&cfg.navigation, &cfg.routes);

        // redirect targets <-> route table sanity check
        if let Some(rule) = guard.routes().lookup(&cfg.navigation.login) {
            return Err(LabgateError::BadRequest(format!(
                "navigation.login ({}) is itself protected by route {}",
                cfg.navigation.login, rule.prefix
            )));
        }
        if let Some(rule) = guard.routes().lookup(&cfg.navigation.home) {
            if !rule.roles.is_empty() {
                tracing::warn!(
                    home = %cfg.navigation.home,
                    route = %rule.prefix,
                    "navigation.home requires a role; unauthorized users will bounce"
                );
            }
        }
        for r in &cfg.routes {
            if !r.roles.is_empty() && r.roles.iter().all(|x| normalized(x).is_none()) {
                tracing::warn!(route = %r.path, "route roles are all blank; nobody can enter");
            }
        }

        let auth = AuthService::new(SessionState::new(store), backend);
        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, auth, guard }),
        })
    }

    pub fn cfg(&self) -> &ClientConfig {
        &self.inner.cfg
    }

    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    pub fn session(&self) -> &SessionState {
        self.inner.auth.session()
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.inner.guard
    }

    /// Guard decision for navigating to `path` with the current session.
    pub fn navigate(&self, path: &str) -> GuardDecision {
        self.inner.guard.check_path(self.session(), path)
    }
}
