use std::sync::Arc;

use labgate_core::error::Result;
use labgate_core::protocol::{LoginRequest, RegisterRequest, RegisteredUser};
use labgate_core::session::Session;

use crate::session::SessionState;

use super::AuthBackend;

/// Login/register/logout over an injected backend and session store.
pub struct AuthService {
    session: SessionState,
    backend: Arc<dyn AuthBackend>,
}

impl AuthService {
    pub fn new(session: SessionState, backend: Arc<dyn AuthBackend>) -> Self {
        Self { session, backend }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Authenticate and persist the returned session.
    ///
    /// On any error the store is left exactly as it was and the error is
    /// returned unchanged (a 401 arrives as `LabgateError::AuthFailed`).
    pub async fn login(&self, req: &LoginRequest) -> Result<Session> {
        let res = match self.backend.login(req).await {
            Ok(res) => res,
            Err(e) => {
                tracing::warn!(username = %req.username, code = e.code().as_str(), "login failed");
                return Err(e);
            }
        };
        res.validate()?;

        let session = Session::from(res);
        self.session.persist(&session)?;
        tracing::info!(
            username = %session.username,
            role = %session.role,
            user_id = ?session.user_id,
            "logged in"
        );
        Ok(session)
    }

    /// Create an account. The current session is not touched.
    pub async fn register(&self, req: &RegisterRequest) -> Result<RegisteredUser> {
        let user = self.backend.register(req).await?;
        tracing::info!(username = %user.username, id = user.id, "registered");
        Ok(user)
    }

    /// Drop the session. Idempotent.
    pub fn logout(&self) {
        let username = self.session.username();
        self.session.clear();
        tracing::info!(username = ?username, "logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn has_role(&self, expected: &str) -> bool {
        self.session.has_role(expected)
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    pub fn username(&self) -> Option<String> {
        self.session.username()
    }

    pub fn role(&self) -> Option<String> {
        self.session.role()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.session.user_id()
    }
}
