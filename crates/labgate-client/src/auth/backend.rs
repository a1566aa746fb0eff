use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use labgate_core::error::{LabgateError, Result};
use labgate_core::protocol::{AuthResponse, LoginRequest, RegisterRequest, RegisteredUser};

use crate::config::BackendSection;
use crate::interceptor;
use crate::session::SessionState;

/// The authentication endpoints. Non-2xx answers come back as
/// `LabgateError::from_status`, network failures as `Transport`.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse>;
    async fn register(&self, req: &RegisterRequest) -> Result<RegisteredUser>;
}

/// JSON-over-HTTP backend (`POST {base}/auth/login`, `POST {base}/auth/register`).
pub struct HttpAuthBackend {
    cfg: BackendSection,
    http: reqwest::Client,
    session: SessionState,
}

impl HttpAuthBackend {
    pub fn new(cfg: &BackendSection, session: SessionState) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| LabgateError::Internal(format!("http client build failed: {e}")))?;
        Ok(Self {
            cfg: cfg.clone(),
            http,
            session,
        })
    }

    async fn post<B>(&self, endpoint: &str, body: &B) -> Result<String>
    where
        B: Serialize + Sync,
    {
        let url = self.cfg.auth_url(endpoint);
        let req = interceptor::authorize(self.http.post(&url).json(body), &self.session);
        let resp = req
            .send()
            .await
            .map_err(|e| LabgateError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| LabgateError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "auth backend rejected request");
            return Err(LabgateError::from_status(status.as_u16(), text));
        }
        Ok(text)
    }
}

fn decode<T: DeserializeOwned>(what: &str, body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| LabgateError::BadRequest(format!("invalid {what} response: {e}")))
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse> {
        let body = self.post("login", req).await?;
        AuthResponse::from_json(&body)
    }

    async fn register(&self, req: &RegisterRequest) -> Result<RegisteredUser> {
        let body = self.post("register", req).await?;
        decode("register", &body)
    }
}
