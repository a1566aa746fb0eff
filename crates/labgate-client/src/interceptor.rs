//! Attaches the stored bearer token to outbound requests.

use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

use crate::session::SessionState;

/// `Bearer <token>` when a non-empty token is stored.
pub fn bearer_value(session: &SessionState) -> Option<String> {
    session
        .token()
        .filter(|t| !t.is_empty())
        .map(|t| format!("Bearer {t}"))
}

pub fn authorize(req: RequestBuilder, session: &SessionState) -> RequestBuilder {
    match bearer_value(session) {
        Some(v) => req.header(AUTHORIZATION, v),
        None => req,
    }
}
