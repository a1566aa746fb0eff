//! Wire types exchanged with the authentication backend (JSON, camelCase).
//!
//! Responses are typed at the boundary: fields the rest of the workspace
//! relies on are required, and the optional `id` is kept only when it really
//! is an integer.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{LabgateError, Result};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful answer of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    pub role: String,
    #[serde(default, deserialize_with = "integer_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl AuthResponse {
    /// Decode a login response body.
    pub fn from_json(body: &str) -> Result<Self> {
        let res: AuthResponse = serde_json::from_str(body)
            .map_err(|e| LabgateError::BadRequest(format!("invalid login response: {e}")))?;
        res.validate()?;
        Ok(res)
    }

    /// A response without a token would persist a session that is not
    /// authenticated, so it is refused before anything is stored.
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(LabgateError::BadRequest("login response carried an empty token".into()));
        }
        Ok(())
    }
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub first_lastname: String,
    pub second_lastname: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub rut: String,
    /// Left empty by self-registration; the backend assigns the role.
    #[serde(default)]
    pub role: String,
}

/// Answer of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: i64,
    pub name: String,
    pub first_lastname: String,
    pub second_lastname: String,
    pub email: String,
    pub username: String,
    pub rut: String,
    pub role: String,
}

// "5", 5.5, null and friends all read as "no id".
fn integer_id<'de, D>(de: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(de)?;
    Ok(v.and_then(|v| v.as_i64()))
}
