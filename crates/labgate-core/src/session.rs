//! Session model and the fixed storage layout it is persisted under.

use serde::{Deserialize, Serialize};

use crate::protocol::AuthResponse;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key for the login name.
pub const USERNAME_KEY: &str = "auth_user";
/// Storage key for the raw role string.
pub const ROLE_KEY: &str = "auth_role";
/// Storage key for the numeric user id (stored as decimal text).
pub const USER_ID_KEY: &str = "auth_user_id";

/// All keys owned by a session, in write order.
pub const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, USERNAME_KEY, ROLE_KEY, USER_ID_KEY];

/// The authenticated identity held by this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    /// Raw role as returned by the backend (not normalized).
    pub role: String,
    pub user_id: Option<i64>,
}

impl Session {
    /// Key/value pairs to persist. The id entry is present only when the
    /// backend supplied one.
    pub fn storage_entries(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            (TOKEN_KEY, self.token.clone()),
            (USERNAME_KEY, self.username.clone()),
            (ROLE_KEY, self.role.clone()),
        ];
        if let Some(id) = self.user_id {
            out.push((USER_ID_KEY, id.to_string()));
        }
        out
    }
}

impl From<AuthResponse> for Session {
    fn from(res: AuthResponse) -> Self {
        Self {
            token: res.token,
            username: res.username,
            role: res.role,
            user_id: res.id,
        }
    }
}

/// Parse a stored user id. Absent, blank, or non-integer text reads as `None`.
pub fn parse_user_id(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}
