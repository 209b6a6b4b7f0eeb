//! Core identity and session types shared across the auth modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use super::token::Token;

/// Access role attached to every identity.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Standard,
    Nutritionist,
    Admin,
}

impl Role {
    /// Stable key used in persisted records and CLI arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Standard => "standard",
            Role::Nutritionist => "nutritionist",
            Role::Admin => "admin",
        }
    }

    /// Parse a role key; the inverse of [`Role::as_str`].
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "standard" => Some(Role::Standard),
            "nutritionist" => Some(Role::Nutritionist),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A user record stripped of secret material.
///
/// Identities are produced by the credential store (seeded) and are immutable
/// for the lifetime of the session they authenticate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<u32>,
}

/// The live binding between an identity and an opaque token.
///
/// At most one session is live per manager; the token always maps back to the
/// identity it was issued against for the lifetime of the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub identity: Identity,
    pub token: Token,
    pub created_at_unix: i64,
}

impl Session {
    #[must_use]
    pub fn new(identity: Identity, token: Token) -> Self {
        Self {
            identity,
            token,
            created_at_unix: unix_now(),
        }
    }
}

/// Snapshot of the session manager's published state.
///
/// `Restoring` covers the window between process start and the first
/// `restore` commit; guards must render nothing while it lasts.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    Restoring,
    Ready(Option<Session>),
}

impl SessionState {
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready(_))
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Ready(session) => session.as_ref(),
            SessionState::Restoring => None,
        }
    }
}

/// Seconds since the Unix epoch.
#[must_use]
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(0))
}
