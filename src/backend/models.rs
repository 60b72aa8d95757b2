use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated principal's profile, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Contact address the account was registered with
    pub email: String,
    /// Backend-assigned unique identifier
    pub id: String,
    /// Display name
    pub name: String,
}

/// A backend-tracked session established by an email/password exchange.
///
/// Callers only use this as proof that a session exists; the actual
/// credential travels in the HTTP client's cookie store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// When the session expires
    pub expires_at: DateTime<Utc>,
    /// Session identifier
    pub id: String,
    /// The principal this session belongs to
    pub user_id: String,
}
