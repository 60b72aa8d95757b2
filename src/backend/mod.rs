//! Capability façade over the remote identity service.
//!
//! The session controller only ever sees the [`IdentityBackend`] trait and
//! its single error type. Backend wire formats and SDK-specific error
//! shapes never cross this boundary.

mod http;
mod models;

pub use http::HttpIdentityBackend;
pub use models::{Identity, Session};

use std::future::Future;

use thiserror::Error;

/// Error type for adapter operations.
///
/// Backend-reported failures keep the backend's message verbatim so the
/// controller can surface it to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    /// The backend rejected the request (invalid credentials, duplicate
    /// account, no active session, ...).
    #[error("{message}")]
    Api { message: String, status: u16 },
    /// The response arrived but could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Network(String),
}

/// The capability surface of the remote identity service.
///
/// The backend permits at most one active session per principal:
/// `create_session` fails if one already exists, so callers clear stale
/// sessions first (see `SessionController`).
pub trait IdentityBackend: Send + Sync {
    /// Register a new account. Does not establish a session.
    fn create_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> impl Future<Output = Result<Identity, BackendError>> + Send;

    /// Exchange credentials for a session.
    fn create_session(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session, BackendError>> + Send;

    /// Fetch the identity bound to the active session.
    ///
    /// Failure means "not signed in" as far as callers are concerned.
    fn current_identity(&self) -> impl Future<Output = Result<Identity, BackendError>> + Send;

    /// Best-effort removal of every session for the current principal.
    ///
    /// Never fails: the absence of an active session is not an error
    /// condition for this call.
    fn terminate_sessions(&self) -> impl Future<Output = ()> + Send;
}
