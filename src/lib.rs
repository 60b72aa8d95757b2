//! auth-client - A client-side session manager for a remote identity service
//!
//! This crate maintains a single authoritative view of "who is signed in"
//! with:
//! - A capability façade over the remote identity service with a
//!   normalized error surface
//! - Sign-up / sign-in / sign-out use-cases with all-or-nothing semantics
//! - Startup reconciliation of local state against the backend's actual
//!   session status
//! - Serialized state transitions, observable as consistent snapshots
//!   through a watch channel

pub mod backend;
pub mod config;
pub mod controller;
pub mod state;
#[cfg(test)]
pub mod testutil;

pub use backend::{BackendError, HttpIdentityBackend, Identity, IdentityBackend, Session};
pub use config::Config;
pub use controller::SessionController;
pub use state::SessionState;
