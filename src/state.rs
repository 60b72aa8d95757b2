//! Observable session state snapshots.

use crate::backend::Identity;

/// A consistent snapshot of the session state.
///
/// `is_logged_in` is derived from `identity`, so the two can never
/// disagree in a published snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// The signed-in principal, if any
    pub identity: Option<Identity>,
    /// True strictly while a use-case is in flight (and before the first
    /// reconciliation completes)
    pub is_loading: bool,
}

impl SessionState {
    /// Initial state: session status not yet reconciled with the backend.
    pub(crate) fn unknown() -> Self {
        Self {
            identity: None,
            is_loading: true,
        }
    }

    /// A signed-in principal.
    pub(crate) fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            is_loading: false,
        }
    }

    /// No signed-in principal.
    pub(crate) fn anonymous() -> Self {
        Self {
            identity: None,
            is_loading: false,
        }
    }

    /// The same identity, flagged as mid-transition.
    pub(crate) fn loading(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            is_loading: true,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity.is_some()
    }
}
