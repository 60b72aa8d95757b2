//! The session controller: the single authoritative view of "who is
//! signed in" and the use-cases that may change it.
//!
//! Every use-case runs its backend sequence under a transition lock, so
//! two invocations can never interleave their adapter calls or observe
//! each other's half-applied state. Observers subscribe to a watch
//! channel and always receive complete, consistent snapshots.

use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

use crate::backend::{BackendError, Identity, IdentityBackend};
use crate::state::SessionState;

pub struct SessionController<B> {
    backend: B,
    state_tx: watch::Sender<SessionState>,
    /// Held for the full duration of a use-case.
    transition: Mutex<()>,
}

impl<B: IdentityBackend> SessionController<B> {
    /// Create a controller in the initial state: loading, no identity.
    ///
    /// Call [`reconcile`](Self::reconcile) once at startup to align the
    /// state with the backend's actual session status.
    pub fn new(backend: B) -> Self {
        let (state_tx, _) = watch::channel(SessionState::unknown());
        Self {
            backend,
            state_tx,
            transition: Mutex::new(()),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Align local state with the backend's actual session status.
    ///
    /// Invoked once at startup; safe to call again at any time. Any
    /// backend failure is read as "not signed in".
    pub async fn reconcile(&self) {
        let _guard = self.transition.lock().await;
        self.publish_loading();

        match self.backend.current_identity().await {
            Ok(identity) => {
                info!(user_id = %identity.id, "Reconciled to existing session");
                self.publish(SessionState::authenticated(identity));
            }
            Err(e) => {
                debug!(error = %e, "No live session found during reconciliation");
                self.publish(SessionState::anonymous());
            }
        }
    }

    /// Register a new account and establish a session for it.
    ///
    /// All-or-nothing: the first failing step aborts the rest, the state
    /// becomes anonymous, and no partial identity is ever published.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(), BackendError> {
        let _guard = self.transition.lock().await;
        self.publish_loading();

        let result = self.run_sign_up(email, password, name).await;
        self.finish("sign_up", result)
    }

    /// Establish a session for an existing account.
    ///
    /// Same all-or-nothing semantics as [`sign_up`](Self::sign_up).
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), BackendError> {
        let _guard = self.transition.lock().await;
        self.publish_loading();

        let result = self.run_sign_in(email, password).await;
        self.finish("sign_in", result)
    }

    /// Terminate the session.
    ///
    /// Local state always ends anonymous, even when remote cleanup is
    /// partial — the adapter absorbs cleanup failures, so this use-case
    /// cannot fail.
    pub async fn sign_out(&self) {
        let _guard = self.transition.lock().await;
        self.publish_loading();

        self.backend.terminate_sessions().await;
        info!("Signed out");
        self.publish(SessionState::anonymous());
    }

    async fn run_sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Identity, BackendError> {
        // Stray sessions from a previous run would make session creation
        // fail or attach to the wrong identity.
        self.backend.terminate_sessions().await;
        self.backend.create_account(email, password, name).await?;
        self.backend.create_session(email, password).await?;
        self.backend.current_identity().await
    }

    async fn run_sign_in(&self, email: &str, password: &str) -> Result<Identity, BackendError> {
        self.backend.terminate_sessions().await;
        self.backend.create_session(email, password).await?;
        self.backend.current_identity().await
    }

    /// Publish the use-case outcome: authenticated on success, anonymous
    /// otherwise, with the first failure handed back to the caller.
    fn finish(
        &self,
        use_case: &str,
        result: Result<Identity, BackendError>,
    ) -> Result<(), BackendError> {
        match result {
            Ok(identity) => {
                info!(use_case, user_id = %identity.id, "Session established");
                self.publish(SessionState::authenticated(identity));
                Ok(())
            }
            Err(e) => {
                debug!(use_case, error = %e, "Use-case failed, reverting to anonymous");
                self.publish(SessionState::anonymous());
                Err(e)
            }
        }
    }

    fn publish_loading(&self) {
        let loading = self.state_tx.borrow().loading();
        self.publish(loading);
    }

    fn publish(&self, state: SessionState) {
        self.state_tx.send_replace(state);
    }
}
