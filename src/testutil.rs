//! Shared test helpers — available to all `#[cfg(test)]` modules in the crate.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Semaphore;

use crate::backend::{BackendError, Identity, IdentityBackend, Session};

/// The identity every happy-path mock call returns.
pub fn test_identity() -> Identity {
    Identity {
        created_at: Utc::now(),
        email: "a@x.com".to_string(),
        id: "user-1".to_string(),
        name: "Ann".to_string(),
    }
}

/// A session bound to the given principal, expiring far in the future.
pub fn test_session(user_id: &str) -> Session {
    Session {
        expires_at: Utc::now() + chrono::Duration::hours(24),
        id: "sess-1".to_string(),
        user_id: user_id.to_string(),
    }
}

/// Pause/resume handshake for parking a mock operation mid-flight.
///
/// The mock signals `entered` when it reaches the gated operation and then
/// waits for a permit on `release`.
pub struct Gate {
    pub entered: Semaphore,
    pub release: Semaphore,
}

impl Gate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entered: Semaphore::new(0),
            release: Semaphore::new(0),
        })
    }
}

/// Scripted in-memory identity backend.
///
/// Records the order of adapter calls and fails an operation when its
/// `fail_*` message is set, mirroring how the HTTP adapter surfaces a
/// backend-reported failure.
pub struct MockBackend {
    pub calls: Arc<Mutex<Vec<&'static str>>>,
    pub fail_create_account: Option<String>,
    pub fail_create_session: Option<String>,
    pub fail_current_identity: Option<String>,
    /// Parks `create_session` until the test releases the gate.
    pub gate_create_session: Option<Arc<Gate>>,
    pub identity: Identity,
    /// Extra await inside every operation, to give interleavings a chance.
    pub op_delay: Duration,
}

impl MockBackend {
    /// A mock where every operation succeeds immediately.
    pub fn happy() -> Self {
        Self {
            calls: Arc::default(),
            fail_create_account: None,
            fail_create_session: None,
            fail_current_identity: None,
            gate_create_session: None,
            identity: test_identity(),
            op_delay: Duration::ZERO,
        }
    }

    async fn record(&self, op: &'static str) {
        self.calls.lock().unwrap().push(op);
        if !self.op_delay.is_zero() {
            tokio::time::sleep(self.op_delay).await;
        }
    }

    fn scripted_failure(message: &Option<String>) -> Option<BackendError> {
        message.as_ref().map(|m| BackendError::Api {
            message: m.clone(),
            status: 401,
        })
    }
}

impl IdentityBackend for MockBackend {
    async fn create_account(
        &self,
        _email: &str,
        _password: &str,
        _name: &str,
    ) -> Result<Identity, BackendError> {
        self.record("create_account").await;
        if let Some(e) = Self::scripted_failure(&self.fail_create_account) {
            return Err(e);
        }
        Ok(self.identity.clone())
    }

    async fn create_session(&self, _email: &str, _password: &str) -> Result<Session, BackendError> {
        self.record("create_session").await;
        if let Some(gate) = &self.gate_create_session {
            gate.entered.add_permits(1);
            gate.release.acquire().await.expect("gate closed").forget();
        }
        if let Some(e) = Self::scripted_failure(&self.fail_create_session) {
            return Err(e);
        }
        Ok(test_session(&self.identity.id))
    }

    async fn current_identity(&self) -> Result<Identity, BackendError> {
        self.record("current_identity").await;
        if let Some(e) = Self::scripted_failure(&self.fail_current_identity) {
            return Err(e);
        }
        Ok(self.identity.clone())
    }

    async fn terminate_sessions(&self) {
        self.record("terminate_sessions").await;
    }
}
