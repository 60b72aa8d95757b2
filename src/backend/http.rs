//! HTTP implementation of the identity backend capability.
//!
//! Every request carries the configured project and platform identifiers;
//! the session credential issued by `create_session` travels in the
//! client's cookie store, so a backend handle must live at least as long
//! as the session it established.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;

use super::models::{Identity, Session};
use super::{BackendError, IdentityBackend};

const PROJECT_HEADER: &str = "X-Project-Id";
const PLATFORM_HEADER: &str = "X-Platform-Id";

#[derive(Debug, Clone)]
pub struct HttpIdentityBackend {
    config: Config,
    http: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountRequest<'a> {
    email: &'a str,
    name: &'a str,
    password: &'a str,
    user_id: String,
}

#[derive(Debug, Serialize)]
struct CreateSessionRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpIdentityBackend {
    pub fn new(config: Config) -> Result<Self, BackendError> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1{path}", self.config.endpoint.trim_end_matches('/'))
    }

    /// Send a request with the identification headers attached, mapping
    /// any non-2xx response to a `BackendError` carrying the backend's
    /// own message.
    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = request
            .header(PROJECT_HEADER, &self.config.project_id)
            .header(PLATFORM_HEADER, &self.config.platform_id)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Api {
            message: error_message(status, &body),
            status: status.as_u16(),
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

impl IdentityBackend for HttpIdentityBackend {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Identity, BackendError> {
        let body = CreateAccountRequest {
            email,
            name,
            password,
            user_id: uuid::Uuid::new_v4().to_string(),
        };
        let identity: Identity = self
            .send_json(self.http.post(self.url("/account")).json(&body))
            .await?;
        debug!(user_id = %identity.id, "Created account");
        Ok(identity)
    }

    async fn create_session(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let body = CreateSessionRequest { email, password };
        let session: Session = self
            .send_json(
                self.http
                    .post(self.url("/account/sessions/email"))
                    .json(&body),
            )
            .await?;
        debug!(session_id = %session.id, "Created session");
        Ok(session)
    }

    async fn current_identity(&self) -> Result<Identity, BackendError> {
        self.send_json(self.http.get(self.url("/account"))).await
    }

    async fn terminate_sessions(&self) {
        // Prefer wiping every session for the principal; fall back to just
        // the current one. A missing session is success for this call.
        let bulk = self
            .send(self.http.delete(self.url("/account/sessions")))
            .await;
        let bulk_err = match bulk {
            Ok(_) => {
                debug!("Terminated all sessions");
                return;
            }
            Err(e) => e,
        };

        match self
            .send(self.http.delete(self.url("/account/sessions/current")))
            .await
        {
            Ok(_) => debug!(bulk_error = %bulk_err, "Terminated current session only"),
            Err(current_err) => {
                debug!(bulk_error = %bulk_err, current_error = %current_err, "Session cleanup skipped")
            }
        }
    }
}

/// Extract a human-readable failure message from an error response.
///
/// Prefers the backend's JSON `message` field, then the raw body, then the
/// HTTP status canonical reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.filter(|m| !m.is_empty()) {
            return message;
        }
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
