//! Checkout session resource client.

use std::sync::Arc;

use tracing::{debug, error, info};

use super::{read_body, translate_error};
use crate::error::OnvoError;
use crate::objects::{CheckoutSession, PaginatedResponse};
use crate::transport::Transport;

const CHECKOUT_ENDPOINT: &str = "/checkout/sessions/one-time-link";
const SESSIONS_ENDPOINT: &str = "/checkout/sessions";

/// Typed client for **checkout sessions** (one-time payment links).
///
/// Obtained from [`OnvoClient::checkout`](crate::OnvoClient::checkout).
#[derive(Debug, Clone)]
pub struct CheckoutApi {
    transport: Arc<Transport>,
}

impl CheckoutApi {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `POST /checkout/sessions/one-time-link` – create a checkout session.
    pub async fn create_session(
        &self,
        session: &CheckoutSession,
    ) -> Result<CheckoutSession, OnvoError> {
        let body = serde_json::to_string(session).map_err(|err| {
            OnvoError::InvalidArgument(format!("unable to serialize checkout session: {err}"))
        })?;
        debug!(%body, "creating checkout session");

        let response = self.transport.post(CHECKOUT_ENDPOINT, Some(body), None).await?;
        if response.status() != 201 {
            return Err(translate_error(response.status(), response.body()));
        }
        info!("checkout session created");
        read_body(response.body())
    }

    /// `POST /checkout/sessions/{id}/expire` – expire an open session.
    ///
    /// Returns `Ok(None)` when the session id is blank.
    pub async fn expire(&self, session_id: &str) -> Result<Option<CheckoutSession>, OnvoError> {
        if session_id.trim().is_empty() {
            error!("checkout session id is blank");
            return Ok(None);
        }
        let path = format!(
            "{SESSIONS_ENDPOINT}/{}/expire",
            urlencoding::encode(session_id)
        );

        let response = self.transport.post(&path, None, None).await?;
        if response.status() != 201 {
            return Err(translate_error(response.status(), response.body()));
        }
        info!(session_id, "checkout session expired");
        read_body(response.body()).map(Some)
    }

    /// `GET /checkout/sessions/one-time-link` – list checkout sessions.
    pub async fn list_sessions(&self) -> Result<PaginatedResponse<CheckoutSession>, OnvoError> {
        let response = self.transport.get(CHECKOUT_ENDPOINT, None).await?;
        if response.status() != 200 {
            return Err(translate_error(response.status(), response.body()));
        }
        read_body(response.body())
    }
}
