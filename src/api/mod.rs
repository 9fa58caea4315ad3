//! Resource-level API clients built on the shared [`Transport`].
//!
//! Each client formats its own endpoint paths, checks the expected success
//! status, and funnels every non-success response through
//! [`translate_error`].
//!
//! [`Transport`]: crate::transport::Transport

mod checkout;
mod customers;

pub use checkout::CheckoutApi;
pub use customers::CustomersApi;

use serde::de::DeserializeOwned;

use crate::error::{ApiError, OnvoError};
use crate::objects::ErrorResponse;

/// Fixed API-code token attached to every error built from a parsed
/// envelope.
pub(crate) const API_ERROR_CODE: &str = "API_100";

/// Sentinel for a non-success response whose body is not a readable error
/// envelope.
pub(crate) const UNREADABLE_ERROR_BODY: &str = "unable to read error response";

/// Sentinel for a success response whose body cannot be read into the
/// expected payload type. Distinct from [`UNREADABLE_ERROR_BODY`].
pub(crate) const UNREADABLE_CLIENT_BODY: &str = "unable to read client response";

/// Translate a non-success response into the structured API error.
///
/// The envelope's own status code is carried into the error; the response
/// status is only logged. An envelope without messages still surfaces its
/// error label as a single human-readable message.
pub(crate) fn translate_error(status: u16, body: &str) -> OnvoError {
    tracing::error!(status, "API request rejected");
    tracing::debug!(body, "error response body");
    let Ok(envelope) = serde_json::from_str::<ErrorResponse>(body) else {
        tracing::error!("unable to read error response body");
        return ApiError::with_message(UNREADABLE_ERROR_BODY).into();
    };
    if envelope.messages.is_empty() {
        let messages = envelope.error.iter().cloned().collect();
        return ApiError::new(envelope.status_code, API_ERROR_CODE, messages, envelope.error)
            .into();
    }
    ApiError::new(
        envelope.status_code,
        API_ERROR_CODE,
        envelope.messages,
        envelope.error,
    )
    .into()
}

/// Read a success-response body into the expected payload type.
pub(crate) fn read_body<T: DeserializeOwned>(body: &str) -> Result<T, OnvoError> {
    serde_json::from_str(body).map_err(|err| {
        tracing::error!(error = %err, "unable to read response body");
        ApiError::with_message(UNREADABLE_CLIENT_BODY).into()
    })
}
