//! Error types surfaced by the OnvoPay client.

use std::fmt;

/// Boxed cause attached to transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the OnvoPay client.
#[derive(Debug, thiserror::Error)]
pub enum OnvoError {
    /// Client or transport configuration is invalid (missing/malformed base
    /// URL, bad secret key).
    #[error("configuration error: {0}")]
    Config(String),

    /// A request argument was rejected before anything was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport-level failure (I/O, timeout, protocol) while sending.
    ///
    /// The context names the verb and target URI; the underlying cause is
    /// chained via `source()`.
    #[error("{context}")]
    Transport {
        context: String,
        #[source]
        source: BoxError,
    },

    /// The API answered with an error response, or a response body could not
    /// be read into the expected shape.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Structured error built from an OnvoPay API error response.
///
/// A `status_code` of `0` means the status is unknown — the error was built
/// from an unreadable response body rather than a parsed error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code reported inside the error envelope (0 if unknown).
    pub status_code: u16,
    /// API-specific error code token, absent for generic errors.
    pub api_code: Option<String>,
    /// Detail messages, normalized to a list.
    pub messages: Vec<String>,
    /// Short human-readable error label (e.g. `"Forbidden"`).
    pub error: Option<String>,
}

impl ApiError {
    /// Build a structured error from a parsed error envelope.
    pub fn new(
        status_code: u16,
        api_code: impl Into<String>,
        messages: Vec<String>,
        error: Option<String>,
    ) -> Self {
        Self {
            status_code,
            api_code: Some(api_code.into()),
            messages,
            error,
        }
    }

    /// Build a generic error carrying only a message and an unknown status.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            status_code: 0,
            api_code: None,
            messages: vec![message.into()],
            error: None,
        }
    }

    /// Whether this error carries an API-specific error code.
    pub fn has_api_error(&self) -> bool {
        self.api_code.is_some()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OnvoPay API error - status: {}", self.status_code)?;
        if let Some(code) = &self.api_code {
            write!(f, ", code: {code}")?;
        }
        if let Some(error) = &self.error {
            write!(f, ", error: {error}")?;
        }
        if !self.messages.is_empty() {
            write!(f, ", messages: {}", self.messages.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_all_fields() {
        let err = ApiError::new(
            400,
            "API_100",
            vec!["name must not be empty".to_owned(), "bad email".to_owned()],
            Some("Bad Request".to_owned()),
        );
        assert_eq!(
            err.to_string(),
            "OnvoPay API error - status: 400, code: API_100, error: Bad Request, \
             messages: name must not be empty; bad email"
        );
        assert!(err.has_api_error());
    }

    #[test]
    fn generic_error_has_unknown_status() {
        let err = ApiError::with_message("unable to read error response");
        assert_eq!(err.status_code, 0);
        assert!(!err.has_api_error());
        assert_eq!(
            err.to_string(),
            "OnvoPay API error - status: 0, messages: unable to read error response"
        );
    }

    #[test]
    fn api_error_converts_into_onvo_error() {
        let err: OnvoError = ApiError::with_message("boom").into();
        assert!(matches!(err, OnvoError::Api(_)));
        assert_eq!(err.to_string(), "OnvoPay API error - status: 0, messages: boom");
    }
}
