//! Top-level OnvoPay client facade.

use std::sync::Arc;

use tracing::info;

use crate::api::{CheckoutApi, CustomersApi};
use crate::error::OnvoError;
use crate::transport::{HttpSend, Transport};

/// Default base URL for the OnvoPay API (v1).
pub const BASE_URL: &str = "https://api.onvopay.com/v1";

const LIVE_KEY_PREFIX: &str = "onvo_live_";
const TEST_KEY_PREFIX: &str = "onvo_test_";

/// A client for the OnvoPay API.
///
/// Construction validates the base URL and the secret key, then configures
/// the shared [`Transport`] with `Authorization` and `Content-Type` default
/// headers. The client is immutable and cheap to clone; resource clients
/// obtained from it share one transport.
///
/// ```no_run
/// use onvopay::OnvoClient;
/// use onvopay::objects::CreateCustomer;
///
/// # async fn run() -> Result<(), onvopay::OnvoError> {
/// let client = OnvoClient::new("onvo_test_abc123")?;
/// let customer = client
///     .customers()
///     .create(&CreateCustomer {
///         name: Some("John Doe".to_owned()),
///         email: Some("john@example.com".to_owned()),
///         ..CreateCustomer::default()
///     })
///     .await?;
/// println!("created customer {}", customer.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OnvoClient {
    transport: Arc<Transport>,
    test_mode: bool,
}

impl OnvoClient {
    /// Create a client against the default [`BASE_URL`].
    ///
    /// The secret key must start with `onvo_live_` or `onvo_test_`,
    /// selecting production or test mode.
    pub fn new(secret_key: impl Into<String>) -> Result<Self, OnvoError> {
        Self::with_base_url(BASE_URL, secret_key)
    }

    /// Create a client against an explicit base URL (e.g. a sandbox).
    pub fn with_base_url(
        base_url: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, OnvoError> {
        let base_url = base_url.into();
        let secret_key = secret_key.into();

        if base_url.trim().is_empty() {
            return Err(OnvoError::Config("base URL must not be empty".to_owned()));
        }
        if secret_key.trim().is_empty() {
            return Err(OnvoError::Config("secret key must not be empty".to_owned()));
        }
        if !secret_key.starts_with(LIVE_KEY_PREFIX) && !secret_key.starts_with(TEST_KEY_PREFIX) {
            return Err(OnvoError::Config(format!(
                "secret key must start with '{LIVE_KEY_PREFIX}' or '{TEST_KEY_PREFIX}'"
            )));
        }

        info!(%base_url, "initializing OnvoPay client");
        let test_mode = secret_key.starts_with(TEST_KEY_PREFIX);
        let transport = Transport::builder()
            .base_uri(base_url)
            .default_header("Content-Type", "application/json")
            .default_header("Authorization", format!("Bearer {secret_key}"))
            .build()?;
        Ok(Self {
            transport: Arc::new(transport),
            test_mode,
        })
    }

    /// Whether the client was configured with a test-mode secret key.
    pub fn is_test_mode(&self) -> bool {
        self.test_mode
    }

    /// Replace the low-level HTTP sender (e.g. with a test double).
    pub fn with_sender(self, sender: Arc<dyn HttpSend>) -> Self {
        let transport = (*self.transport).clone().with_sender(sender);
        Self {
            transport: Arc::new(transport),
            ..self
        }
    }

    /// Client for the customers resource.
    pub fn customers(&self) -> CustomersApi {
        CustomersApi::new(Arc::clone(&self.transport))
    }

    /// Client for checkout sessions.
    pub fn checkout(&self) -> CheckoutApi {
        CheckoutApi::new(Arc::clone(&self.transport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::MockSender;

    #[test]
    fn rejects_empty_inputs() {
        assert!(matches!(
            OnvoClient::with_base_url("", "onvo_test_x"),
            Err(OnvoError::Config(_))
        ));
        assert!(matches!(OnvoClient::new(""), Err(OnvoError::Config(_))));
    }

    #[test]
    fn rejects_secret_keys_without_a_recognized_prefix() {
        assert!(matches!(
            OnvoClient::new("sk_live_123"),
            Err(OnvoError::Config(_))
        ));
    }

    #[test]
    fn rejects_invalid_base_urls() {
        assert!(matches!(
            OnvoClient::with_base_url("not a url", "onvo_test_x"),
            Err(OnvoError::Config(_))
        ));
    }

    #[test]
    fn detects_test_mode_from_the_key_prefix() {
        assert!(OnvoClient::new("onvo_test_x").unwrap().is_test_mode());
        assert!(!OnvoClient::new("onvo_live_x").unwrap().is_test_mode());
    }

    #[tokio::test]
    async fn attaches_auth_and_content_type_headers() {
        let sender = MockSender::respond_with(404, "");
        let client = OnvoClient::with_base_url("https://api.example.com/v1", "onvo_test_abc123")
            .unwrap()
            .with_sender(sender.clone());

        client.customers().get("cus_1").await.unwrap();

        let request = sender.requests().remove(0);
        assert_eq!(
            request.headers.get("Authorization").unwrap(),
            "Bearer onvo_test_abc123"
        );
        assert_eq!(request.headers.get("Content-Type").unwrap(), "application/json");
        assert_eq!(request.url, "https://api.example.com/v1/customers/cus_1");
    }
}
