//! Rust client for the [OnvoPay](https://onvopay.com) payment-processing
//! REST API.
//!
//! The entry point is [`OnvoClient`]: it validates the base URL and secret
//! key, attaches the `Authorization: Bearer …` and `Content-Type:
//! application/json` default headers, and hands a shared [`Transport`] to
//! the typed resource clients ([`CustomersApi`], [`CheckoutApi`]).
//!
//! ```no_run
//! use onvopay::OnvoClient;
//! use onvopay::objects::CreateCustomer;
//!
//! # async fn run() -> Result<(), onvopay::OnvoError> {
//! let client = OnvoClient::new("onvo_test_abc123")?;
//!
//! let customer = client
//!     .customers()
//!     .create(&CreateCustomer {
//!         name: Some("John Doe".to_owned()),
//!         email: Some("john@example.com".to_owned()),
//!         ..CreateCustomer::default()
//!     })
//!     .await?;
//!
//! if let Some(found) = client.customers().get(&customer.id).await? {
//!     println!("{} spent {:?}", found.id, found.amount_spent);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Every non-success response is translated into one structured
//! [`ApiError`] carrying the status code, an API code token, the normalized
//! message list, and the error label. Transport-level failures surface as
//! [`OnvoError::Transport`] with the verb and target URI in the context.
//!
//! The low-level sender behind [`Transport`] is the [`HttpSend`] trait, so
//! tests can intercept outgoing requests and fabricate responses without
//! network I/O.

pub mod api;
mod client;
mod error;
pub mod objects;
pub mod transport;
mod url_builder;

pub use api::{CheckoutApi, CustomersApi};
pub use client::{BASE_URL, OnvoClient};
pub use error::{ApiError, BoxError, OnvoError};
pub use transport::{HttpSend, Method, Request, Response, Transport, TransportBuilder};
pub use url_builder::UrlBuilder;
