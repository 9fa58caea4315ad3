//! HTTP transport shared by all resource clients.
//!
//! [`Transport`] wraps a low-level sender behind the [`HttpSend`] trait so
//! tests can substitute a fabricated sender for `reqwest`. It resolves
//! request paths against an optional base URI, merges default and per-call
//! headers, and wraps every send failure into [`OnvoError::Transport`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::{BoxError, OnvoError};

/// HTTP verbs supported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A fully formed request handed to the low-level sender.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    /// Merged headers; names are kept exactly as supplied.
    pub headers: HashMap<String, String>,
    /// Body text, `None` for an empty-body request.
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

/// Response envelope returned by a single send: status code, headers, and
/// the body as text.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: String,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

/// Low-level HTTP sender.
///
/// Implementations accept a fully formed [`Request`] and return a
/// [`Response`] or fail with the underlying I/O error. The default
/// implementation is [`ReqwestSender`]; tests substitute their own to
/// intercept outgoing requests without network I/O.
#[async_trait]
pub trait HttpSend: fmt::Debug + Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, BoxError>;
}

/// [`HttpSend`] implementation backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestSender {
    client: reqwest::Client,
}

impl ReqwestSender {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestSender {
    async fn send(&self, request: Request) -> Result<Response, BoxError> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.as_str());
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_owned(), value.to_owned());
            }
        }
        let body = response.text().await?;
        Ok(Response::new(status, headers, body))
    }
}

/// Immutable HTTP client with a base URI, default headers, and an optional
/// per-request timeout.
///
/// All configuration is fixed at construction, so a `Transport` can be
/// shared freely across tasks.
#[derive(Debug, Clone)]
pub struct Transport {
    sender: Arc<dyn HttpSend>,
    base_uri: Option<String>,
    default_headers: HashMap<String, String>,
    request_timeout: Option<Duration>,
}

impl Transport {
    pub fn builder() -> TransportBuilder {
        TransportBuilder::default()
    }

    /// Replace the low-level sender (e.g. with a test double).
    pub fn with_sender(mut self, sender: Arc<dyn HttpSend>) -> Self {
        self.sender = sender;
        self
    }

    pub async fn get(
        &self,
        path: &str,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<Response, OnvoError> {
        self.request(Method::Get, Some(path), None, extra_headers).await
    }

    pub async fn delete(
        &self,
        path: &str,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<Response, OnvoError> {
        self.request(Method::Delete, Some(path), None, extra_headers)
            .await
    }

    pub async fn post(
        &self,
        path: &str,
        body: Option<String>,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<Response, OnvoError> {
        self.request(Method::Post, Some(path), body, extra_headers).await
    }

    pub async fn put(
        &self,
        path: &str,
        body: Option<String>,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<Response, OnvoError> {
        self.request(Method::Put, Some(path), body, extra_headers).await
    }

    pub async fn patch(
        &self,
        path: &str,
        body: Option<String>,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<Response, OnvoError> {
        self.request(Method::Patch, Some(path), body, extra_headers).await
    }

    /// Send a request with an explicit method and an optional path.
    ///
    /// An absent path targets the base URI directly; an absolute path (one
    /// with a scheme) bypasses the base URI entirely.
    pub async fn request(
        &self,
        method: Method,
        path: Option<&str>,
        body: Option<String>,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<Response, OnvoError> {
        let url = self.resolve(path)?;

        let mut headers = self.default_headers.clone();
        if let Some(extra) = extra_headers {
            for (name, value) in extra {
                if name.trim().is_empty() {
                    continue;
                }
                headers.insert(name.clone(), value.clone());
            }
        }

        tracing::debug!(%method, %url, "sending request");
        let request = Request {
            method,
            url: url.clone(),
            headers,
            body,
            timeout: self.request_timeout,
        };
        self.sender
            .send(request)
            .await
            .map_err(|source| OnvoError::Transport {
                context: format!("I/O error during {method} request to {url}"),
                source,
            })
    }

    /// Resolve a request path against the configured base URI.
    fn resolve(&self, path: Option<&str>) -> Result<String, OnvoError> {
        let Some(path) = path else {
            return self.base_uri.clone().ok_or_else(|| {
                OnvoError::Config("path must be given when no base URI is configured".to_owned())
            });
        };
        if Url::parse(path).is_ok() {
            // Absolute URI, use it verbatim.
            return Ok(path.to_owned());
        }
        let Some(base) = &self.base_uri else {
            return Err(OnvoError::Config(format!(
                "relative path '{path}' given but no base URI is configured"
            )));
        };
        Ok(match (base.ends_with('/'), path.starts_with('/')) {
            (true, true) => format!("{base}{}", &path[1..]),
            (false, false) => format!("{base}/{path}"),
            _ => format!("{base}{path}"),
        })
    }
}

/// Builder for [`Transport`].
#[derive(Debug, Default)]
pub struct TransportBuilder {
    base_uri: Option<String>,
    default_headers: HashMap<String, String>,
    request_timeout: Option<Duration>,
    sender: Option<Arc<dyn HttpSend>>,
}

impl TransportBuilder {
    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Add a default header sent with every request. Blank names are
    /// ignored.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.default_headers.insert(name, value.into());
        }
        self
    }

    pub fn default_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self = self.default_header(name, value);
        }
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn sender(mut self, sender: Arc<dyn HttpSend>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Validate the configuration and build the transport.
    pub fn build(self) -> Result<Transport, OnvoError> {
        if let Some(base) = &self.base_uri {
            let parsed = Url::parse(base)
                .map_err(|err| OnvoError::Config(format!("invalid base URI '{base}': {err}")))?;
            if !parsed.has_host() {
                return Err(OnvoError::Config(format!(
                    "invalid base URI '{base}': missing authority"
                )));
            }
        }
        Ok(Transport {
            sender: self
                .sender
                .unwrap_or_else(|| Arc::new(ReqwestSender::default())),
            base_uri: self.base_uri,
            default_headers: self.default_headers,
            request_timeout: self.request_timeout,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fabricated sender used by unit tests across the crate.

    use std::sync::Mutex;

    use super::*;

    type Handler = dyn Fn(&Request) -> Result<Response, BoxError> + Send + Sync;

    /// [`HttpSend`] double that answers from a closure and records every
    /// request it sees.
    pub(crate) struct MockSender {
        handler: Box<Handler>,
        requests: Mutex<Vec<Request>>,
    }

    impl fmt::Debug for MockSender {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("MockSender").finish_non_exhaustive()
        }
    }

    impl MockSender {
        pub(crate) fn new(
            handler: impl Fn(&Request) -> Result<Response, BoxError> + Send + Sync + 'static,
        ) -> Arc<Self> {
            Arc::new(Self {
                handler: Box::new(handler),
                requests: Mutex::new(Vec::new()),
            })
        }

        /// Sender that always answers with the given status and body.
        pub(crate) fn respond_with(status: u16, body: &str) -> Arc<Self> {
            let body = body.to_owned();
            Self::new(move |_| Ok(Response::new(status, HashMap::new(), body.clone())))
        }

        pub(crate) fn requests(&self) -> Vec<Request> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpSend for MockSender {
        async fn send(&self, request: Request) -> Result<Response, BoxError> {
            let result = (self.handler)(&request);
            self.requests.lock().unwrap().push(request);
            result
        }
    }
}
