//! Driven port for issuing HTTP requests against the AccessManager service.
//!
//! The transport owns sockets, TLS, timeouts, and connection reuse. It reports
//! every HTTP status it receives as a successful [`HttpResponse`]; only
//! failures that prevent a response from arriving are returned as
//! [`HttpTransportError`]. Status classification belongs to the client core.

use std::fmt;

use async_trait::async_trait;
use url::Url;

use super::define_port_error;

/// HTTP methods used by the AccessManager REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Query or existence check.
    Get,
    /// Create an element or mapping.
    Post,
    /// Remove an element or mapping.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "Get",
            Self::Post => "Post",
            Self::Delete => "Delete",
        })
    }
}

/// Status and raw body of a response received from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric HTTP status code.
    pub status: u16,
    /// Response body text, or `None` when the transport could not supply one.
    pub body: Option<String>,
}

impl HttpResponse {
    /// Build a response carrying a body.
    ///
    /// # Examples
    ///
    /// ```
    /// use access_manager_client::domain::ports::HttpResponse;
    ///
    /// let response = HttpResponse::new(201, "");
    /// assert!(response.is_success());
    /// assert_eq!(response.body.as_deref(), Some(""));
    /// ```
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(body.into()),
        }
    }

    /// Build a response without any body.
    #[must_use]
    pub const fn without_body(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Return whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

define_port_error! {
    /// Failures that prevented an HTTP response from being received.
    pub enum HttpTransportError {
        /// The connection could not be established (refused, DNS, TLS).
        Connect { message: String } => "{message}",
        /// The request or response exceeded the configured timeout.
        Timeout { message: String } => "{message}",
        /// Any other failure while sending the request or reading the body,
        /// including cancellation.
        Request { message: String } => "{message}",
    }
}

impl HttpTransportError {
    /// Diagnostic text reported by the underlying transport.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Connect { message } | Self::Timeout { message } | Self::Request { message } => {
                message
            }
        }
    }
}

/// Port for sending AccessManager requests.
///
/// Requests never carry a body; POST and DELETE encode everything in the URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET request.
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpTransportError>;

    /// Issue a POST request with an empty body.
    async fn post(&self, url: &Url) -> Result<HttpResponse, HttpTransportError>;

    /// Issue a DELETE request.
    async fn delete(&self, url: &Url) -> Result<HttpResponse, HttpTransportError>;
}
