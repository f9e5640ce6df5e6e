//! Error model for AccessManager client calls.
//!
//! [`StructuredError`] mirrors the service's JSON error payload.
//! [`AccessManagerError`] is what every client operation returns.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use super::models::{ElementKind, NameValuePair};
use super::ports::{HttpMethod, HttpTransportError};
use super::stringifier::StringifierError;

/// Maximum depth of `innerError` causes kept when decoding an error payload.
pub const MAX_INNER_ERROR_DEPTH: usize = 16;

/// The service's standard error payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredError {
    /// Machine-readable error code, e.g. `UserNotFoundException`.
    pub code: String,
    /// Human-readable description.
    pub message: String,
    /// The server-side operation that failed, when reported.
    pub target: Option<String>,
    /// Additional named details, in the order received.
    pub attributes: Vec<NameValuePair>,
    /// The error that caused this one, when reported.
    pub inner_error: Option<Box<StructuredError>>,
}

impl StructuredError {
    /// Build an error with only a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            target: None,
            attributes: Vec::new(),
            inner_error: None,
        }
    }

    /// Set the target.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(NameValuePair::new(name, value));
        self
    }

    /// Set the inner error.
    #[must_use]
    pub fn with_inner_error(mut self, inner_error: Self) -> Self {
        self.inner_error = Some(Box::new(inner_error));
        self
    }

    /// Value of the first attribute called `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use access_manager_client::domain::StructuredError;
    ///
    /// let error = StructuredError::new("GroupNotFoundException", "Group 'abc' does not exist.")
    ///     .with_attribute("ParameterName", "group")
    ///     .with_attribute("Group", "abc");
    /// assert_eq!(error.attribute("Group"), Some("abc"));
    /// assert_eq!(error.attribute("User"), None);
    /// ```
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|pair| pair.name == name)
            .map(|pair| pair.value.as_str())
    }

    /// Number of errors in the cause chain, counting this one.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self.inner_error.as_deref();
        while let Some(inner) = current {
            depth += 1;
            current = inner.inner_error.as_deref();
        }
        depth
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl StdError for StructuredError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner_error
            .as_deref()
            .map(|inner| inner as &(dyn StdError + 'static))
    }
}

/// Errors returned by AccessManager client operations.
#[derive(Debug, Error)]
pub enum AccessManagerError {
    /// The request never produced a response (connection refused, DNS
    /// failure, timeout, cancellation).
    #[error("Failed to call URL '{url}' with '{method}' method.  {source}")]
    Transport {
        /// Method of the failed request.
        method: HttpMethod,
        /// URL of the failed request.
        url: String,
        /// Failure reported by the transport.
        #[source]
        source: HttpTransportError,
    },

    /// A user, group, entity type, or entity named in the request does not
    /// exist.
    #[error("{message}")]
    ElementNotFound {
        /// Kind of the missing element.
        element_type: ElementKind,
        /// Identifier of the missing element.
        resource_id: String,
        /// Message reported by the service.
        message: String,
    },

    /// The requested resource does not exist.
    #[error("{message}")]
    NotFound {
        /// Identifier of the missing resource.
        resource_id: String,
        /// Message reported by the service.
        message: String,
    },

    /// The service answered with a status the operation does not accept.
    #[error("{message}")]
    UnexpectedResponse {
        /// Received HTTP status.
        status: u16,
        /// Error payload, when the body decoded as one.
        error_response: Option<StructuredError>,
        /// Full description including method, URL, and status.
        message: String,
    },

    /// A success body could not be decoded.
    #[error(transparent)]
    Deserialization(#[from] serde_json::Error),

    /// An identifier returned by the service was rejected by a stringifier.
    #[error(transparent)]
    Stringifier(#[from] StringifierError),

    /// The configured base URL cannot be used.
    #[error("invalid AccessManager base URL '{base_url}': {message}")]
    InvalidBaseUrl {
        /// The rejected base URL.
        base_url: String,
        /// Why it was rejected.
        message: String,
    },

    /// Settings did not name a base URL.
    #[error("AccessManager base URL is not configured")]
    MissingBaseUrl,

    /// The default HTTP transport could not be initialised.
    #[error("failed to initialise HTTP transport: {message}")]
    TransportSetup {
        /// Why initialisation failed.
        message: String,
    },

    /// A request URL could not be assembled from the base URL.
    #[error("failed to build request URL for path '{path}': {message}")]
    InvalidRequestUrl {
        /// The relative path being appended.
        path: String,
        /// Why it was rejected.
        message: String,
    },
}

impl AccessManagerError {
    /// Return whether the error reports a missing element or resource.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. } | Self::NotFound { .. })
    }

    /// The decoded error payload behind a non-success status, if any.
    #[must_use]
    pub const fn error_response(&self) -> Option<&StructuredError> {
        match self {
            Self::UnexpectedResponse { error_response, .. } => error_response.as_ref(),
            _ => None,
        }
    }
}
