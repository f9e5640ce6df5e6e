//! Request/response core shared by both facades.
//!
//! Builds request URLs under `<base>/api/v1/`, drives the transport port, and
//! turns responses into results. Transport failures and non-success statuses
//! are reported as [`AccessManagerError`]; nothing is retried here.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::error_response::{classify_non_success_response, is_not_found_response};
use super::path::RequestPath;
use crate::domain::{AccessManagerError, AccessManagerResult};
use crate::domain::ports::{HttpMethod, HttpResponse, HttpTransport, HttpTransportError};

/// Versioned API root appended to every base URL.
pub const API_PATH: &str = "api/v1/";

/// Status the service returns for a successful POST.
const CREATED: u16 = 201;

/// Status the service returns for a successful DELETE.
const OK: u16 = 200;

/// Resolve the API root for `base_url`.
///
/// # Errors
///
/// Returns [`AccessManagerError::InvalidBaseUrl`] when the URL does not parse,
/// is not `http`/`https`, or cannot act as a base for relative paths.
pub(crate) fn api_root(base_url: &str) -> AccessManagerResult<Url> {
    let invalid = |message: String| AccessManagerError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        message,
    };

    let with_slash = if base_url.ends_with('/') {
        base_url.to_owned()
    } else {
        format!("{base_url}/")
    };
    let parsed = Url::parse(&with_slash).map_err(|error| invalid(error.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    parsed
        .join(API_PATH)
        .map_err(|error| invalid(error.to_string()))
}

/// Issues requests against one AccessManager instance.
#[derive(Clone)]
pub(crate) struct RequestCore {
    api_root: Url,
    transport: Arc<dyn HttpTransport>,
}

impl RequestCore {
    /// Bind a transport to the API root under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessManagerError::InvalidBaseUrl`] for unusable base URLs.
    pub(crate) fn new(base_url: &str, transport: Arc<dyn HttpTransport>) -> AccessManagerResult<Self> {
        Ok(Self {
            api_root: api_root(base_url)?,
            transport,
        })
    }

    /// The `<base>/api/v1/` root every request is resolved against.
    pub(crate) const fn api_root(&self) -> &Url {
        &self.api_root
    }

    /// Resolve `path` against the API root.
    ///
    /// URL resolution collapses `.` and `..` segments (escaped or not), so a
    /// resolved path that differs from the one requested is rejected rather
    /// than sent to the wrong resource.
    fn url(&self, path: &RequestPath) -> AccessManagerResult<Url> {
        let relative = path.to_string();
        let url = match self.api_root.join(&relative) {
            Ok(url) => url,
            Err(error) => {
                return Err(AccessManagerError::InvalidRequestUrl {
                    path: relative,
                    message: error.to_string(),
                });
            }
        };
        let expected = format!("{}{}", self.api_root.path(), path.path());
        if url.path() == expected {
            Ok(url)
        } else {
            Err(AccessManagerError::InvalidRequestUrl {
                message: format!("path resolves to '{}'", url.path()),
                path: relative,
            })
        }
    }

    async fn send(&self, method: HttpMethod, url: &Url) -> AccessManagerResult<HttpResponse> {
        debug!(%method, %url, "sending AccessManager request");
        let outcome = match method {
            HttpMethod::Get => self.transport.get(url).await,
            HttpMethod::Post => self.transport.post(url).await,
            HttpMethod::Delete => self.transport.delete(url).await,
        };
        match outcome {
            Ok(response) => {
                debug!(%method, %url, status = response.status, "received AccessManager response");
                Ok(response)
            }
            Err(source) => Err(transport_error(method, url, source)),
        }
    }

    /// GET `path` and decode the 2xx body as JSON.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses, and undecodable bodies.
    pub(crate) async fn send_get<T: DeserializeOwned>(&self, path: &RequestPath) -> AccessManagerResult<T> {
        let url = self.url(path)?;
        let response = self.send(HttpMethod::Get, &url).await?;
        if !response.is_success() {
            return Err(non_success(HttpMethod::Get, &url, &response));
        }
        let body = response.body.as_deref().unwrap_or_default();
        Ok(serde_json::from_str(body)?)
    }

    /// GET `path` as an existence check.
    ///
    /// Any 2xx is `true`, a 404 carrying `NotFoundException` is `false`, and
    /// everything else is an error.
    pub(crate) async fn send_get_for_contains(&self, path: &RequestPath) -> AccessManagerResult<bool> {
        let url = self.url(path)?;
        let response = self.send(HttpMethod::Get, &url).await?;
        if response.is_success() {
            return Ok(true);
        }
        if is_not_found_response(response.status, response.body.as_deref()) {
            debug!(%url, "AccessManager reported resource as absent");
            return Ok(false);
        }
        Err(non_success(HttpMethod::Get, &url, &response))
    }

    /// POST `path` with an empty body; only 201 counts as success.
    pub(crate) async fn send_post(&self, path: &RequestPath) -> AccessManagerResult<()> {
        self.send_expecting(HttpMethod::Post, path, CREATED).await
    }

    /// DELETE `path`; only 200 counts as success.
    pub(crate) async fn send_delete(&self, path: &RequestPath) -> AccessManagerResult<()> {
        self.send_expecting(HttpMethod::Delete, path, OK).await
    }

    async fn send_expecting(
        &self,
        method: HttpMethod,
        path: &RequestPath,
        expected_status: u16,
    ) -> AccessManagerResult<()> {
        let url = self.url(path)?;
        let response = self.send(method, &url).await?;
        if response.status == expected_status {
            Ok(())
        } else {
            Err(non_success(method, &url, &response))
        }
    }
}

fn transport_error(method: HttpMethod, url: &Url, source: HttpTransportError) -> AccessManagerError {
    warn!(%method, %url, error = %source, "AccessManager request failed before a response arrived");
    AccessManagerError::Transport {
        method,
        url: url.to_string(),
        source,
    }
}

fn non_success(method: HttpMethod, url: &Url, response: &HttpResponse) -> AccessManagerError {
    warn!(%method, %url, status = response.status, "AccessManager returned a non-success status");
    classify_non_success_response(method, url, response.status, response.body.as_deref())
}
