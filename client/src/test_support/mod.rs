//! In-memory AccessManager service for tests.
//!
//! [`InMemoryAccessManagerService`] implements [`HttpTransport`] by routing
//! each request against an in-process permission graph, so both facades can
//! be exercised end to end without a network. Responses follow the real
//! service's status codes, JSON shapes, and structured error payloads.
//!
//! ```rust,ignore
//! let service = Arc::new(InMemoryAccessManagerService::new());
//! let client = service.string_client()?;
//! client.add_user("user/1").await?;
//! assert!(client.contains_user("user/1").await?);
//! ```

mod graph;
mod routes;

use std::borrow::Cow;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use self::graph::PermissionGraph;
use self::routes::{Request, bad_request, respond};
use crate::client::{API_PATH, AccessManagerClient, AccessManagerStringElementClient};
use crate::domain::ports::{HttpMethod, HttpResponse, HttpTransport, HttpTransportError};
use crate::domain::{AccessManagerResult, ElementStringifiers};

/// Base URL the in-memory service answers for.
pub const BASE_URL: &str = "http://access-manager.test/";

/// Query parameter carrying the transitive-results flag.
const INCLUDE_INDIRECT_MAPPINGS: &str = "includeIndirectMappings";

/// A request as received by the in-memory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Full request URL, still percent-encoded.
    pub url: Url,
}

/// Fake AccessManager holding its state in memory.
#[derive(Debug, Default)]
pub struct InMemoryAccessManagerService {
    graph: Mutex<PermissionGraph>,
    requests: Mutex<Vec<RecordedRequest>>,
    scripted: Mutex<VecDeque<Result<HttpResponse, HttpTransportError>>>,
}

impl InMemoryAccessManagerService {
    /// An empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A string client bound to this service.
    ///
    /// # Errors
    ///
    /// Never in practice; the base URL is fixed and valid.
    pub fn string_client(self: &Arc<Self>) -> AccessManagerResult<AccessManagerStringElementClient> {
        AccessManagerStringElementClient::with_transport(BASE_URL, Arc::<Self>::clone(self))
    }

    /// A typed client bound to this service.
    ///
    /// # Errors
    ///
    /// Never in practice; the base URL is fixed and valid.
    pub fn client<TUser, TGroup, TComponent, TAccess>(
        self: &Arc<Self>,
        stringifiers: ElementStringifiers<TUser, TGroup, TComponent, TAccess>,
    ) -> AccessManagerResult<AccessManagerClient<TUser, TGroup, TComponent, TAccess>> {
        AccessManagerClient::with_transport(BASE_URL, Arc::<Self>::clone(self), stringifiers)
    }

    /// Answer the next request with `outcome` instead of routing it.
    ///
    /// Scripted outcomes are consumed in the order they were queued.
    pub fn respond_next_with(&self, outcome: Result<HttpResponse, HttpTransportError>) {
        self.scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn handle(&self, method: HttpMethod, url: &Url) -> Result<HttpResponse, HttpTransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method,
                url: url.clone(),
            });
        let scripted = self
            .scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        if let Some(outcome) = scripted {
            debug!(%method, %url, "answering with scripted outcome");
            return outcome;
        }

        let Some(relative) = url
            .path()
            .strip_prefix('/')
            .and_then(|path| path.strip_prefix(API_PATH))
        else {
            return Ok(HttpResponse::new(404, "Not Found"));
        };
        let decoded: Result<Vec<String>, _> = relative
            .split('/')
            .map(|segment| urlencoding::decode(segment).map(Cow::into_owned))
            .collect();
        let Ok(segments) = decoded else {
            return Ok(bad_request(&format!("{method} {relative}")));
        };
        let borrowed: Vec<&str> = segments.iter().map(String::as_str).collect();
        let request = Request {
            method,
            segments: &borrowed,
            include_indirect_mappings: include_indirect_mappings(url),
        };

        let mut graph = self.graph.lock().unwrap_or_else(PoisonError::into_inner);
        let response = respond(&mut graph, &request);
        debug!(%method, %url, status = response.status, "answered request");
        Ok(response)
    }
}

fn include_indirect_mappings(url: &Url) -> bool {
    url.query_pairs()
        .any(|(name, value)| name == INCLUDE_INDIRECT_MAPPINGS && value == "true")
}

#[async_trait]
impl HttpTransport for InMemoryAccessManagerService {
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpTransportError> {
        self.handle(HttpMethod::Get, url)
    }

    async fn post(&self, url: &Url) -> Result<HttpResponse, HttpTransportError> {
        self.handle(HttpMethod::Post, url)
    }

    async fn delete(&self, url: &Url) -> Result<HttpResponse, HttpTransportError> {
        self.handle(HttpMethod::Delete, url)
    }
}
