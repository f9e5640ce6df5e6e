//! Reqwest-backed transport adapter.
//!
//! This adapter owns connection details only: pooling, TLS, the request
//! timeout, and the user agent. Every HTTP status is handed back to the client
//! core unchanged; only failures that prevent a response are errors.

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};

use crate::config::AccessManagerClientSettings;
use crate::domain::ports::{HttpResponse, HttpTransport, HttpTransportError};

/// Transport adapter issuing requests through one pooled reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build an adapter with an explicit whole-request timeout and user agent.
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use access_manager_client::{AccessManagerStringElementClient, ReqwestTransport};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let transport = ReqwestTransport::new(Duration::from_secs(5), "sync-job/1.0")?;
    /// let client =
    ///     AccessManagerStringElementClient::with_transport("http://127.0.0.1:5000/", Arc::new(transport))?;
    /// client.add_user("user1").await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Build an adapter from client settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn from_settings(settings: &AccessManagerClientSettings) -> Result<Self, reqwest::Error> {
        Self::new(settings.timeout(), settings.user_agent())
    }

    /// Wrap an existing reqwest client, keeping its configuration.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn execute(request: RequestBuilder) -> Result<HttpResponse, HttpTransportError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_transport_error)?;
        Ok(HttpResponse::new(status, body))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpTransportError> {
        let request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        Self::execute(request).await
    }

    async fn post(&self, url: &Url) -> Result<HttpResponse, HttpTransportError> {
        Self::execute(self.client.post(url.clone()).body("")).await
    }

    async fn delete(&self, url: &Url) -> Result<HttpResponse, HttpTransportError> {
        Self::execute(self.client.delete(url.clone())).await
    }
}

fn map_transport_error(error: reqwest::Error) -> HttpTransportError {
    let message = describe(&error);
    if error.is_timeout() {
        HttpTransportError::timeout(message)
    } else if error.is_connect() {
        HttpTransportError::connect(message)
    } else {
        HttpTransportError::request(message)
    }
}

/// Render the error with its cause chain, so the root cause (for example
/// "Connection refused") is not hidden behind reqwest's summary line.
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = StdError::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    //! Adapter coverage against a local mock HTTP server.

    use super::*;
    use mockito::Server;
    use rstest::rstest;

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(Duration::from_secs(5), "access-manager-client-tests")
            .expect("client should build")
    }

    fn url_for(server: &mockito::ServerGuard, path: &str) -> Url {
        Url::parse(&format!("{}{path}", server.url())).expect("valid mock URL")
    }

    #[tokio::test]
    async fn returns_success_bodies_verbatim() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/users")
            .match_header("accept", "application/json")
            .match_header("user-agent", "access-manager-client-tests")
            .with_status(200)
            .with_body(r#"["user1","user2"]"#)
            .create_async()
            .await;

        let response = transport()
            .get(&url_for(&server, "/api/v1/users"))
            .await
            .expect("request should complete");
        mock.assert_async().await;
        assert_eq!(response, HttpResponse::new(200, r#"["user1","user2"]"#));
    }

    #[rstest]
    #[case::not_found(404, r#"{"code":"NotFoundException","message":"missing"}"#)]
    #[case::server_error(500, "Internal Server Error")]
    #[case::created_for_get(201, "")]
    #[tokio::test]
    async fn hands_every_status_back_to_the_caller(#[case] status: usize, #[case] body: &str) {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/groups")
            .with_status(status)
            .with_body(body)
            .create_async()
            .await;

        let response = transport()
            .get(&url_for(&server, "/api/v1/groups"))
            .await
            .expect("non-success statuses are not transport errors");
        assert_eq!(usize::from(response.status), status);
        assert_eq!(response.body.as_deref(), Some(body));
    }

    #[tokio::test]
    async fn posts_and_deletes_reach_the_element_path() {
        let mut server = Server::new_async().await;
        let post = server
            .mock("POST", "/api/v1/users/user1")
            .with_status(201)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/api/v1/users/user1")
            .with_status(200)
            .create_async()
            .await;
        let url = url_for(&server, "/api/v1/users/user1");

        let created = transport().post(&url).await.expect("POST should complete");
        let removed = transport().delete(&url).await.expect("DELETE should complete");
        post.assert_async().await;
        delete.assert_async().await;
        assert_eq!(created.status, 201);
        assert_eq!(removed.status, 200);
    }

    #[tokio::test]
    async fn refused_connections_map_to_connect_errors() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let address = listener.local_addr().expect("listener address");
        drop(listener);
        let url = Url::parse(&format!("http://{address}/api/v1/users")).expect("valid URL");

        let error = transport()
            .get(&url)
            .await
            .expect_err("nothing is listening");
        assert!(
            matches!(error, HttpTransportError::Connect { .. }),
            "unexpected error: {error:?}",
        );
        assert!(!error.message().is_empty());
    }

    #[tokio::test]
    async fn stalled_responses_map_to_timeouts() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let address = listener.local_addr().expect("listener address");
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.expect("accept connection");
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });
        let url = Url::parse(&format!("http://{address}/api/v1/users")).expect("valid URL");
        let slow = ReqwestTransport::new(Duration::from_millis(200), "access-manager-client-tests")
            .expect("client should build");

        let error = slow.get(&url).await.expect_err("request should time out");
        server.abort();
        assert!(
            matches!(error, HttpTransportError::Timeout { .. }),
            "unexpected error: {error:?}",
        );
    }
}
