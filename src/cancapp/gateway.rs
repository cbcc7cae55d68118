//! Outbound HTTP for the console. Every backend call goes through
//! [`Gateway::call`], which attaches the stored bearer token, sends JSON and
//! decodes the reply with the envelope-first policy from [`super::envelope`].
//!
//! The gateway reads the token from storage on every call rather than caching
//! it, so a login or logout is visible to the next request without any
//! coordination. Tokens and request bodies are never logged.

use super::{
    envelope::{decode, failure_message, Reply},
    error::{Error, Result},
    storage::{Storage, TOKEN_KEY},
};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::{de::DeserializeOwned, Serialize};
use std::{sync::Arc, time::Duration};
use tracing::{debug, instrument, warn};
use ulid::Ulid;
use url::Url;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Method, body and extra headers for a single call.
#[derive(Clone, Debug)]
pub struct CallOptions {
    method: Method,
    body: Option<String>,
    headers: Vec<(String, String)>,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl CallOptions {
    #[must_use]
    pub const fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub const fn get() -> Self {
        Self::new(Method::GET)
    }

    #[must_use]
    pub const fn post() -> Self {
        Self::new(Method::POST)
    }

    #[must_use]
    pub const fn put() -> Self {
        Self::new(Method::PUT)
    }

    #[must_use]
    pub const fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Serializes `body` as the JSON request payload.
    ///
    /// # Errors
    /// Returns `Error::Serialization` if the body cannot be encoded.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let payload = serde_json::to_string(body)
            .map_err(|err| Error::Serialization(format!("Failed to encode request: {err}")))?;
        self.body = Some(payload);
        Ok(self)
    }

    /// Adds a header; caller headers replace the gateway defaults.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }
}

#[derive(Clone)]
pub struct Gateway {
    client: Client,
    base_url: String,
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Builds a gateway for `base_url` reading the bearer token from `storage`.
    ///
    /// # Errors
    /// Returns `Error::Config` if the base URL is not an absolute http(s) URL,
    /// or if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration, storage: Arc<dyn Storage>) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url)
            .map_err(|err| Error::Config(format!("Invalid API base URL {base_url}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Unsupported API base URL scheme: {}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| Error::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url,
            storage,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues one request and decodes its reply.
    ///
    /// # Errors
    /// - `Error::Request` for non-2xx responses, with the body's `message` or
    ///   `title` when present, otherwise the status reason.
    /// - `Error::Decode` when a non-empty body matches neither response shape.
    /// - `Error::Network` / `Error::Timeout` for transport failures.
    #[instrument(
        name = "gateway.call",
        skip(self, options),
        fields(method = %options.method, request_id = tracing::field::Empty)
    )]
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<Reply<T>> {
        let request_id = Ulid::new().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let url = build_url(&self.base_url, endpoint);
        let headers = self.headers(&request_id, &options.headers)?;

        let mut request = self
            .client
            .request(options.method.clone(), &url)
            .headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            let message = failure_message(&body, status.canonical_reason());
            return Err(Error::Request {
                status: status.as_u16(),
                message,
            });
        }

        decode(&body)
    }

    /// Calls `endpoint` and requires a payload in the reply.
    ///
    /// # Errors
    /// Same as [`Gateway::call`], plus `Error::Decode` for an empty body.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<T> {
        self.call(endpoint, options).await?.into_content()
    }

    fn headers(&self, request_id: &str, extra: &[(String, String)]) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(REQUEST_ID_HEADER),
            header_value(request_id)?,
        );

        match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.trim().is_empty() => {
                let mut value = header_value(&format!("Bearer {}", token.trim()))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Ok(_) => {}
            Err(err) => warn!("sending request without a bearer token: {err}"),
        }

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.trim().as_bytes())
                .map_err(|err| Error::Serialization(format!("Invalid header name {name}: {err}")))?;
            headers.insert(name, header_value(value)?);
        }

        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|err| Error::Serialization(format!("Invalid header value: {err}")))
}

/// Joins the base URL and an endpoint path without doubling slashes.
fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancapp::storage::MemoryStorage;
    use anyhow::{anyhow, Result};
    use serde::Deserialize;
    use serde_json::{json, Value};
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    struct Point {
        x: i64,
    }

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn gateway(uri: &str, storage: Arc<MemoryStorage>) -> Result<Gateway> {
        Ok(Gateway::new(uri, Duration::from_secs(5), storage)?)
    }

    #[test]
    fn build_url_trims_slashes() {
        assert_eq!(
            build_url("http://cancapp.runasp.net/", "/api/admin/users"),
            "http://cancapp.runasp.net/api/admin/users"
        );
        assert_eq!(
            build_url("http://cancapp.runasp.net", "api/admin/users"),
            "http://cancapp.runasp.net/api/admin/users"
        );
        assert_eq!(build_url("", "/api"), "/api");
    }

    #[test]
    fn new_rejects_invalid_base_url() {
        let storage = Arc::new(MemoryStorage::new());
        assert!(matches!(
            Gateway::new("not a url", Duration::from_secs(1), storage.clone()),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Gateway::new("ftp://cancapp.test", Duration::from_secs(1), storage),
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn call_attaches_bearer_token_from_storage() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/dashboard/stats"))
            .and(header("Authorization", "Bearer stored-token"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"x": 1})))
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "stored-token")?;
        let gateway = gateway(&server.uri(), storage)?;

        let point: Point = gateway
            .fetch("/api/admin/dashboard/stats", CallOptions::get())
            .await?;
        assert_eq!(point, Point { x: 1 });
        Ok(())
    }

    #[tokio::test]
    async fn call_omits_authorization_without_token() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let gateway = gateway(&server.uri(), Arc::new(MemoryStorage::new()))?;
        let users: Vec<Value> = gateway.fetch("/api/admin/users", CallOptions::get()).await?;
        assert!(users.is_empty());

        let requests = server
            .received_requests()
            .await
            .ok_or_else(|| anyhow!("wiremock request recording is disabled"))?;
        let request = requests.first().ok_or_else(|| anyhow!("no request"))?;
        assert!(request.headers.get("authorization").is_none());
        assert!(request.headers.get(REQUEST_ID_HEADER).is_some());
        Ok(())
    }

    #[tokio::test]
    async fn caller_headers_override_defaults() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/admin/content/warn"))
            .and(header("Authorization", "Bearer override"))
            .and(header("X-Trace", "abc"))
            .and(body_json(json!({"reason": "spam"})))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "stored-token")?;
        let gateway = gateway(&server.uri(), storage)?;

        let options = CallOptions::post()
            .json(&json!({"reason": "spam"}))?
            .header("Authorization", "Bearer override")
            .header("X-Trace", "abc");
        let reply: Reply<Value> = gateway.call("/api/admin/content/warn", options).await?;
        assert!(reply.is_no_content());
        Ok(())
    }

    #[tokio::test]
    async fn call_unwraps_envelope() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wrapped"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "isSuccess": true,
                "value": {"x": 1},
                "errors": []
            })))
            .mount(&server)
            .await;

        let gateway = gateway(&server.uri(), Arc::new(MemoryStorage::new()))?;
        let reply: Reply<Point> = gateway.call("/wrapped", CallOptions::get()).await?;
        assert_eq!(reply, Reply::Content(Point { x: 1 }));
        Ok(())
    }

    #[tokio::test]
    async fn non_success_uses_body_message() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/denied"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "nope"})))
            .mount(&server)
            .await;

        let gateway = gateway(&server.uri(), Arc::new(MemoryStorage::new()))?;
        let err = gateway
            .call::<Value>("/denied", CallOptions::get())
            .await
            .err()
            .ok_or_else(|| anyhow!("expected request error"))?;
        match err {
            Error::Request { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "nope");
            }
            other => return Err(anyhow!("unexpected error: {other}")),
        }
        Ok(())
    }

    #[tokio::test]
    async fn non_success_without_json_uses_status_text() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/admin/content/posts/9"))
            .respond_with(ResponseTemplate::new(404).set_body_string("<html>missing</html>"))
            .mount(&server)
            .await;

        let gateway = gateway(&server.uri(), Arc::new(MemoryStorage::new()))?;
        let err = gateway
            .call::<Value>("/api/admin/content/posts/9", CallOptions::delete())
            .await
            .err()
            .ok_or_else(|| anyhow!("expected request error"))?;
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().ends_with("Not Found"));
        Ok(())
    }

    #[tokio::test]
    async fn empty_success_body_is_no_content() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/admin/verifications/1/approve"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let gateway = gateway(&server.uri(), Arc::new(MemoryStorage::new()))?;
        let reply: Reply<Point> = gateway
            .call("/api/admin/verifications/1/approve", CallOptions::post())
            .await?;
        assert!(reply.is_no_content());
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() -> Result<()> {
        let port = {
            let Ok(listener) = TcpListener::bind("127.0.0.1:0") else {
                eprintln!("Skipping test: cannot bind localhost");
                return Ok(());
            };
            listener.local_addr()?.port()
        };

        let gateway = gateway(
            &format!("http://127.0.0.1:{port}"),
            Arc::new(MemoryStorage::new()),
        )?;
        let result = gateway.call::<Value>("/api", CallOptions::get()).await;
        assert!(matches!(result, Err(Error::Network(_))));
        Ok(())
    }
}
