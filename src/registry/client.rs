//! Quay API client for repository and robot account housekeeping
//!
//! Each operation is a single request/response round trip through the
//! injected [`Transport`]. Deletes are idempotent: a 404 means the resource is
//! already gone and is reported as `Ok(false)`.

use crate::config::ClientConfig;
use crate::error::{QuayError, Result};
use crate::logging::Logger;
use crate::registry::models::{ErrorPayload, Repository, RepositoryList, RobotAccount, RobotList};
use crate::registry::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::{Arc, RwLock};
use url::Url;

/// Builder for [`QuayClient`]
///
/// Without `with_logger` the client logs warnings (such as an unexpected
/// status on a list call) to stdout; pass `Logger::new_quiet()` to silence them.
pub struct QuayClientBuilder {
    url: String,
    token: String,
    transport: Option<Arc<dyn Transport>>,
    logger: Logger,
}

impl QuayClientBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: String::new(),
            transport: None,
            logger: Logger::new(false),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Reuse a caller-configured `reqwest::Client` (timeouts, TLS, proxy)
    pub fn with_http_client(self, client: Client) -> Self {
        self.with_transport(Arc::new(ReqwestTransport::new(client)))
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn build(self) -> Result<QuayClient> {
        let base_url = parse_base_url(&self.url)?;
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(ReqwestTransport::default()));

        Ok(QuayClient {
            base_url,
            token: RwLock::new(self.token),
            transport,
            logger: self.logger,
        })
    }
}

/// Client for the Quay management API
///
/// The client is `Send + Sync` and meant to be shared. The bearer token sits
/// behind a lock so it can be rotated while other calls are in flight; each
/// request captures the token once, when it is built.
pub struct QuayClient {
    base_url: Url,
    token: RwLock<String>,
    transport: Arc<dyn Transport>,
    logger: Logger,
}

impl std::fmt::Debug for QuayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuayClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl QuayClient {
    pub fn new(transport: Arc<dyn Transport>, token: impl Into<String>, url: &str) -> Result<Self> {
        Self::builder(url)
            .with_transport(transport)
            .with_token(token)
            .build()
    }

    pub fn builder(url: impl Into<String>) -> QuayClientBuilder {
        QuayClientBuilder::new(url)
    }

    /// Client using the default `reqwest` transport
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Self::builder(config.url.clone())
            .with_token(config.token.clone())
            .build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> Result<String> {
        self.token
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| QuayError::Config("Failed to acquire token read lock".to_string()))
    }

    /// Replace the bearer token used by subsequent requests
    pub fn set_token(&self, token: impl Into<String>) -> Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| QuayError::Config("Failed to acquire token write lock".to_string()))?;
        *guard = token.into();
        Ok(())
    }

    /// Delete an image repository. `Ok(false)` if it did not exist.
    pub async fn delete_repository(&self, organization: &str, repository: &str) -> Result<bool> {
        let url = self.endpoint(&["repository", organization, repository])?;
        self.delete(url, &format!("repository {}/{}", organization, repository))
            .await
    }

    /// Delete a robot account by its short name. `Ok(false)` if it did not exist.
    pub async fn delete_robot_account(&self, organization: &str, robot_name: &str) -> Result<bool> {
        let url = self.endpoint(&["organization", organization, "robots", robot_name])?;
        self.delete(url, &format!("robot account {}+{}", organization, robot_name))
            .await
    }

    /// All repositories in the organization, with last-modified timestamps
    pub async fn get_all_repositories(&self, organization: &str) -> Result<Vec<Repository>> {
        let mut url = self.endpoint(&["repository"])?;
        url.query_pairs_mut()
            .append_pair("last_modified", "true")
            .append_pair("namespace", organization);

        let list: RepositoryList = self.list(url, "listing repositories").await?;
        self.logger.verbose(&format!(
            "Found {} repositories in {}",
            list.repositories.len(),
            organization
        ));
        Ok(list.repositories)
    }

    /// All robot accounts in the organization
    pub async fn get_all_robot_accounts(&self, organization: &str) -> Result<Vec<RobotAccount>> {
        let url = self.endpoint(&["organization", organization, "robots"])?;

        let list: RobotList = self.list(url, "listing robot accounts").await?;
        self.logger.verbose(&format!(
            "Found {} robot accounts in {}",
            list.robots.len(),
            organization
        ));
        Ok(list.robots)
    }

    async fn delete(&self, url: Url, what: &str) -> Result<bool> {
        let response = self.send(Method::DELETE, url).await?;

        match response.status {
            StatusCode::NO_CONTENT => {
                self.logger.verbose(&format!("Deleted {}", what));
                Ok(true)
            }
            StatusCode::NOT_FOUND => {
                self.logger.verbose(&format!("{} not found, nothing to delete", what));
                Ok(false)
            }
            status => {
                let payload: ErrorPayload = serde_json::from_slice(&response.body)
                    .map_err(|e| QuayError::decode(status, e))?;
                Err(QuayError::Api {
                    status,
                    message: payload.error_message,
                })
            }
        }
    }

    async fn list<T: DeserializeOwned>(&self, url: Url, operation: &'static str) -> Result<T> {
        let response = self.send(Method::GET, url).await?;

        if response.status != StatusCode::OK {
            self.logger.warning(&format!(
                "Error {}, got status code {}",
                operation,
                response.status.as_u16()
            ));
            self.logger
                .detail(&format!("Response body: {}", response.text()));
            return Err(unexpected_status(&response, operation));
        }

        serde_json::from_slice(&response.body).map_err(|e| QuayError::decode(response.status, e))
    }

    async fn send(&self, method: Method, url: Url) -> Result<HttpResponse> {
        let request = HttpRequest {
            headers: self.headers()?,
            method,
            url,
        };

        self.logger
            .debug(&format!("{} {}", request.method, request.url));
        let response = self.transport.execute(request).await?;
        self.logger
            .debug(&format!("Response status: {}", response.status));

        Ok(response)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let token = self.token()?;
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| QuayError::Transport(format!("Invalid bearer token: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Base URL with `segments` appended, each percent-encoded as one path segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| QuayError::InvalidUrl(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn parse_base_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)?;
    if parsed.cannot_be_a_base() {
        return Err(QuayError::InvalidUrl(format!("{} cannot be a base URL", url)));
    }
    Ok(parsed)
}

// Prefer the server's own message when the body carries one.
fn unexpected_status(response: &HttpResponse, operation: &'static str) -> QuayError {
    match serde_json::from_slice::<ErrorPayload>(&response.body) {
        Ok(payload) => QuayError::Api {
            status: response.status,
            message: payload.error_message,
        },
        Err(_) => QuayError::UnexpectedStatus {
            status: response.status,
            operation,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> QuayClient {
        QuayClient::builder(url).with_token("t").build().unwrap()
    }

    #[test]
    fn endpoint_appends_segments() {
        let client = client("https://quay.io/api/v1");
        let url = client.endpoint(&["repository", "acme", "web"]).unwrap();
        assert_eq!(url.as_str(), "https://quay.io/api/v1/repository/acme/web");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = client("https://quay.io/api/v1/");
        let url = client.endpoint(&["organization", "acme", "robots"]).unwrap();
        assert_eq!(url.as_str(), "https://quay.io/api/v1/organization/acme/robots");
    }

    #[test]
    fn endpoint_encodes_each_segment() {
        let client = client("https://quay.io/api/v1");
        let url = client.endpoint(&["repository", "acme", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "https://quay.io/api/v1/repository/acme/a%2Fb%20c");
    }

    #[test]
    fn build_rejects_unusable_urls() {
        let err = QuayClient::builder("not a url").build().unwrap_err();
        assert!(matches!(err, QuayError::InvalidUrl(_)));

        let err = QuayClient::builder("mailto:ops@example.com").build().unwrap_err();
        assert!(matches!(err, QuayError::InvalidUrl(_)));
    }

    #[test]
    fn from_config_validates_first() {
        let config = ClientConfig::new("https://quay.io/api/v1", "abc");
        let client = QuayClient::from_config(&config).unwrap();
        assert_eq!(client.base_url().as_str(), "https://quay.io/api/v1");
        assert_eq!(client.token().unwrap(), "abc");

        let blank = ClientConfig::new("https://quay.io/api/v1", "");
        assert!(matches!(
            QuayClient::from_config(&blank),
            Err(QuayError::Config(_))
        ));
    }

    #[test]
    fn builder_logs_warnings_by_default() {
        let client = client("https://quay.io/api/v1");
        assert!(!client.logger.quiet);

        let silent = QuayClient::builder("https://quay.io/api/v1")
            .with_logger(Logger::new_quiet())
            .build()
            .unwrap();
        assert!(silent.logger.quiet);
    }

    #[test]
    fn headers_carry_bearer_token() {
        let client = client("https://quay.io/api/v1");
        let headers = client.headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer t");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let client = client("https://quay.io/api/v1");
        client.set_token("bad\ntoken").unwrap();
        assert!(matches!(client.headers(), Err(QuayError::Transport(_))));
    }

    #[test]
    fn set_token_replaces_token() {
        let client = client("https://quay.io/api/v1");
        client.set_token("rotated").unwrap();
        assert_eq!(client.token().unwrap(), "rotated");
    }

    #[test]
    fn poisoned_token_lock_is_config_error() {
        let client = client("https://quay.io/api/v1");
        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = client.token.write().unwrap();
            panic!("panic while holding the token lock");
        }));
        assert!(poisoned.is_err());

        assert!(matches!(client.token(), Err(QuayError::Config(_))));
        assert!(matches!(client.set_token("next"), Err(QuayError::Config(_))));
        assert!(matches!(client.headers(), Err(QuayError::Config(_))));
    }

    #[test]
    fn unexpected_status_prefers_error_payload() {
        let with_payload = HttpResponse::new(
            StatusCode::FORBIDDEN,
            r#"{"error_message":"Unauthorized"}"#,
        );
        assert_eq!(
            unexpected_status(&with_payload, "listing repositories"),
            QuayError::Api {
                status: StatusCode::FORBIDDEN,
                message: "Unauthorized".to_string(),
            }
        );

        let without = HttpResponse::new(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(
            unexpected_status(&without, "listing repositories"),
            QuayError::UnexpectedStatus {
                status: StatusCode::BAD_GATEWAY,
                operation: "listing repositories",
            }
        );
    }
}
