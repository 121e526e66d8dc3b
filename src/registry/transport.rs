//! HTTP transport seam for the Quay API client
//!
//! The client never talks to `reqwest` directly: it builds an [`HttpRequest`]
//! and hands it to a [`Transport`]. [`ReqwestTransport`] is the default
//! implementation; tests and callers with special needs supply their own.

use crate::error::{QuayError, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use url::Url;

/// HTTP transport shared by every call a client makes
///
/// Implementations must return only after the response body has been read to
/// the end, so the connection goes back to the pool on every exit path.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Outgoing request. None of the Quay operations carry a body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

/// Response with its body fully drained
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self::new(status, Vec::new())
    }

    /// Body as text, lossy; used when logging failed responses
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Standard transport backed by a pooled `reqwest::Client`
///
/// Timeouts, TLS and proxies come from however the caller configured the
/// client it passes in.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
        } = request;

        let response = self
            .client
            .request(method.clone(), url.clone())
            .headers(headers)
            .send()
            .await
            .map_err(|e| QuayError::Transport(format!("{} {} failed: {}", method, url, e)))?;

        let status = response.status();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}
