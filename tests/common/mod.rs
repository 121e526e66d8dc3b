#![allow(dead_code)]

use async_trait::async_trait;
use quay_client::registry::{HttpRequest, HttpResponse, Transport};
use quay_client::{QuayError, Result};
use reqwest::{Method, StatusCode};
use std::collections::HashMap;
use std::sync::Mutex;

/// Thread-safe mock: canned responses keyed by "METHOD path?query", every request recorded
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
    fail_with: Option<QuayError>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(err: QuayError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    pub fn route(self, method: Method, path_and_query: &str, status: StatusCode, body: &str) -> Self {
        self.routes.lock().unwrap().insert(
            format!("{} {}", method, path_and_query),
            HttpResponse::new(status, body),
        );
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn route_key(request: &HttpRequest) -> String {
    let mut key = format!("{} {}", request.method, request.url.path());
    if let Some(query) = request.url.query() {
        key.push('?');
        key.push_str(query);
    }
    key
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let key = route_key(&request);
        self.requests.lock().unwrap().push(request);

        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }

        Ok(self
            .routes
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| HttpResponse::new(StatusCode::NOT_FOUND, "")))
    }
}
