// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes and CloudFront responses.

use crate::cdn::{CdnClient, CdnClientFactory, CdnCredentials, CdnError};
use async_trait::async_trait;
use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.respond("GET", path, status, body)
    }

    /// Add a response for PATCH requests matching the exact path
    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.respond("PATCH", path, status, body)
    }

    fn respond(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Every (method, path) received so far, in order
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of received requests with the given method
    pub fn count(&self, method: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .count()
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.requests
            .lock()
            .unwrap()
            .push((method.clone(), path.clone()));
        let response = self.find_response(&method, &path);

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| (404, not_found_json("resource", &path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a mock ConfigMap JSON response
pub fn config_map_json(namespace: &str, name: &str, data: &BTreeMap<&str, &str>) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        },
        "data": data
    })
    .to_string()
}

/// Create a mock Invalidation JSON response
pub fn invalidation_json(namespace: &str, name: &str, status: serde_json::Value) -> String {
    serde_json::json!({
        "apiVersion": "cloudfront.previousnext.com.au/v1alpha1",
        "kind": "Invalidation",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid",
            "generation": 1
        },
        "spec": {
            "configMap": "cf-creds",
            "path": "/images/*"
        },
        "status": status
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

#[derive(Default)]
struct StubState {
    create_result: Mutex<Option<Result<String, String>>>,
    statuses: Mutex<VecDeque<Result<String, String>>>,
    creates: AtomicUsize,
    polls: AtomicUsize,
    credentials: Mutex<Vec<CdnCredentials>>,
    caller_references: Mutex<Vec<String>>,
    paths: Mutex<Vec<String>>,
}

/// A scripted CDN: returns a fixed create result, then replays queued poll
/// results. Once the queue is empty every poll reports "InProgress".
#[derive(Clone, Default)]
pub struct StubCdn {
    state: Arc<StubState>,
}

impl StubCdn {
    /// Create succeeds with the given invalidation id
    pub fn new(invalidation_id: &str) -> Self {
        let stub = Self::default();
        *stub.state.create_result.lock().unwrap() = Some(Ok(invalidation_id.to_string()));
        stub
    }

    /// Create fails with the given message
    pub fn failing_create(message: &str) -> Self {
        let stub = Self::default();
        *stub.state.create_result.lock().unwrap() = Some(Err(message.to_string()));
        stub
    }

    /// Queue a status string for the next poll
    pub fn then_status(self, status: &str) -> Self {
        self.state
            .statuses
            .lock()
            .unwrap()
            .push_back(Ok(status.to_string()));
        self
    }

    /// Queue `n` "InProgress" polls
    pub fn in_progress(self, n: usize) -> Self {
        (0..n).fold(self, |stub, _| stub.then_status("InProgress"))
    }

    /// Queue a transport failure for the next poll
    pub fn then_error(self, message: &str) -> Self {
        self.state
            .statuses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn creates(&self) -> usize {
        self.state.creates.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> usize {
        self.state.polls.load(Ordering::SeqCst)
    }

    pub fn credentials(&self) -> Vec<CdnCredentials> {
        self.state.credentials.lock().unwrap().clone()
    }

    pub fn caller_references(&self) -> Vec<String> {
        self.state.caller_references.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.state.paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl CdnClient for StubCdn {
    async fn create_invalidation(
        &self,
        _distribution_id: &str,
        caller_reference: &str,
        path: &str,
    ) -> Result<String, CdnError> {
        self.state.creates.fetch_add(1, Ordering::SeqCst);
        self.state
            .caller_references
            .lock()
            .unwrap()
            .push(caller_reference.to_string());
        self.state.paths.lock().unwrap().push(path.to_string());

        match self.state.create_result.lock().unwrap().clone() {
            Some(Ok(id)) => Ok(id),
            Some(Err(message)) => Err(CdnError::Api(message)),
            None => Err(CdnError::Api("no create result scripted".to_string())),
        }
    }

    async fn get_invalidation_status(
        &self,
        _distribution_id: &str,
        _invalidation_id: &str,
    ) -> Result<String, CdnError> {
        self.state.polls.fetch_add(1, Ordering::SeqCst);

        match self.state.statuses.lock().unwrap().pop_front() {
            Some(Ok(status)) => Ok(status),
            Some(Err(message)) => Err(CdnError::Api(message)),
            None => Ok("InProgress".to_string()),
        }
    }
}

#[async_trait]
impl CdnClientFactory for StubCdn {
    async fn client(&self, credentials: &CdnCredentials) -> Arc<dyn CdnClient> {
        self.state
            .credentials
            .lock()
            .unwrap()
            .push(credentials.clone());
        Arc::new(self.clone())
    }
}
