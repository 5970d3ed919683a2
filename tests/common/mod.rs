#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;

use fsreg::api::gate::{Permit, RequestGate};
use fsreg::api::{RawResponse, RegisterClient, Transport, BASE_URL};
use fsreg::error::{FsrError, RequestErrorKind, Result};

/// Read a file from `tests/fixtures`
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("missing fixture {}: {}", path.display(), e))
}

/// Replays recorded register responses keyed by request path and query
#[derive(Default)]
pub struct FixtureTransport {
    routes: HashMap<String, RawResponse>,
    failing: bool,
    requests: Mutex<Vec<String>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request fails as if the connection was refused
    pub fn unreachable() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Answer `path` (below the API root) and `params` with a fixture file
    pub fn route(self, path: &str, params: &[(&str, &str)], fixture_name: &str) -> Self {
        self.route_raw(path, params, RawResponse::new(200, fixture(fixture_name)))
    }

    pub fn route_raw(mut self, path: &str, params: &[(&str, &str)], response: RawResponse) -> Self {
        self.routes.insert(route_key(path, params), response);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn route_key(path: &str, params: &[(&str, &str)]) -> String {
    let mut pairs: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    pairs.sort();
    format!("{}?{}", path.trim_start_matches('/'), pairs.join("&"))
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn get(&self, url: &Url, params: &[(&str, &str)]) -> Result<RawResponse> {
        let root = Url::parse(BASE_URL).unwrap();
        let path = url
            .path()
            .strip_prefix(root.path())
            .unwrap_or(url.path())
            .to_string();
        let key = route_key(&path, params);
        self.requests.lock().unwrap().push(key.clone());

        if self.failing {
            return Err(FsrError::request(
                RequestErrorKind::Transport,
                "connection refused",
            ));
        }

        self.routes.get(&key).cloned().ok_or_else(|| {
            FsrError::request(RequestErrorKind::Transport, format!("no fixture for {}", key))
        })
    }
}

/// Gate that counts permits handed out and given back
#[derive(Default)]
pub struct CountingGate {
    acquired: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

struct ReleaseOnDrop(Arc<AtomicUsize>);

impl Drop for ReleaseOnDrop {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl CountingGate {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.acquired() - self.released()
    }
}

#[async_trait]
impl RequestGate for CountingGate {
    async fn acquire(&self) -> Result<Permit> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Permit::guarded(ReleaseOnDrop(self.released.clone())))
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

pub fn client_with(transport: Arc<FixtureTransport>, gate: Arc<CountingGate>) -> RegisterClient {
    RegisterClient::with_transport(transport, gate, BASE_URL).unwrap()
}
