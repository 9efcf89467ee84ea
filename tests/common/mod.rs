//! Shared test utilities.

#![allow(dead_code, unused_imports)]

pub mod fake_api;

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use fraudboard::api::{ApiClient, TransactionSource};
use fraudboard::config::{ApiConfig, Config};
use fraudboard::model::{
    Page, RuleRequest, StatusFilter, Transaction, TransactionDetails, TransactionQuery, TxStatus,
};
use fraudboard::{ApiError, AppContext};
use parking_lot::Mutex;
use tempfile::TempDir;
use tokio::sync::oneshot;

pub use fake_api::{details, CapturedRequest, FakeAdminApi};

pub fn tx(id: &str, status: TxStatus) -> Transaction {
    Transaction {
        id: id.to_string(),
        correlation_id: format!("corr-{}", id),
        amount: 250.0,
        from: "ACC-100".to_string(),
        to: "ACC-200".to_string(),
        kind: "TRANSFER".to_string(),
        timestamp: "2024-05-01T10:00:00".to_string(),
        status,
    }
}

/// `count` transactions named `{prefix}-{n}`, all with `status`.
pub fn txs(prefix: &str, status: TxStatus, count: usize) -> Vec<Transaction> {
    (0..count)
        .map(|n| tx(&format!("{}-{}", prefix, n), status))
        .collect()
}

pub fn rule_request(name: &str) -> RuleRequest {
    RuleRequest {
        name: name.to_string(),
        description: Some(format!("{} rule", name)),
        configuration: r#"{"threshold":10000}"#.to_string(),
        severity: 3,
        ..RuleRequest::default()
    }
}

pub fn config_for(api: &FakeAdminApi) -> Config {
    let mut config = Config::default();
    config.api.base_url = api.base_url();
    config.api.timeout_seconds = Some(5);
    config
}

pub fn client_for(api: &FakeAdminApi) -> ApiClient {
    ApiClient::new(&config_for(api).api).expect("Failed to build API client")
}

/// Config pointing at a listener that accepts connections but never
/// answers. Keep the listener alive for as long as requests should hang.
pub async fn stalled_config() -> (tokio::net::TcpListener, Config) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stalled listener");
    let addr = listener.local_addr().expect("Failed to read listener address");
    let mut config = Config::default();
    config.api.base_url = format!("http://{}/api", addr);
    config.api.timeout_seconds = Some(30);
    (listener, config)
}

pub fn context_for(api: &FakeAdminApi) -> AppContext {
    AppContext::new(config_for(api)).expect("Failed to build application context")
}

/// Write `content` to a config.toml in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn page_of(content: Vec<Transaction>, page: u32, total_pages: u32, total_elements: u64) -> Page<Transaction> {
    Page {
        content,
        page,
        size: 20,
        total_elements,
        total_pages,
        first: page == 0,
        last: page + 1 >= total_pages,
    }
}

type ListReply = Result<Page<Transaction>, ApiError>;

/// Transaction source whose list responses are released by the test.
///
/// Each list request for a status filter waits on the next gate opened
/// for that filter; with no gate it answers an empty page immediately.
#[derive(Default)]
pub struct GatedSource {
    queries: Mutex<Vec<TransactionQuery>>,
    gates: Mutex<HashMap<StatusFilter, VecDeque<oneshot::Receiver<ListReply>>>>,
}

impl GatedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Open a gate for the next list request with `filter`.
    pub fn gate(&self, filter: StatusFilter) -> oneshot::Sender<ListReply> {
        let (sender, receiver) = oneshot::channel();
        self.gates.lock().entry(filter).or_default().push_back(receiver);
        sender
    }

    pub fn queries(&self) -> Vec<TransactionQuery> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl TransactionSource for GatedSource {
    async fn list_transactions(&self, query: &TransactionQuery) -> Result<Page<Transaction>, ApiError> {
        self.queries.lock().push(query.clone());
        let gate = self
            .gates
            .lock()
            .get_mut(&query.status)
            .and_then(|gates| gates.pop_front());
        match gate {
            Some(receiver) => receiver.await.unwrap_or_else(|_| {
                Err(ApiError::Network {
                    message: "gate closed".to_string(),
                })
            }),
            None => Ok(Page::empty(query.size)),
        }
    }

    async fn transaction(&self, id: &str) -> Result<TransactionDetails, ApiError> {
        Err(not_found(id))
    }

    async fn review_transaction(&self, id: &str) -> Result<Transaction, ApiError> {
        Err(not_found(id))
    }
}

fn not_found(id: &str) -> ApiError {
    ApiError::Http {
        status: 404,
        message: format!("Transaction not found: {}", id),
        body: String::new(),
    }
}

/// Poll until `check` holds or `timeout_ms` elapses.
pub async fn eventually(timeout_ms: u64, mut check: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_millis(timeout_ms);
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    check()
}
