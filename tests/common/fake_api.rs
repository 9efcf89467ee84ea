//! In-memory admin API for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, Response, StatusCode};
use axum::routing::any;
use axum::Router;
use fraudboard::model::{
    DashboardStats, Page, Rule, RuleChangeHistory, RuleRequest, RuleType, Transaction,
    TransactionDetails, TxStatus,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A captured request for assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl CapturedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct Data {
    transactions: Vec<TransactionDetails>,
    rules: Vec<Rule>,
    history: Vec<RuleChangeHistory>,
    next_rule_id: i64,
    next_history_id: i64,
    requests: Vec<CapturedRequest>,
    /// Status codes to fail the next requests with, in order.
    failures: VecDeque<u16>,
    /// Extra latency for transaction-list requests, keyed by status param
    /// ("" for unfiltered).
    list_delays: HashMap<String, u64>,
}

#[derive(Clone)]
struct FakeState {
    data: Arc<Mutex<Data>>,
}

/// Fake admin API listening on an ephemeral port.
pub struct FakeAdminApi {
    pub addr: SocketAddr,
    state: FakeState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl FakeAdminApi {
    pub async fn start() -> Self {
        let state = FakeState {
            data: Arc::new(Mutex::new(Data {
                next_rule_id: 1,
                next_history_id: 1,
                ..Data::default()
            })),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/{*path}", any(handle_request))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake admin API");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    /// Base URL including the `/api` prefix.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub async fn add_transaction(&self, tx: Transaction) {
        self.add_details(details(tx)).await;
    }

    pub async fn add_details(&self, details: TransactionDetails) {
        self.state.data.lock().await.transactions.push(details);
    }

    pub async fn add_transactions(&self, txs: impl IntoIterator<Item = Transaction>) {
        let mut data = self.state.data.lock().await;
        data.transactions.extend(txs.into_iter().map(details));
    }

    /// Change a transaction's status behind the client's back.
    pub async fn set_status(&self, id: &str, status: TxStatus) {
        let mut data = self.state.data.lock().await;
        if let Some(tx) = data.transactions.iter_mut().find(|t| t.transaction.id == id) {
            tx.transaction.status = status;
        }
    }

    pub async fn status_of(&self, id: &str) -> Option<TxStatus> {
        let data = self.state.data.lock().await;
        data.transactions
            .iter()
            .find(|t| t.transaction.id == id)
            .map(|t| t.transaction.status)
    }

    pub async fn add_rule(&self, request: RuleRequest) -> Rule {
        let mut data = self.state.data.lock().await;
        create_rule(&mut data, request)
    }

    pub async fn rules(&self) -> Vec<Rule> {
        self.state.data.lock().await.rules.clone()
    }

    /// Fail the next request with `status`.
    pub async fn fail_next(&self, status: u16) {
        self.state.data.lock().await.failures.push_back(status);
    }

    /// Delay list responses for one status filter (`None` = unfiltered).
    pub async fn delay_list(&self, status: Option<TxStatus>, ms: u64) {
        let key = status.map(|s| s.as_str().to_string()).unwrap_or_default();
        self.state.data.lock().await.list_delays.insert(key, ms);
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.state.data.lock().await.requests.clone()
    }

    /// Captured requests whose path ends with `suffix`.
    pub async fn requests_to(&self, method: &str, suffix: &str) -> Vec<CapturedRequest> {
        self.captured_requests()
            .await
            .into_iter()
            .filter(|r| r.method == method && r.path.ends_with(suffix))
            .collect()
    }

    pub async fn clear_requests(&self) {
        self.state.data.lock().await.requests.clear();
    }
}

impl Drop for FakeAdminApi {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

pub fn details(tx: Transaction) -> TransactionDetails {
    TransactionDetails {
        transaction: tx,
        ml_score: None,
        alert_reasons: Vec::new(),
        processing_history: Vec::new(),
        created_at: None,
        updated_at: None,
        ip_address: None,
        device_id: None,
        location: None,
        merchant_category: None,
        device_used: None,
        fraud_type: None,
        time_since_last_transaction: None,
        spending_deviation_score: None,
        velocity_score: None,
        geo_anomaly_score: None,
        payment_channel: None,
        device_hash: None,
        ai_analysis: None,
    }
}

fn create_rule(data: &mut Data, request: RuleRequest) -> Rule {
    let id = data.next_rule_id;
    data.next_rule_id += 1;
    let rule = Rule {
        id,
        name: request.name,
        description: request.description,
        rule_type: request.rule_type,
        configuration: request.configuration,
        enabled: request.enabled,
        priority: request.priority,
        severity: request.severity,
        created_by: Some("admin".to_string()),
        modified_by: None,
        created_at: Some("2024-05-01T10:00:00".to_string()),
        updated_at: None,
        execution_count: 0,
        alert_count: 0,
    };
    data.rules.push(rule.clone());
    record_history(data, id, "CREATE", None, Some(&rule));
    rule
}

fn record_history(data: &mut Data, rule_id: i64, action: &str, old: Option<&Rule>, new: Option<&Rule>) {
    let id = data.next_history_id;
    data.next_history_id += 1;
    data.history.push(RuleChangeHistory {
        id,
        rule_id,
        action: action.to_string(),
        changed_by: Some("admin".to_string()),
        changed_at: format!("2024-05-01T10:{:02}:00", id % 60),
        old_value: old.and_then(|r| serde_json::to_string(r).ok()),
        new_value: new.and_then(|r| serde_json::to_string(r).ok()),
    });
}

fn paginate<T: Clone>(items: &[T], page: u32, size: u32) -> Page<T> {
    let size = size.max(1);
    let total_elements = items.len() as u64;
    let total_pages = items.len().div_ceil(size as usize) as u32;
    let start = (page as usize * size as usize).min(items.len());
    let end = (start + size as usize).min(items.len());
    Page {
        content: items[start..end].to_vec(),
        page,
        size,
        total_elements,
        total_pages,
        first: page == 0,
        last: page + 1 >= total_pages,
    }
}

fn json<T: Serialize>(status: StatusCode, value: &T) -> Response<Body> {
    let body = serde_json::to_vec(value).unwrap();
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn error(status: StatusCode, message: &str) -> Response<Body> {
    json(
        status,
        &serde_json::json!({
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or(""),
            "message": message,
        }),
    )
}

fn no_content() -> Response<Body> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .body(Body::empty())
        .unwrap()
}

async fn handle_request(State(state): State<FakeState>, req: Request<Body>) -> Response<Body> {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query: Vec<(String, String)> = req
        .uri()
        .query()
        .map(|q| {
            reqwest::Url::parse(&format!("http://fake/?{}", q))
                .map(|url| url.query_pairs().into_owned().collect())
                .unwrap_or_default()
        })
        .unwrap_or_default();
    let headers: Vec<(String, String)> = req
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();
    let body = axum::body::to_bytes(req.into_body(), 1024 * 1024)
        .await
        .unwrap_or_default();

    let delay = {
        let mut data = state.data.lock().await;
        data.requests.push(CapturedRequest {
            method: method.clone(),
            path: path.clone(),
            query: query.clone(),
            headers,
        });
        if let Some(status) = data.failures.pop_front() {
            let status = StatusCode::from_u16(status).unwrap();
            return error(status, "Injected failure");
        }
        if method == "GET" && path.ends_with("/admin/transactions") {
            let key = query
                .iter()
                .find(|(k, _)| k == "status")
                .map(|(_, v)| v.clone())
                .unwrap_or_default();
            data.list_delays.get(&key).copied().unwrap_or(0)
        } else {
            0
        }
    };
    if delay > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
    }

    let param = |name: &str| {
        query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    };
    let number = |name: &str, default: u32| param(name).and_then(|v| v.parse().ok()).unwrap_or(default);

    let Some(route) = path.strip_prefix("/api/admin/") else {
        return error(StatusCode::NOT_FOUND, "No such endpoint");
    };
    let segments: Vec<&str> = route.split('/').collect();
    let mut data = state.data.lock().await;

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["dashboard", "stats"]) => {
            let count = |status: TxStatus| {
                data.transactions
                    .iter()
                    .filter(|t| t.transaction.status == status)
                    .count() as u64
            };
            let stats = DashboardStats {
                total_processed: count(TxStatus::Processed),
                total_alerted: count(TxStatus::Alerted),
                total_reviewed: count(TxStatus::Reviewed),
                total_processing: count(TxStatus::Processing),
                active_rules_count: data.rules.iter().filter(|r| r.enabled).count() as u64,
            };
            json(StatusCode::OK, &stats)
        }
        ("GET", ["dashboard", "recent-transactions"]) => {
            let limit = number("limit", 10) as usize;
            let recent: Vec<Transaction> = data
                .transactions
                .iter()
                .rev()
                .take(limit)
                .map(|t| t.transaction.clone())
                .collect();
            json(StatusCode::OK, &recent)
        }
        ("GET", ["transactions"]) => {
            let status = param("status").and_then(|s| s.parse::<TxStatus>().ok());
            let matching: Vec<Transaction> = data
                .transactions
                .iter()
                .map(|t| t.transaction.clone())
                .filter(|t| status.map_or(true, |s| t.status == s))
                .collect();
            json(StatusCode::OK, &paginate(&matching, number("page", 0), number("size", 20)))
        }
        ("GET", ["transactions", "search"]) => {
            let matching: Vec<Transaction> = data
                .transactions
                .iter()
                .map(|t| t.transaction.clone())
                .filter(|t| param("correlationId").map_or(true, |c| t.correlation_id == c))
                .filter(|t| param("from").map_or(true, |f| t.from == f))
                .filter(|t| param("to").map_or(true, |to| t.to == to))
                .collect();
            json(StatusCode::OK, &paginate(&matching, number("page", 0), number("size", 20)))
        }
        ("GET", ["transactions", id]) => {
            match data.transactions.iter().find(|t| t.transaction.id == *id) {
                Some(details) => json(StatusCode::OK, details),
                None => error(StatusCode::NOT_FOUND, &format!("Transaction not found: {}", id)),
            }
        }
        ("POST", ["transactions", id, "review"]) => {
            match data.transactions.iter_mut().find(|t| t.transaction.id == *id) {
                Some(details) if details.transaction.status == TxStatus::Alerted => {
                    details.transaction.status = TxStatus::Reviewed;
                    json(StatusCode::OK, &details.transaction)
                }
                Some(details) => error(
                    StatusCode::BAD_REQUEST,
                    &format!(
                        "Only ALERTED transactions can be reviewed, current status: {}",
                        details.transaction.status
                    ),
                ),
                None => error(StatusCode::NOT_FOUND, &format!("Transaction not found: {}", id)),
            }
        }
        ("GET", ["statuses"]) => {
            let statuses: Vec<&str> = TxStatus::ALL.iter().map(|s| s.as_str()).collect();
            json(StatusCode::OK, &statuses)
        }
        ("GET", ["rules"]) => {
            let enabled = param("enabled").and_then(|v| v.parse::<bool>().ok());
            let rules: Vec<Rule> = data
                .rules
                .iter()
                .filter(|r| enabled.map_or(true, |e| r.enabled == e))
                .cloned()
                .collect();
            json(StatusCode::OK, &rules)
        }
        ("POST", ["rules"]) => match serde_json::from_slice::<RuleRequest>(&body) {
            Ok(request) => {
                let rule = create_rule(&mut data, request);
                json(StatusCode::CREATED, &rule)
            }
            Err(e) => error(StatusCode::BAD_REQUEST, &e.to_string()),
        },
        ("GET", ["rules", "types"]) => {
            let types: Vec<&str> = RuleType::ALL.iter().map(|t| t.as_str()).collect();
            json(StatusCode::OK, &types)
        }
        ("GET", ["rules", id, "history"]) => {
            let Ok(id) = id.parse::<i64>() else {
                return error(StatusCode::BAD_REQUEST, "Invalid rule id");
            };
            let entries: Vec<RuleChangeHistory> = data
                .history
                .iter()
                .filter(|h| h.rule_id == id)
                .cloned()
                .collect();
            json(StatusCode::OK, &entries)
        }
        (method, ["rules", id, rest @ ..]) => {
            let Ok(id) = id.parse::<i64>() else {
                return error(StatusCode::BAD_REQUEST, "Invalid rule id");
            };
            let Some(index) = data.rules.iter().position(|r| r.id == id) else {
                return error(StatusCode::NOT_FOUND, &format!("Rule not found: {}", id));
            };
            match (method, rest) {
                ("GET", []) => json(StatusCode::OK, &data.rules[index]),
                ("PUT", []) => match serde_json::from_slice::<RuleRequest>(&body) {
                    Ok(request) => {
                        let old = data.rules[index].clone();
                        let rule = &mut data.rules[index];
                        rule.name = request.name;
                        rule.description = request.description;
                        rule.rule_type = request.rule_type;
                        rule.configuration = request.configuration;
                        rule.enabled = request.enabled;
                        rule.priority = request.priority;
                        rule.severity = request.severity;
                        rule.modified_by = Some("admin".to_string());
                        let rule = rule.clone();
                        record_history(&mut data, id, "UPDATE", Some(&old), Some(&rule));
                        json(StatusCode::OK, &rule)
                    }
                    Err(e) => error(StatusCode::BAD_REQUEST, &e.to_string()),
                },
                ("PATCH", ["toggle"]) => {
                    let old = data.rules[index].clone();
                    data.rules[index].enabled = !old.enabled;
                    let rule = data.rules[index].clone();
                    record_history(&mut data, id, "TOGGLE", Some(&old), Some(&rule));
                    json(StatusCode::OK, &rule)
                }
                ("DELETE", []) => {
                    let old = data.rules.remove(index);
                    record_history(&mut data, id, "DELETE", Some(&old), None);
                    no_content()
                }
                _ => error(StatusCode::METHOD_NOT_ALLOWED, "Unsupported rule operation"),
            }
        }
        _ => error(StatusCode::NOT_FOUND, "No such endpoint"),
    }
}
