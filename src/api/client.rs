//! Typed HTTP client for the admin API.
//!
//! One method per endpoint. Every call carries the session cookie jar, an
//! optional auth header and an `x-request-id` for log correlation.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{build_auth_header, ApiConfig, AuthHeader};
use crate::error::ApiError;
use crate::model::{
    DashboardStats, Page, Rule, RuleChangeHistory, RuleId, RuleRequest, SearchQuery,
    Transaction, TransactionDetails, TransactionQuery,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    auth: Option<AuthHeader>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ApiError::InvalidUrl {
            message: format!("{}: {}", config.base_url, e),
        })?;

        let mut builder = Client::builder().cookie_store(true);
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_seconds {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(ApiError::network)?;

        Ok(Self {
            http,
            base_url,
            auth: build_auth_header(config),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // -- Dashboard ------------------------------------------------------------

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get(&["admin", "dashboard", "stats"], &[]).await
    }

    pub async fn recent_transactions(&self, limit: u32) -> Result<Vec<Transaction>, ApiError> {
        self.get(
            &["admin", "dashboard", "recent-transactions"],
            &[("limit", limit.to_string())],
        )
        .await
    }

    // -- Transactions ---------------------------------------------------------

    pub async fn list_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Page<Transaction>, ApiError> {
        self.get(&["admin", "transactions"], &query.to_params()).await
    }

    pub async fn transaction(&self, id: &str) -> Result<TransactionDetails, ApiError> {
        self.get(&["admin", "transactions", id], &[]).await
    }

    /// `ALERTED -> REVIEWED` transition.
    pub async fn review_transaction(&self, id: &str) -> Result<Transaction, ApiError> {
        let url = self.endpoint(&["admin", "transactions", id, "review"], &[])?;
        self.send(self.request(Method::POST, url)).await
    }

    pub async fn search_transactions(
        &self,
        query: &SearchQuery,
    ) -> Result<Page<Transaction>, ApiError> {
        self.get(&["admin", "transactions", "search"], &query.to_params())
            .await
    }

    pub async fn statuses(&self) -> Result<Vec<String>, ApiError> {
        self.get(&["admin", "statuses"], &[]).await
    }

    // -- Rules ----------------------------------------------------------------

    pub async fn list_rules(&self, enabled: Option<bool>) -> Result<Vec<Rule>, ApiError> {
        let params: Vec<(&str, String)> = enabled
            .map(|e| vec![("enabled", e.to_string())])
            .unwrap_or_default();
        self.get(&["admin", "rules"], &params).await
    }

    pub async fn rule(&self, id: RuleId) -> Result<Rule, ApiError> {
        self.get(&["admin", "rules", &id.to_string()], &[]).await
    }

    pub async fn create_rule(&self, request: &RuleRequest) -> Result<Rule, ApiError> {
        self.send_json(Method::POST, &["admin", "rules"], request)
            .await
    }

    pub async fn update_rule(&self, id: RuleId, request: &RuleRequest) -> Result<Rule, ApiError> {
        self.send_json(Method::PUT, &["admin", "rules", &id.to_string()], request)
            .await
    }

    pub async fn toggle_rule(&self, id: RuleId) -> Result<Rule, ApiError> {
        let url = self.endpoint(&["admin", "rules", &id.to_string(), "toggle"], &[])?;
        self.send(self.request(Method::PATCH, url)).await
    }

    pub async fn delete_rule(&self, id: RuleId) -> Result<(), ApiError> {
        let url = self.endpoint(&["admin", "rules", &id.to_string()], &[])?;
        self.send_empty(self.request(Method::DELETE, url)).await
    }

    pub async fn rule_history(&self, id: RuleId) -> Result<Vec<RuleChangeHistory>, ApiError> {
        self.get(&["admin", "rules", &id.to_string(), "history"], &[])
            .await
    }

    pub async fn rule_types(&self) -> Result<Vec<String>, ApiError> {
        self.get(&["admin", "rules", "types"], &[]).await
    }

    // -- Plumbing -------------------------------------------------------------

    /// Join percent-encoded path segments onto the base URL and append the
    /// query pairs.
    fn endpoint(&self, segments: &[&str], params: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                message: format!("{} cannot be a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);

        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(%method, %url, %request_id, "API request");

        let mut builder = self
            .http
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id);
        if let Some((name, value)) = &self.auth {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments, params)?;
        self.send(self.request(Method::GET, url)).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments, &[])?;
        self.send(self.request(method, url).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let bytes = self.execute(builder).await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.execute(builder).await.map(|_| ())
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, "API request failed to complete");
            ApiError::network(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::network)?;

        if !status.is_success() {
            let err = ApiError::http(status.as_u16(), String::from_utf8_lossy(&bytes).into_owned());
            tracing::warn!(status = status.as_u16(), error = %err, "API request rejected");
            return Err(err);
        }

        Ok(bytes.to_vec())
    }
}
