use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Connection settings for the admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the API prefix (e.g., "http://localhost:8080/api").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds. Unset means the transport default.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    /// Connection timeout in seconds. Unset means the transport default.
    #[serde(default)]
    pub connect_timeout_seconds: Option<u64>,
    /// Authentication type: "none", "api_key", "bearer".
    #[serde(rename = "auth_type", default = "default_auth_type")]
    pub auth_type_str: String,
    /// Key sent with every request when `auth_type` is not "none".
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Remote-cache behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long fetched data counts as fresh. 0 means stale immediately.
    #[serde(default)]
    pub stale_time_ms: u64,
}

/// Display defaults for list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Transactions per page (default: 20).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Number of recent transactions on the dashboard (default: 10).
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,
}

pub(crate) fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_auth_type() -> String {
    "none".to_string()
}

fn default_page_size() -> u32 {
    20
}

fn default_recent_limit() -> u32 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
            connect_timeout_seconds: None,
            auth_type_str: default_auth_type(),
            api_key: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { stale_time_ms: 0 }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            recent_limit: default_recent_limit(),
        }
    }
}
