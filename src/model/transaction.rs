use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Processing status of a transaction.
///
/// The only client-initiated transition is `Alerted -> Reviewed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxStatus {
    Processing,
    Processed,
    Alerted,
    Reviewed,
}

impl TxStatus {
    /// Every status, in display order.
    pub const ALL: [TxStatus; 4] = [
        TxStatus::Processing,
        TxStatus::Processed,
        TxStatus::Alerted,
        TxStatus::Reviewed,
    ];

    /// Wire name, also used as the `status` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "PROCESSING",
            Self::Processed => "PROCESSED",
            Self::Alerted => "ALERTED",
            Self::Reviewed => "REVIEWED",
        }
    }

    pub fn can_review(&self) -> bool {
        matches!(self, Self::Alerted)
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown transaction status '{}'", s))
    }
}

/// Status filter for the transaction list.
///
/// `Any` is the "no filter" sentinel; the `status` parameter is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    Any,
    Only(TxStatus),
}

impl StatusFilter {
    /// Filter choices in display order: `Any` first, then every status.
    pub fn options() -> Vec<StatusFilter> {
        std::iter::once(StatusFilter::Any)
            .chain(TxStatus::ALL.into_iter().map(StatusFilter::Only))
            .collect()
    }

    pub fn status(&self) -> Option<TxStatus> {
        match self {
            Self::Any => None,
            Self::Only(status) => Some(*status),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Any => "All",
            Self::Only(status) => status.as_str(),
        }
    }

    pub fn accepts(&self, status: TxStatus) -> bool {
        self.status().map_or(true, |s| s == status)
    }
}

impl From<Option<TxStatus>> for StatusFilter {
    fn from(status: Option<TxStatus>) -> Self {
        status.map_or(StatusFilter::Any, StatusFilter::Only)
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case("any") {
            return Ok(StatusFilter::Any);
        }
        s.parse().map(StatusFilter::Only)
    }
}

/// Transaction as listed by the admin API.
///
/// Timestamps are kept as the server's ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub correlation_id: String,
    pub amount: f64,
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: String,
    pub status: TxStatus,
}

/// Transaction detail view with scoring and context fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    #[serde(flatten)]
    pub transaction: Transaction,
    #[serde(default)]
    pub ml_score: Option<f64>,
    #[serde(default)]
    pub alert_reasons: Vec<String>,
    #[serde(default)]
    pub processing_history: Vec<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub merchant_category: Option<String>,
    #[serde(default)]
    pub device_used: Option<String>,
    #[serde(default)]
    pub fraud_type: Option<String>,
    #[serde(default)]
    pub time_since_last_transaction: Option<f64>,
    #[serde(default)]
    pub spending_deviation_score: Option<f64>,
    #[serde(default)]
    pub velocity_score: Option<f64>,
    #[serde(default)]
    pub geo_anomaly_score: Option<f64>,
    #[serde(default)]
    pub payment_channel: Option<String>,
    #[serde(default)]
    pub device_hash: Option<String>,
    #[serde(default)]
    pub ai_analysis: Option<String>,
}

impl TransactionDetails {
    pub fn status(&self) -> TxStatus {
        self.transaction.status
    }
}
