use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Rule identifier as assigned by the backend.
pub type RuleId = i64;

/// Kind of rule evaluated server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    #[default]
    Threshold,
    Velocity,
    Pattern,
    MlBased,
    GeoAnomaly,
}

impl RuleType {
    pub const ALL: [RuleType; 5] = [
        RuleType::Threshold,
        RuleType::Velocity,
        RuleType::Pattern,
        RuleType::MlBased,
        RuleType::GeoAnomaly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Threshold => "THRESHOLD",
            Self::Velocity => "VELOCITY",
            Self::Pattern => "PATTERN",
            Self::MlBased => "ML_BASED",
            Self::GeoAnomaly => "GEO_ANOMALY",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown rule type '{}'", s))
    }
}

/// Fraud-detection rule. The server is the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    /// Opaque JSON document interpreted by the backend evaluator.
    pub configuration: String,
    pub enabled: bool,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_severity")]
    pub severity: u8,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub modified_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub execution_count: u64,
    #[serde(default)]
    pub alert_count: u64,
}

impl Rule {
    pub fn severity_level(&self) -> SeverityLevel {
        SeverityLevel::from_severity(self.severity)
    }
}

fn default_severity() -> u8 {
    1
}

/// Display bucket for a rule's severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
}

impl SeverityLevel {
    pub fn from_severity(severity: u8) -> Self {
        match severity {
            0 | 1 => SeverityLevel::Low,
            2 => SeverityLevel::Medium,
            _ => SeverityLevel::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Create/update payload for a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub configuration: String,
    pub enabled: bool,
    pub priority: i32,
    pub severity: u8,
}

impl Default for RuleRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            rule_type: RuleType::Threshold,
            configuration: "{}".to_string(),
            enabled: true,
            priority: 0,
            severity: 1,
        }
    }
}

impl RuleRequest {
    /// Pre-fill an edit form from an existing rule.
    pub fn from_rule(rule: &Rule) -> Self {
        Self {
            name: rule.name.clone(),
            description: rule.description.clone(),
            rule_type: rule.rule_type,
            configuration: rule.configuration.clone(),
            enabled: rule.enabled,
            priority: rule.priority,
            severity: rule.severity,
        }
    }

    /// Check the payload before it is submitted.
    ///
    /// The configuration must be well-formed JSON; its contents are not
    /// interpreted here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.configuration.trim().is_empty() {
            return Err(ValidationError::MissingConfiguration);
        }
        serde_json::from_str::<serde_json::Value>(&self.configuration)
            .map_err(|e| ValidationError::InvalidConfiguration(e.to_string()))?;
        if !(1..=5).contains(&self.severity) {
            return Err(ValidationError::SeverityOutOfRange(self.severity));
        }
        Ok(())
    }
}

/// Audit record of a change to a rule. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleChangeHistory {
    pub id: i64,
    pub rule_id: RuleId,
    pub action: String,
    #[serde(default)]
    pub changed_by: Option<String>,
    pub changed_at: String,
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
}
