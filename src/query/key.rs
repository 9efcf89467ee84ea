use std::collections::BTreeMap;
use std::fmt;

/// Identity of a cached server response: resource name plus parameters.
///
/// Parameters are kept ordered so the same set always yields the same key,
/// regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    resource: String,
    params: BTreeMap<String, String>,
}

impl QueryKey {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// Add the parameter only when a value is present.
    pub fn with_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self,
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Prefix match: same resource and every parameter of `filter` present
    /// here with the same value. A bare resource key matches all of its
    /// parameterisations.
    pub fn matches(&self, filter: &QueryKey) -> bool {
        self.resource == filter.resource
            && filter
                .params
                .iter()
                .all(|(name, value)| self.params.get(name) == Some(value))
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource)?;
        let mut sep = '?';
        for (name, value) in &self.params {
            write!(f, "{}{}={}", sep, name, value)?;
            sep = '&';
        }
        Ok(())
    }
}

/// Query identities used by the views.
pub mod keys {
    use super::QueryKey;
    use crate::model::{RuleId, SearchQuery};

    pub const DASHBOARD_STATS: &str = "dashboard-stats";
    pub const RECENT_TRANSACTIONS: &str = "recent-transactions";
    pub const RULES: &str = "rules";
    pub const RULE_TYPES: &str = "rule-types";
    pub const RULE_HISTORY: &str = "rule-history";
    pub const TRANSACTION: &str = "transaction";
    pub const TRANSACTIONS: &str = "transactions";
    pub const STATUSES: &str = "statuses";
    pub const SEARCH: &str = "transaction-search";

    pub fn dashboard_stats() -> QueryKey {
        QueryKey::new(DASHBOARD_STATS)
    }

    pub fn recent_transactions(limit: u32) -> QueryKey {
        QueryKey::new(RECENT_TRANSACTIONS).with("limit", limit)
    }

    /// All rule-list identities when `enabled` is `None` used as a filter.
    pub fn rules(enabled: Option<bool>) -> QueryKey {
        QueryKey::new(RULES).with_opt("enabled", enabled)
    }

    /// A single rule; invalidated together with the rule lists.
    pub fn rule(id: RuleId) -> QueryKey {
        QueryKey::new(RULES).with("id", id)
    }

    pub fn rule_types() -> QueryKey {
        QueryKey::new(RULE_TYPES)
    }

    pub fn rule_history(id: RuleId) -> QueryKey {
        QueryKey::new(RULE_HISTORY).with("id", id)
    }

    pub fn transaction(id: &str) -> QueryKey {
        QueryKey::new(TRANSACTION).with("id", id)
    }

    /// Every cached transaction-list page, whatever its filter.
    pub fn transactions() -> QueryKey {
        QueryKey::new(TRANSACTIONS)
    }

    pub fn statuses() -> QueryKey {
        QueryKey::new(STATUSES)
    }

    pub fn search(query: &SearchQuery) -> QueryKey {
        query
            .to_params()
            .into_iter()
            .fold(QueryKey::new(SEARCH), |key, (name, value)| key.with(name, value))
    }
}
