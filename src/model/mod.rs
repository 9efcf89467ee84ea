//! Wire data model of the admin API.

mod dashboard;
mod page;
mod rule;
mod transaction;

pub use dashboard::DashboardStats;
pub use page::{Page, SearchQuery, SortDirection, TransactionQuery};
pub use rule::{Rule, RuleChangeHistory, RuleId, RuleRequest, RuleType, SeverityLevel};
pub use transaction::{StatusFilter, Transaction, TransactionDetails, TxStatus};
