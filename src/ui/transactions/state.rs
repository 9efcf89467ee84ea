use crate::model::{StatusFilter, Transaction, TransactionDetails, TransactionQuery};
use crate::ui::mvi::UiState;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Paginated transaction list that fetches for itself.
///
/// `total_pages` and `total_elements` are exactly what the last accepted
/// response reported. When that response has fewer pages than
/// `current_page`, the page is clamped and `transactions` is left empty
/// until the clamped page is fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionsState {
    pub transactions: Vec<Transaction>,
    pub selected_transaction: Option<TransactionDetails>,
    /// Zero-based.
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub status_filter: StatusFilter,
    /// Requests issued and not yet settled, superseded ones included.
    pub pending: u32,
    /// Sequence number of the newest list request; only its result is applied.
    pub list_seq: u64,
    pub detail_seq: u64,
}

impl Default for TransactionsState {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            selected_transaction: None,
            current_page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_pages: 0,
            total_elements: 0,
            loading: false,
            error: None,
            status_filter: StatusFilter::Any,
            pending: 0,
            list_seq: 0,
            detail_seq: 0,
        }
    }
}

impl TransactionsState {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Request parameters for the current filter and page.
    pub fn query(&self) -> TransactionQuery {
        TransactionQuery::new(self.status_filter, self.current_page, self.page_size)
    }

    /// The inputs a list fetch depends on.
    pub fn list_params(&self) -> (StatusFilter, u32, u32) {
        (self.status_filter, self.current_page, self.page_size)
    }

    pub fn last_page(&self) -> u32 {
        self.total_pages.saturating_sub(1)
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }
}

impl UiState for TransactionsState {}
