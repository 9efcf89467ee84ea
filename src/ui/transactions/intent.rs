use crate::model::{Page, StatusFilter, Transaction, TransactionDetails};
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum TransactionsIntent {
    SetStatusFilter(StatusFilter),
    SetPage(u32),
    SetPageSize(u32),

    /// Issues the next list sequence number.
    ListRequested,
    ListLoaded { seq: u64, page: Page<Transaction> },
    ListFailed { seq: u64, message: String },
    /// The request future was dropped before it settled.
    ListAbandoned { seq: u64 },

    DetailRequested,
    DetailLoaded { seq: u64, details: TransactionDetails },
    DetailFailed { seq: u64, message: String },
    DetailAbandoned { seq: u64 },

    ReviewFailed { message: String },
    ClearSelection,
}

impl Intent for TransactionsIntent {}
