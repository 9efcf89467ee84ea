//! The self-fetching transaction store.
//!
//! Every fetch is tagged with a sequence number when it is issued; a
//! response is applied only if no newer request of the same kind has been
//! issued since. Superseded responses still settle their request, so
//! `loading` clears once nothing is outstanding.

use std::future::Future;
use std::sync::Arc;

use crate::api::TransactionSource;
use crate::model::{StatusFilter, Transaction};
use crate::ui::mvi::Store;
use crate::ui::transactions::intent::TransactionsIntent;
use crate::ui::transactions::reducer::TransactionsReducer;
use crate::ui::transactions::state::TransactionsState;

#[derive(Clone)]
pub struct TransactionStore {
    store: Store<TransactionsReducer>,
    source: Arc<dyn TransactionSource>,
}

impl TransactionStore {
    pub fn new(source: Arc<dyn TransactionSource>, page_size: u32) -> Self {
        Self {
            store: Store::new(TransactionsState::with_page_size(page_size)),
            source,
        }
    }

    pub fn store(&self) -> &Store<TransactionsReducer> {
        &self.store
    }

    pub fn state(&self) -> TransactionsState {
        self.store.snapshot()
    }

    pub fn set_status_filter(&self, filter: StatusFilter) {
        self.store.dispatch(TransactionsIntent::SetStatusFilter(filter));
    }

    pub fn set_page(&self, page: u32) {
        self.store.dispatch(TransactionsIntent::SetPage(page));
    }

    pub fn set_page_size(&self, size: u32) {
        self.store.dispatch(TransactionsIntent::SetPageSize(size));
    }

    pub fn clear_selection(&self) {
        self.store.dispatch(TransactionsIntent::ClearSelection);
    }

    /// Fetch the current page with the current filter.
    ///
    /// Parameters and sequence number are taken when this is called, not
    /// when the returned future is first polled. Dropping the future
    /// settles the request without applying anything.
    pub fn fetch_transactions(&self) -> impl Future<Output = ()> + Send + 'static {
        let (seq, query) = self
            .store
            .dispatch_and_select(TransactionsIntent::ListRequested, |state| {
                (state.list_seq, state.query())
            });
        let source = self.source.clone();
        let guard = scopeguard::guard(self.store.clone(), move |store| {
            tracing::debug!(seq, "transaction list request dropped");
            store.dispatch(TransactionsIntent::ListAbandoned { seq });
        });

        async move {
            tracing::debug!(seq, status = query.status.label(), page = query.page, "fetching transactions");
            let result = source.list_transactions(&query).await;
            let store = scopeguard::ScopeGuard::into_inner(guard);
            let intent = match result {
                Ok(page) => TransactionsIntent::ListLoaded { seq, page },
                Err(err) => {
                    tracing::warn!(seq, error = %err, "failed to fetch transactions");
                    TransactionsIntent::ListFailed {
                        seq,
                        message: err.to_string(),
                    }
                }
            };
            let applied = store.dispatch_and_select(intent, |state| state.list_seq == seq);
            if !applied {
                tracing::debug!(seq, "discarded superseded transaction list");
            }
        }
    }

    /// Load one transaction into `selected_transaction`.
    pub fn fetch_transaction_by_id(&self, id: &str) -> impl Future<Output = ()> + Send + 'static {
        let seq = self
            .store
            .dispatch_and_select(TransactionsIntent::DetailRequested, |state| state.detail_seq);
        let source = self.source.clone();
        let id = id.to_string();
        let guard = scopeguard::guard(self.store.clone(), move |store| {
            store.dispatch(TransactionsIntent::DetailAbandoned { seq });
        });

        async move {
            let result = source.transaction(&id).await;
            let store = scopeguard::ScopeGuard::into_inner(guard);
            let intent = match result {
                Ok(details) => TransactionsIntent::DetailLoaded { seq, details },
                Err(err) => {
                    tracing::warn!(transaction_id = %id, error = %err, "failed to fetch transaction");
                    TransactionsIntent::DetailFailed {
                        seq,
                        message: err.to_string(),
                    }
                }
            };
            store.dispatch(intent);
        }
    }

    /// Mark a transaction reviewed, then refetch the current page.
    ///
    /// Returns the server's updated record, or `None` if the review failed
    /// (the message is recorded in `error`).
    pub async fn review_transaction(&self, id: &str) -> Option<Transaction> {
        match self.source.review_transaction(id).await {
            Ok(reviewed) => {
                tracing::info!(transaction_id = %id, "transaction reviewed");
                self.fetch_transactions().await;
                Some(reviewed)
            }
            Err(err) => {
                tracing::warn!(transaction_id = %id, error = %err, "failed to review transaction");
                self.store.dispatch(TransactionsIntent::ReviewFailed {
                    message: err.to_string(),
                });
                None
            }
        }
    }
}
