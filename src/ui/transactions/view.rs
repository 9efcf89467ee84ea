//! Transactions page: the reaction that drives store fetches from the
//! filter and page inputs, and the pagination controls.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::error::ValidationError;
use crate::model::{StatusFilter, Transaction};
use crate::ui::notifications::Notifications;
use crate::ui::transactions::store::TransactionStore;

type ListParams = (StatusFilter, u32, u32);

/// Cloning yields another handle onto the same view.
#[derive(Clone)]
pub struct TransactionsView {
    store: TransactionStore,
    notifications: Notifications,
    last_params: Arc<Mutex<Option<ListParams>>>,
}

impl TransactionsView {
    pub fn new(store: TransactionStore, notifications: Notifications) -> Self {
        Self {
            store,
            notifications,
            last_params: Arc::new(Mutex::new(None)),
        }
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    /// Start a fetch if the filter, page or page size changed since the
    /// last one this view started. The first call always fetches.
    ///
    /// Must be called within a tokio runtime.
    pub fn react(&self) -> Option<JoinHandle<()>> {
        let params = self.store.store().select(|state| state.list_params());
        {
            let mut last = self.last_params.lock();
            if last.as_ref() == Some(&params) {
                return None;
            }
            *last = Some(params);
        }
        let (filter, page, size) = params;
        tracing::debug!(status = filter.label(), page, size, "transaction list inputs changed");
        Some(tokio::spawn(self.store.fetch_transactions()))
    }

    /// Run [`react`] after every store change until the returned task is
    /// aborted.
    ///
    /// [`react`]: TransactionsView::react
    pub fn spawn_reaction(&self) -> JoinHandle<()> {
        let view = self.clone();
        let mut changes = self.store.store().watch();
        tokio::spawn(async move {
            view.react();
            while changes.changed().await.is_ok() {
                view.react();
            }
        })
    }

    /// Refetch the current page even if nothing changed.
    pub async fn refresh(&self) {
        let params = self.store.store().select(|state| state.list_params());
        *self.last_params.lock() = Some(params);
        self.store.fetch_transactions().await;
    }

    /// Change the status filter and go back to the first page.
    pub fn select_status(&self, filter: StatusFilter) -> Option<JoinHandle<()>> {
        self.store.set_status_filter(filter);
        self.store.set_page(0);
        self.react()
    }

    pub fn set_page_size(&self, size: u32) -> Option<JoinHandle<()>> {
        self.store.set_page_size(size);
        self.store.set_page(0);
        self.react()
    }

    /// Move to `page`, rejecting pages the last response did not report.
    pub fn go_to_page(&self, page: u32) -> Result<Option<JoinHandle<()>>, ValidationError> {
        let total_pages = self.store.store().select(|state| state.total_pages);
        if page > 0 && page >= total_pages {
            return Err(ValidationError::PageOutOfRange { page, total_pages });
        }
        self.store.set_page(page);
        Ok(self.react())
    }

    pub fn next_page(&self) -> Result<Option<JoinHandle<()>>, ValidationError> {
        let current = self.store.store().select(|state| state.current_page);
        self.go_to_page(current + 1)
    }

    /// No-op on the first page.
    pub fn previous_page(&self) -> Option<JoinHandle<()>> {
        let current = self.store.store().select(|state| state.current_page);
        let previous = current.checked_sub(1)?;
        self.store.set_page(previous);
        self.react()
    }

    /// Review a transaction from the list.
    ///
    /// A listed transaction that is not ALERTED is rejected up front.
    /// Returns the reviewed record, or `None` if the server refused (the
    /// store's `error` holds the reason).
    pub async fn review(&self, id: &str) -> Result<Option<Transaction>, ValidationError> {
        let listed = self.store.store().select(|state| {
            state
                .transactions
                .iter()
                .find(|tx| tx.id == id)
                .map(|tx| tx.status)
        });
        if let Some(status) = listed {
            if !status.can_review() {
                return Err(ValidationError::NotReviewable {
                    id: id.to_string(),
                    status: status.to_string(),
                });
            }
        }

        let reviewed = self.store.review_transaction(id).await;
        if reviewed.is_some() {
            self.notifications.success("Transaction marked as reviewed");
        } else {
            self.notifications.error("Failed to review transaction");
        }
        Ok(reviewed)
    }
}
