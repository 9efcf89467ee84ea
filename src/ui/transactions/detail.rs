use crate::api::ApiClient;
use crate::error::{ApiError, ValidationError};
use crate::model::{Transaction, TransactionDetails};
use crate::query::{keys, QueryCache, QueryKey, QueryState, QuerySubscription};
use crate::ui::notifications::Notifications;

/// Detail page for one transaction, backed by the `transaction` query.
pub struct TransactionDetailView {
    cache: QueryCache,
    api: ApiClient,
    notifications: Notifications,
    id: String,
    detail: QuerySubscription<TransactionDetails>,
}

impl TransactionDetailView {
    pub fn mount(
        cache: &QueryCache,
        api: &ApiClient,
        notifications: Notifications,
        id: &str,
    ) -> Self {
        let detail_api = api.clone();
        let detail_id = id.to_string();
        let detail = cache.subscribe(keys::transaction(id), move || {
            let api = detail_api.clone();
            let id = detail_id.clone();
            async move { api.transaction(&id).await }
        });

        Self {
            cache: cache.clone(),
            api: api.clone(),
            notifications,
            id: id.to_string(),
            detail,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn load(&self) -> QueryState<TransactionDetails> {
        self.detail.ensure_fresh().await
    }

    pub fn state(&self) -> QueryState<TransactionDetails> {
        self.detail.state()
    }

    /// Mark the transaction reviewed. Only ALERTED transactions qualify.
    ///
    /// On success the detail, dashboard and transaction-list queries are
    /// invalidated before this resolves.
    pub async fn review(&self) -> Result<Transaction, ApiError> {
        let details = self.load().await.into_result()?;
        if !details.status().can_review() {
            return Err(ValidationError::NotReviewable {
                id: self.id.clone(),
                status: details.status().to_string(),
            }
            .into());
        }

        let notifications = &self.notifications;
        let id = self.id.as_str();
        self.cache
            .mutation()
            .invalidates(keys::transaction(id))
            .invalidates(keys::dashboard_stats())
            .invalidates(QueryKey::new(keys::RECENT_TRANSACTIONS))
            .invalidates(keys::transactions())
            .on_success(move |_: &Transaction| {
                tracing::info!(transaction_id = %id, "transaction reviewed");
                notifications.success("Transaction marked as reviewed");
            })
            .on_error(move |_| {
                notifications.error("Failed to review transaction");
            })
            .run(self.api.review_transaction(id))
            .await
    }
}
