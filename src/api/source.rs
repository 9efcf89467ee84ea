use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::{Page, Transaction, TransactionDetails, TransactionQuery};

use super::client::ApiClient;

/// The calls the self-fetching transaction store depends on.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn list_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Page<Transaction>, ApiError>;

    async fn transaction(&self, id: &str) -> Result<TransactionDetails, ApiError>;

    async fn review_transaction(&self, id: &str) -> Result<Transaction, ApiError>;
}

#[async_trait]
impl TransactionSource for ApiClient {
    async fn list_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Page<Transaction>, ApiError> {
        ApiClient::list_transactions(self, query).await
    }

    async fn transaction(&self, id: &str) -> Result<TransactionDetails, ApiError> {
        ApiClient::transaction(self, id).await
    }

    async fn review_transaction(&self, id: &str) -> Result<Transaction, ApiError> {
        ApiClient::review_transaction(self, id).await
    }
}
