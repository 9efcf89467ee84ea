use serde::{Deserialize, Serialize};

use super::transaction::StatusFilter;

/// One page of a paginated response, exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn empty(size: u32) -> Self {
        Self {
            content: Vec::new(),
            page: 0,
            size,
            total_elements: 0,
            total_pages: 0,
            first: true,
            last: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Parameters of `GET /admin/transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionQuery {
    pub status: StatusFilter,
    pub page: u32,
    pub size: u32,
    pub sort_by: Option<String>,
    pub direction: Option<SortDirection>,
}

impl TransactionQuery {
    pub fn new(status: StatusFilter, page: u32, size: u32) -> Self {
        Self {
            status,
            page,
            size,
            sort_by: None,
            direction: None,
        }
    }

    /// Query-string pairs; unset options are omitted.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);
        if let Some(status) = self.status.status() {
            params.push(("status", status.as_str().to_string()));
        }
        params.push(("page", self.page.to_string()));
        params.push(("size", self.size.to_string()));
        if let Some(sort_by) = &self.sort_by {
            params.push(("sortBy", sort_by.clone()));
        }
        if let Some(direction) = self.direction {
            params.push(("direction", direction.as_str().to_string()));
        }
        params
    }
}

/// Parameters of `GET /admin/transactions/search`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchQuery {
    pub correlation_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// ISO-8601 date-time, passed through unchanged.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: u32,
    pub size: u32,
}

impl SearchQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let optional = [
            ("correlationId", &self.correlation_id),
            ("from", &self.from),
            ("to", &self.to),
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
        ];
        let mut params: Vec<(&'static str, String)> = optional
            .into_iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name, v.clone())))
            .collect();
        params.push(("page", self.page.to_string()));
        params.push(("size", self.size.to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TxStatus;

    #[test]
    fn unfiltered_query_omits_status() {
        let query = TransactionQuery::new(StatusFilter::Any, 0, 20);
        let params = query.to_params();
        assert!(params.iter().all(|(name, _)| *name != "status"));
        assert_eq!(params, vec![("page", "0".to_string()), ("size", "20".to_string())]);
    }

    #[test]
    fn filtered_query_sends_status_and_sorting() {
        let mut query = TransactionQuery::new(StatusFilter::Only(TxStatus::Alerted), 2, 50);
        query.sort_by = Some("createdAt".to_string());
        query.direction = Some(SortDirection::Desc);
        let params = query.to_params();
        assert_eq!(params[0], ("status", "ALERTED".to_string()));
        assert!(params.contains(&("sortBy", "createdAt".to_string())));
        assert!(params.contains(&("direction", "DESC".to_string())));
    }

    #[test]
    fn page_deserializes_camel_case() {
        let json = r#"{"content":[1,2],"page":0,"size":2,"totalElements":5,"totalPages":3,"first":true,"last":false}"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.content, vec![1, 2]);
    }
}
