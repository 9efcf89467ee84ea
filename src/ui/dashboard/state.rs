use crate::model::{DashboardStats, Transaction};
use crate::ui::mvi::UiState;

/// Display cache for the dashboard page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    pub stats: Option<DashboardStats>,
    pub recent_transactions: Vec<Transaction>,
    pub loading: bool,
    pub error: Option<String>,
}

impl UiState for DashboardState {}
