use crate::model::{DashboardStats, Transaction};
use crate::ui::mvi::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardIntent {
    SetStats(DashboardStats),
    SetRecentTransactions(Vec<Transaction>),
    SetLoading(bool),
    SetError(Option<String>),
}

impl Intent for DashboardIntent {}
