//! Application root: builds the API client, the query cache and one
//! instance of every store, and hands them to views.

use std::sync::Arc;

use crate::api::{ApiClient, TransactionSource};
use crate::config::Config;
use crate::error::ApiError;
use crate::query::QueryCache;
use crate::ui::dashboard::{DashboardReducer, DashboardView};
use crate::ui::layout::{LayoutIntent, LayoutReducer, Theme};
use crate::ui::mvi::Store;
use crate::ui::notifications::Notifications;
use crate::ui::rules::{RulesReducer, RulesView};
use crate::ui::transactions::{TransactionDetailView, TransactionStore, TransactionsView};

/// Everything a view needs, constructed once per application (or test).
#[derive(Clone)]
pub struct AppContext {
    config: Config,
    api: ApiClient,
    cache: QueryCache,
    dashboard: Store<DashboardReducer>,
    layout: Store<LayoutReducer>,
    rules: Store<RulesReducer>,
    transactions: TransactionStore,
    notifications: Notifications,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api)?;
        let source: Arc<dyn TransactionSource> = Arc::new(api.clone());
        Ok(Self::with_transaction_source(config, api, source))
    }

    /// Like [`new`], with the transaction store fetching through `source`.
    ///
    /// [`new`]: AppContext::new
    pub fn with_transaction_source(
        config: Config,
        api: ApiClient,
        source: Arc<dyn TransactionSource>,
    ) -> Self {
        let cache = QueryCache::from_config(&config.cache);
        let transactions = TransactionStore::new(source, config.display.page_size);
        tracing::debug!(base_url = %api.base_url(), "application context created");

        Self {
            config,
            api,
            cache,
            dashboard: Store::default(),
            layout: Store::default(),
            rules: Store::default(),
            transactions,
            notifications: Notifications::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn layout(&self) -> &Store<LayoutReducer> {
        &self.layout
    }

    pub fn toggle_sidebar(&self) -> bool {
        self.layout
            .dispatch_and_select(LayoutIntent::ToggleSidebar, |state| state.sidebar_open)
    }

    pub fn set_theme(&self, theme: Theme) {
        self.layout.dispatch(LayoutIntent::SetTheme(theme));
    }

    pub fn dashboard_view(&self) -> DashboardView {
        DashboardView::mount(
            &self.cache,
            &self.api,
            self.dashboard.clone(),
            self.config.display.recent_limit,
        )
    }

    pub fn rules_view(&self, enabled: Option<bool>) -> RulesView {
        RulesView::mount(
            &self.cache,
            &self.api,
            self.rules.clone(),
            self.notifications.clone(),
            enabled,
        )
    }

    pub fn transactions_view(&self) -> TransactionsView {
        TransactionsView::new(self.transactions.clone(), self.notifications.clone())
    }

    pub fn transaction_detail_view(&self, id: &str) -> TransactionDetailView {
        TransactionDetailView::mount(&self.cache, &self.api, self.notifications.clone(), id)
    }
}
