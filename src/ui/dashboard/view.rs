//! Dashboard view: projects the stats and recent-transactions queries into
//! the dashboard store.

use crate::api::ApiClient;
use crate::model::{DashboardStats, Transaction};
use crate::query::{keys, QueryCache, QueryState, QuerySubscription};
use crate::ui::mvi::Store;

use super::intent::DashboardIntent;
use super::reducer::DashboardReducer;

/// Intents that bring the store in line with the two source queries.
///
/// Data is only pushed once present, so a failed refetch leaves the last
/// good value visible. `loading` is the OR of both loading flags and the
/// first error wins.
pub fn project(
    stats: &QueryState<DashboardStats>,
    recent: &QueryState<Vec<Transaction>>,
) -> Vec<DashboardIntent> {
    let mut intents = Vec::with_capacity(4);
    if let Some(data) = &stats.data {
        intents.push(DashboardIntent::SetStats(data.as_ref().clone()));
    }
    if let Some(data) = &recent.data {
        intents.push(DashboardIntent::SetRecentTransactions(data.as_ref().clone()));
    }
    intents.push(DashboardIntent::SetLoading(
        stats.is_loading || recent.is_loading,
    ));
    let error = stats
        .error
        .as_ref()
        .or(recent.error.as_ref())
        .map(|e| e.to_string());
    intents.push(DashboardIntent::SetError(error));
    intents
}

pub struct DashboardView {
    store: Store<DashboardReducer>,
    stats: QuerySubscription<DashboardStats>,
    recent: QuerySubscription<Vec<Transaction>>,
}

impl DashboardView {
    /// Mount both queries without fetching; [`load`] starts the requests.
    ///
    /// [`load`]: DashboardView::load
    pub fn mount(
        cache: &QueryCache,
        api: &ApiClient,
        store: Store<DashboardReducer>,
        recent_limit: u32,
    ) -> Self {
        let stats_api = api.clone();
        let stats = cache.subscribe(keys::dashboard_stats(), move || {
            let api = stats_api.clone();
            async move { api.dashboard_stats().await }
        });

        let recent_api = api.clone();
        let recent = cache.subscribe(keys::recent_transactions(recent_limit), move || {
            let api = recent_api.clone();
            async move { api.recent_transactions(recent_limit).await }
        });

        let view = Self {
            store,
            stats,
            recent,
        };
        view.sync();
        view
    }

    /// Fetch whatever is missing or stale, then sync the store.
    ///
    /// Both queries settle before the store is written, so it never shows
    /// a value older than the slower query's last completion.
    pub async fn load(&self) {
        tokio::join!(self.stats.ensure_fresh(), self.recent.ensure_fresh());
        self.sync();
    }

    /// Wait for either query to change (e.g. after an invalidation) and
    /// sync. Returns `false` once no further change can arrive.
    pub async fn next_change(&mut self) -> bool {
        let alive = tokio::select! {
            alive = self.stats.changed() => alive,
            alive = self.recent.changed() => alive,
        };
        self.sync();
        alive
    }

    /// Push the current query results into the store.
    pub fn sync(&self) {
        for intent in project(&self.stats.state(), &self.recent.state()) {
            self.store.dispatch(intent);
        }
    }

    pub fn store(&self) -> &Store<DashboardReducer> {
        &self.store
    }
}
