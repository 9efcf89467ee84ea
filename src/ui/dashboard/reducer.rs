use crate::ui::dashboard::intent::DashboardIntent;
use crate::ui::dashboard::state::DashboardState;
use crate::ui::mvi::Reducer;

/// Plain setters; the dashboard store has no fetch logic of its own.
pub struct DashboardReducer;

impl Reducer for DashboardReducer {
    type State = DashboardState;
    type Intent = DashboardIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            DashboardIntent::SetStats(stats) => DashboardState {
                stats: Some(stats),
                ..state
            },
            DashboardIntent::SetRecentTransactions(recent_transactions) => DashboardState {
                recent_transactions,
                ..state
            },
            DashboardIntent::SetLoading(loading) => DashboardState { loading, ..state },
            DashboardIntent::SetError(error) => DashboardState { error, ..state },
        }
    }
}
