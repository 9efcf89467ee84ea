use crate::ui::mvi::Reducer;
use crate::ui::transactions::intent::TransactionsIntent;
use crate::ui::transactions::state::TransactionsState;

pub struct TransactionsReducer;

impl TransactionsReducer {
    fn settle(state: TransactionsState) -> TransactionsState {
        let pending = state.pending.saturating_sub(1);
        TransactionsState {
            pending,
            loading: pending > 0,
            ..state
        }
    }
}

impl Reducer for TransactionsReducer {
    type State = TransactionsState;
    type Intent = TransactionsIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            TransactionsIntent::SetStatusFilter(status_filter) => TransactionsState {
                status_filter,
                ..state
            },
            TransactionsIntent::SetPage(current_page) => TransactionsState {
                current_page,
                ..state
            },
            TransactionsIntent::SetPageSize(page_size) => TransactionsState {
                page_size: page_size.max(1),
                ..state
            },

            TransactionsIntent::ListRequested => TransactionsState {
                list_seq: state.list_seq + 1,
                pending: state.pending + 1,
                loading: true,
                error: None,
                ..state
            },
            TransactionsIntent::ListLoaded { seq, page } => {
                let state = Self::settle(state);
                if seq != state.list_seq {
                    return state;
                }
                let last_page = page.total_pages.saturating_sub(1);
                let current_page = state.current_page.min(last_page);
                // Rows of a page that no longer exists are not shown under
                // the clamped page number.
                let transactions = if current_page == state.current_page {
                    page.content
                } else {
                    Vec::new()
                };
                TransactionsState {
                    transactions,
                    total_pages: page.total_pages,
                    total_elements: page.total_elements,
                    current_page,
                    ..state
                }
            }
            TransactionsIntent::ListFailed { seq, message } => {
                let state = Self::settle(state);
                if seq != state.list_seq {
                    return state;
                }
                TransactionsState {
                    error: Some(message),
                    ..state
                }
            }
            TransactionsIntent::ListAbandoned { .. } => Self::settle(state),

            TransactionsIntent::DetailRequested => TransactionsState {
                detail_seq: state.detail_seq + 1,
                pending: state.pending + 1,
                loading: true,
                error: None,
                ..state
            },
            TransactionsIntent::DetailLoaded { seq, details } => {
                let state = Self::settle(state);
                if seq != state.detail_seq {
                    return state;
                }
                TransactionsState {
                    selected_transaction: Some(details),
                    ..state
                }
            }
            TransactionsIntent::DetailFailed { seq, message } => {
                let state = Self::settle(state);
                if seq != state.detail_seq {
                    return state;
                }
                TransactionsState {
                    error: Some(message),
                    ..state
                }
            }
            TransactionsIntent::DetailAbandoned { .. } => Self::settle(state),

            TransactionsIntent::ReviewFailed { message } => TransactionsState {
                error: Some(message),
                ..state
            },
            TransactionsIntent::ClearSelection => TransactionsState {
                selected_transaction: None,
                ..state
            },
        }
    }
}
