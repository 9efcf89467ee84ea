use super::intent::Intent;
use super::state::UiState;

/// `(State, Intent) -> State`, with no side effects.
///
/// Every state transition of a store goes through its reducer, so a
/// reducer can be tested without a runtime.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
