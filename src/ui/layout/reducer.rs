use crate::ui::layout::intent::LayoutIntent;
use crate::ui::layout::state::LayoutState;
use crate::ui::mvi::Reducer;

pub struct LayoutReducer;

impl Reducer for LayoutReducer {
    type State = LayoutState;
    type Intent = LayoutIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LayoutIntent::ToggleSidebar => LayoutState {
                sidebar_open: !state.sidebar_open,
                ..state
            },
            LayoutIntent::SetSidebarOpen(sidebar_open) => LayoutState {
                sidebar_open,
                ..state
            },
            LayoutIntent::SetTheme(theme) => LayoutState { theme, ..state },
        }
    }
}
