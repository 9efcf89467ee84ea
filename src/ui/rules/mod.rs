mod intent;
mod reducer;
mod state;
mod view;

pub use intent::RulesIntent;
pub use reducer::RulesReducer;
pub use state::RulesState;
pub use view::{project, RulesView};
