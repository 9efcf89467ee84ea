mod intent;
mod reducer;
mod state;

pub use intent::LayoutIntent;
pub use reducer::LayoutReducer;
pub use state::{LayoutState, Theme};
