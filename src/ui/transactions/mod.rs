mod detail;
mod intent;
mod reducer;
mod state;
mod store;
mod view;

pub use detail::TransactionDetailView;
pub use intent::TransactionsIntent;
pub use reducer::TransactionsReducer;
pub use state::{TransactionsState, DEFAULT_PAGE_SIZE};
pub use store::TransactionStore;
pub use view::TransactionsView;
