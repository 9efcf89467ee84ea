//! Remote-cache layer: keyed server responses, deduplicated fetches,
//! invalidation-driven refetch and confirm-then-sync mutations.

mod cache;
mod key;
mod mutation;

pub use cache::{BoxFuture, QueryCache, QueryState, QuerySubscription};
pub use key::{keys, QueryKey};
pub use mutation::Mutation;
