//! Intents dispatched to a store.

/// Marker trait for intents: user actions (select, paginate, edit) and
/// server outcomes (page loaded, fetch failed, request dropped).
pub trait Intent: Send + 'static {}
