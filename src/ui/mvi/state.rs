//! State held by a [`Store`](super::Store).

/// Marker trait for store state.
///
/// `PartialEq` lets the store skip change notifications when an intent
/// leaves the state as it was; `Default` is the state a fresh store
/// starts from and the placeholder used while a reducer runs.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
