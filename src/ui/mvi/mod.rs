//! Model-View-Intent (MVI) primitives for the client-side stores.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: snapshot of what a view renders
//! - **Intent**: user action or server outcome
//! - **Reducer**: pure function that transforms state based on intents
//! - **Store**: shared, lockable home of one reducer's state

mod intent;
mod reducer;
mod state;
mod store;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
pub use store::Store;
