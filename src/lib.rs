//! Client-side state synchronisation for the fraud-detection admin console.
//!
//! Server data lives in the [`query`] cache; the stores under [`ui`] are
//! projections of it, except the transaction store, which fetches for
//! itself and guards against out-of-order responses.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod query;
pub mod ui;

pub use app::AppContext;
pub use error::{ApiError, ValidationError};
