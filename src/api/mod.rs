//! HTTP boundary to the admin API.

mod client;
mod source;

pub use client::ApiClient;
pub use source::TransactionSource;
