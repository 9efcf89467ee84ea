//! State containers and the views that feed them.
//!
//! Each store is a [`mvi::Store`] over a reducer. Views own the query
//! subscriptions and push their results into the stores; the transaction
//! store fetches for itself.

pub mod dashboard;
pub mod layout;
pub mod mvi;
pub mod notifications;
pub mod rules;
pub mod transactions;
