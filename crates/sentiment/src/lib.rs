//! Turns a classifier's free-text reply into labelled comments and
//! summarises them.

mod aggregate;
pub mod literal;
mod reconcile;

pub use aggregate::{SentimentCounts, aggregate};
pub use reconcile::{MalformedResponse, ReconcileError, reconcile};
