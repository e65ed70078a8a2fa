//! Per-address usage records with JSON-file persistence.

mod error;
mod store;
mod types;

pub use error::StoreError;
pub use store::UsageStore;
pub use types::{UsageRecord, UsageUpdate};
