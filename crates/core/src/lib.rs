//! Ledger Core - currency, budget and pagination domain.
//!
//! This crate contains the business rules for currencies (per-group
//! enablement and defaults, soft deletion) and the paged listings built on
//! top of them. It is storage-agnostic and defines traits that are
//! implemented by the `storage-memory` crate or any other backend.

pub mod budgets;
pub mod constants;
pub mod currencies;
pub mod errors;
pub mod pagination;
pub mod settings;
pub mod users;

pub use pagination::{paginate, Page, PageRequest};
pub use users::User;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
