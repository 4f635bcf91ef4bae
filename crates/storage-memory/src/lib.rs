//! In-memory storage implementation for the ledger core.
//!
//! This crate implements the repository traits defined in `ledger-core` over
//! a snapshot held in memory. Snapshots are loaded from and persisted to JSON
//! files.
//!
//! ```text
//! core (domain)
//!       │
//!       ▼
//! storage-memory (this crate)
//!       │
//!       ▼
//!  JSON snapshot
//! ```

pub mod budgets;
pub mod currencies;
pub mod errors;
pub mod snapshot;
pub mod store;

pub use snapshot::{JournalRecord, LedgerSnapshot, TransactionRecord};
pub use store::MemoryStore;
