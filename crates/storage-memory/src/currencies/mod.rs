//! In-memory storage for currencies.

mod repository;

pub use repository::CurrencyRepository;
