//! In-memory storage for budgets.

mod repository;

pub use repository::BudgetRepository;
