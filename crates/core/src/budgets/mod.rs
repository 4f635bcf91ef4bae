//! Budgets module - domain models, listing service, and traits.

mod budgets_model;
mod budgets_service;
mod budgets_traits;

pub use budgets_model::{Budget, BudgetLimit};
pub use budgets_service::BudgetListService;
pub use budgets_traits::{BudgetListServiceTrait, BudgetRepositoryTrait};
