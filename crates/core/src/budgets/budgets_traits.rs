use super::budgets_model::{Budget, BudgetLimit};
use crate::errors::Result;
use crate::pagination::{Page, PageRequest};

/// Trait for budget repository operations
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Active, non-deleted budgets in list order.
    fn get_active_budgets(&self) -> Result<Vec<Budget>>;
    fn get_budget(&self, budget_id: i32) -> Result<Option<Budget>>;
    fn get_budget_limits(&self, budget_id: i32) -> Result<Vec<BudgetLimit>>;
}

/// Trait for budget listing operations
pub trait BudgetListServiceTrait: Send + Sync {
    fn list_budgets(&self, request: PageRequest) -> Result<Page<Budget>>;
    fn list_budget_limits(&self, budget_id: i32, request: PageRequest) -> Result<Page<BudgetLimit>>;
}
