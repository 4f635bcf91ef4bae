use std::sync::Arc;

use ledger_core::budgets::{Budget, BudgetLimit, BudgetRepositoryTrait};
use ledger_core::Result;

use crate::store::MemoryStore;

pub struct BudgetRepository {
    store: Arc<MemoryStore>,
}

impl BudgetRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl BudgetRepositoryTrait for BudgetRepository {
    fn get_active_budgets(&self) -> Result<Vec<Budget>> {
        let snapshot = self.store.read()?;
        let mut budgets: Vec<Budget> = snapshot
            .budgets
            .iter()
            .filter(|b| b.is_listed())
            .cloned()
            .collect();
        budgets.sort_by_key(|b| (b.order, b.id));
        Ok(budgets)
    }

    fn get_budget(&self, budget_id: i32) -> Result<Option<Budget>> {
        let snapshot = self.store.read()?;
        Ok(snapshot
            .budgets
            .iter()
            .find(|b| b.id == budget_id && b.deleted_at.is_none())
            .cloned())
    }

    fn get_budget_limits(&self, budget_id: i32) -> Result<Vec<BudgetLimit>> {
        let snapshot = self.store.read()?;
        Ok(snapshot
            .budget_limits
            .iter()
            .filter(|l| l.budget_id == budget_id)
            .cloned()
            .collect())
    }
}
