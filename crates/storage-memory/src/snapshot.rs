//! The persisted shape of the ledger.

use serde::{Deserialize, Serialize};

use ledger_core::budgets::{Budget, BudgetLimit};
use ledger_core::currencies::{Currency, GroupCurrencyAssociation, UserCurrencyAssociation};

use crate::errors::StorageError;

/// Reference to a transaction journal, kept only for currency usage counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalRecord {
    pub id: i32,
    pub currency_id: i32,
}

/// Reference to a transaction, kept only for currency usage counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: i32,
    pub journal_id: i32,
    pub currency_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerSnapshot {
    pub currencies: Vec<Currency>,
    pub group_currencies: Vec<GroupCurrencyAssociation>,
    pub user_currencies: Vec<UserCurrencyAssociation>,
    pub budgets: Vec<Budget>,
    pub budget_limits: Vec<BudgetLimit>,
    pub transaction_journals: Vec<JournalRecord>,
    pub transactions: Vec<TransactionRecord>,
}

impl LedgerSnapshot {
    pub fn next_currency_id(&self) -> Result<i32, StorageError> {
        let max = self.currencies.iter().map(|c| c.id).max().unwrap_or(0);
        max.checked_add(1)
            .ok_or_else(|| StorageError::IdExhausted("currencies".to_string()))
    }
}
