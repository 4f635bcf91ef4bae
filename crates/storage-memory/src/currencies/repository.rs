use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use std::sync::Arc;

use ledger_core::currencies::{
    Currency, CurrencyRepositoryTrait, CurrencyUsage, DefaultCurrencyLookupTrait,
    GroupCurrencyAssociation, NewCurrency, UserCurrencyAssociation,
};
use ledger_core::Result;

use crate::errors::StorageError;
use crate::store::MemoryStore;

/// Repository for currencies and their group/user links
pub struct CurrencyRepository {
    store: Arc<MemoryStore>,
}

impl CurrencyRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CurrencyRepositoryTrait for CurrencyRepository {
    fn get_by_id(&self, currency_id: i32) -> Result<Option<Currency>> {
        let snapshot = self.store.read()?;
        Ok(snapshot
            .currencies
            .iter()
            .find(|c| c.id == currency_id)
            .cloned())
    }

    fn get_by_code(&self, code: &str) -> Result<Option<Currency>> {
        let snapshot = self.store.read()?;
        Ok(snapshot
            .currencies
            .iter()
            .find(|c| !c.is_deleted() && c.code.eq_ignore_ascii_case(code))
            .cloned())
    }

    fn list(&self) -> Result<Vec<Currency>> {
        Ok(self.store.read()?.currencies.clone())
    }

    fn list_group_associations(&self, user_group_id: i32) -> Result<Vec<GroupCurrencyAssociation>> {
        let snapshot = self.store.read()?;
        Ok(snapshot
            .group_currencies
            .iter()
            .filter(|a| a.user_group_id == user_group_id)
            .cloned()
            .collect())
    }

    fn list_groups_for_currency(&self, currency_id: i32) -> Result<Vec<GroupCurrencyAssociation>> {
        let snapshot = self.store.read()?;
        Ok(snapshot
            .group_currencies
            .iter()
            .filter(|a| a.currency_id == currency_id)
            .cloned()
            .collect())
    }

    fn get_user_association(
        &self,
        user_id: i32,
        currency_id: i32,
    ) -> Result<Option<UserCurrencyAssociation>> {
        let snapshot = self.store.read()?;
        Ok(snapshot
            .user_currencies
            .iter()
            .find(|a| a.user_id == user_id && a.currency_id == currency_id)
            .cloned())
    }

    fn count_usage(&self, currency_id: i32) -> Result<CurrencyUsage> {
        let snapshot = self.store.read()?;
        Ok(CurrencyUsage {
            budget_limits_count: snapshot
                .budget_limits
                .iter()
                .filter(|l| l.currency_id == currency_id)
                .count(),
            transaction_journals_count: snapshot
                .transaction_journals
                .iter()
                .filter(|j| j.currency_id == currency_id)
                .count(),
            transactions_count: snapshot
                .transactions
                .iter()
                .filter(|t| t.currency_id == currency_id)
                .count(),
        })
    }

    async fn create(&self, new_currency: NewCurrency) -> Result<Currency> {
        let mut snapshot = self.store.write()?;
        if snapshot
            .currencies
            .iter()
            .any(|c| !c.is_deleted() && c.code.eq_ignore_ascii_case(&new_currency.code))
        {
            return Err(StorageError::Duplicate(format!("currency code {}", new_currency.code)).into());
        }

        let now = Utc::now().naive_utc();
        let currency = Currency {
            id: snapshot.next_currency_id()?,
            code: new_currency.code,
            name: new_currency.name,
            symbol: new_currency.symbol,
            decimal_places: new_currency.decimal_places,
            enabled: new_currency.enabled,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        snapshot.currencies.push(currency.clone());
        debug!("Stored currency {} with id {}", currency.code, currency.id);
        Ok(currency)
    }

    async fn upsert_group_association(
        &self,
        user_group_id: i32,
        currency_id: i32,
    ) -> Result<GroupCurrencyAssociation> {
        let mut snapshot = self.store.write()?;
        if let Some(existing) = snapshot
            .group_currencies
            .iter()
            .find(|a| a.user_group_id == user_group_id && a.currency_id == currency_id)
        {
            return Ok(existing.clone());
        }
        let association = GroupCurrencyAssociation {
            user_group_id,
            currency_id,
            group_default: false,
        };
        snapshot.group_currencies.push(association.clone());
        Ok(association)
    }

    async fn remove_group_association(
        &self,
        user_group_id: i32,
        currency_id: i32,
    ) -> Result<usize> {
        let mut snapshot = self.store.write()?;
        let before = snapshot.group_currencies.len();
        snapshot
            .group_currencies
            .retain(|a| !(a.user_group_id == user_group_id && a.currency_id == currency_id));
        Ok(before - snapshot.group_currencies.len())
    }

    async fn set_group_default(&self, user_group_id: i32, currency_id: i32) -> Result<()> {
        let mut snapshot = self.store.write()?;
        let mut found = false;
        for association in snapshot
            .group_currencies
            .iter_mut()
            .filter(|a| a.user_group_id == user_group_id)
        {
            association.group_default = association.currency_id == currency_id;
            found |= association.group_default;
        }
        if !found {
            return Err(StorageError::NotFound(format!(
                "group {} has no link to currency {}",
                user_group_id, currency_id
            ))
            .into());
        }
        Ok(())
    }

    async fn soft_delete(&self, currency_id: i32) -> Result<Currency> {
        let mut snapshot = self.store.write()?;
        let currency = snapshot
            .currencies
            .iter_mut()
            .find(|c| c.id == currency_id)
            .ok_or_else(|| StorageError::NotFound(format!("currency {}", currency_id)))?;
        let now = Utc::now().naive_utc();
        currency.deleted_at = Some(now);
        currency.updated_at = now;
        let deleted = currency.clone();

        snapshot.group_currencies.retain(|a| a.currency_id != currency_id);
        snapshot.user_currencies.retain(|a| a.currency_id != currency_id);
        debug!("Soft deleted currency {} and dropped its links", currency_id);
        Ok(deleted)
    }
}

/// Group default taken from the `group_default` flag of the group's links.
impl DefaultCurrencyLookupTrait for CurrencyRepository {
    fn get_default_currency_by_user_group(&self, user_group_id: i32) -> Result<Option<Currency>> {
        let snapshot = self.store.read()?;
        let default_id = snapshot
            .group_currencies
            .iter()
            .find(|a| a.user_group_id == user_group_id && a.group_default)
            .map(|a| a.currency_id);
        Ok(default_id.and_then(|id| snapshot.currencies.iter().find(|c| c.id == id).cloned()))
    }
}
