use log::debug;
use std::sync::Arc;

use super::currencies_model::{
    Currency, CurrencyUsage, GroupCurrencyAssociation, UserCurrencyAssociation,
};
use super::currencies_traits::CurrencyRepositoryTrait;
use crate::errors::{Error, Result};

/// Authoritative lookup of currencies and their group associations.
#[derive(Clone)]
pub struct CurrencyRegistry {
    repository: Arc<dyn CurrencyRepositoryTrait>,
}

impl CurrencyRegistry {
    pub fn new(repository: Arc<dyn CurrencyRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Finds a currency by ID.
    ///
    /// Soft-deleted currencies stay reachable for historical records, but only
    /// when `include_deleted` is set.
    pub fn find_by_id(&self, currency_id: i32, include_deleted: bool) -> Result<Currency> {
        debug!(
            "Looking up currency {} (include_deleted: {})",
            currency_id, include_deleted
        );
        match self.repository.get_by_id(currency_id)? {
            Some(currency) if include_deleted || !currency.is_deleted() => Ok(currency),
            _ => Err(Error::currency_not_found(currency_id)),
        }
    }

    pub fn find_by_code(&self, code: &str) -> Result<Currency> {
        self.repository
            .get_by_code(code)?
            .filter(|c| !c.is_deleted())
            .ok_or_else(|| Error::NotFound(format!("Currency '{}' not found", code)))
    }

    /// Globally enabled, non-deleted currencies ordered by ID.
    pub fn list_active(&self) -> Result<Vec<Currency>> {
        let mut currencies: Vec<Currency> = self
            .repository
            .list()?
            .into_iter()
            .filter(Currency::is_active)
            .collect();
        currencies.sort_by_key(|c| c.id);
        Ok(currencies)
    }

    /// The group's association with a currency, if the group enabled it.
    pub fn group_association(
        &self,
        user_group_id: i32,
        currency_id: i32,
    ) -> Result<Option<GroupCurrencyAssociation>> {
        Ok(self
            .repository
            .list_group_associations(user_group_id)?
            .into_iter()
            .find(|a| a.currency_id == currency_id))
    }

    pub fn group_associations(&self, user_group_id: i32) -> Result<Vec<GroupCurrencyAssociation>> {
        self.repository.list_group_associations(user_group_id)
    }

    /// Active currencies the group has an association with, ordered by ID.
    pub fn group_currencies(&self, user_group_id: i32) -> Result<Vec<Currency>> {
        let associations = self.repository.list_group_associations(user_group_id)?;
        Ok(self
            .list_active()?
            .into_iter()
            .filter(|c| associations.iter().any(|a| a.currency_id == c.id))
            .collect())
    }

    /// Groups that use the currency as their default.
    pub fn groups_defaulting_to(&self, currency_id: i32) -> Result<Vec<i32>> {
        Ok(self
            .repository
            .list_groups_for_currency(currency_id)?
            .into_iter()
            .filter(|a| a.group_default)
            .map(|a| a.user_group_id)
            .collect())
    }

    /// The individual user's link to a currency, if any.
    pub fn user_association(
        &self,
        user_id: i32,
        currency_id: i32,
    ) -> Result<Option<UserCurrencyAssociation>> {
        self.repository.get_user_association(user_id, currency_id)
    }

    pub fn usage(&self, currency_id: i32) -> Result<CurrencyUsage> {
        self.find_by_id(currency_id, true)?;
        self.repository.count_usage(currency_id)
    }
}
