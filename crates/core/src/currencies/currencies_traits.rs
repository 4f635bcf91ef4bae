//! Currency repository and service traits.
//!
//! These traits define the contract for currency operations without any
//! storage-specific types, allowing for different backends.

use async_trait::async_trait;

use super::currencies_model::{
    Currency, CurrencyUsage, GroupCurrencyAssociation, NewCurrency, UserCurrencyAssociation,
    UserCurrencyView,
};
use crate::errors::Result;
use crate::pagination::{Page, PageRequest};
use crate::users::User;

/// Trait defining the contract for Currency repository operations.
#[async_trait]
pub trait CurrencyRepositoryTrait: Send + Sync {
    /// Retrieves a currency by its ID, soft-deleted ones included.
    ///
    /// Returns `Ok(None)` when no row with that ID was ever stored.
    fn get_by_id(&self, currency_id: i32) -> Result<Option<Currency>>;

    /// Retrieves a non-deleted currency by its code.
    fn get_by_code(&self, code: &str) -> Result<Option<Currency>>;

    /// Lists every stored currency, soft-deleted ones included.
    fn list(&self) -> Result<Vec<Currency>>;

    /// Lists all associations of a user group.
    fn list_group_associations(&self, user_group_id: i32) -> Result<Vec<GroupCurrencyAssociation>>;

    /// Lists the groups that enabled a currency.
    fn list_groups_for_currency(&self, currency_id: i32) -> Result<Vec<GroupCurrencyAssociation>>;

    fn get_user_association(
        &self,
        user_id: i32,
        currency_id: i32,
    ) -> Result<Option<UserCurrencyAssociation>>;

    /// Counts the budget limits, journals and transactions referencing a currency.
    fn count_usage(&self, currency_id: i32) -> Result<CurrencyUsage>;

    async fn create(&self, new_currency: NewCurrency) -> Result<Currency>;

    /// Inserts the association if missing. Existing default flags are kept.
    async fn upsert_group_association(
        &self,
        user_group_id: i32,
        currency_id: i32,
    ) -> Result<GroupCurrencyAssociation>;

    /// Removes the association. Returns the number of removed rows.
    async fn remove_group_association(&self, user_group_id: i32, currency_id: i32)
        -> Result<usize>;

    /// Marks `currency_id` as the group default and clears the flag on every
    /// other association of the group.
    async fn set_group_default(&self, user_group_id: i32, currency_id: i32) -> Result<()>;

    /// Sets the deletion timestamp of a currency and drops its group and user links.
    async fn soft_delete(&self, currency_id: i32) -> Result<Currency>;
}

/// Lookup of the single default currency configured for a user group.
pub trait DefaultCurrencyLookupTrait: Send + Sync {
    /// Returns `Ok(None)` when the group has no default configured.
    fn get_default_currency_by_user_group(&self, user_group_id: i32) -> Result<Option<Currency>>;
}

/// Trait defining the contract for Currency service operations.
#[async_trait]
pub trait CurrencyServiceTrait: Send + Sync {
    /// Lists active currencies as seen by `user`, one page at a time.
    fn list_currencies(&self, user: &User, request: PageRequest)
        -> Result<Page<UserCurrencyView>>;

    /// Lists the active currencies `user`'s group has enabled.
    fn list_group_currencies(&self, user: &User) -> Result<Vec<UserCurrencyView>>;

    /// Retrieves a non-deleted currency as seen by `user`.
    fn get_currency(&self, user: &User, currency_id: i32) -> Result<UserCurrencyView>;

    /// Resolves a raw path key into a currency for the (optional) caller.
    fn bind_route(&self, raw_key: &str, user: Option<&User>) -> Result<UserCurrencyView>;

    async fn create_currency(&self, new_currency: NewCurrency) -> Result<Currency>;

    async fn enable_for_group(&self, user_group_id: i32, currency_id: i32) -> Result<()>;

    async fn disable_for_group(&self, user_group_id: i32, currency_id: i32) -> Result<()>;

    async fn make_group_default(&self, user_group_id: i32, currency_id: i32) -> Result<()>;

    async fn delete_currency(&self, currency_id: i32) -> Result<Currency>;
}
