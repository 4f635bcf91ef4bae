use log::{debug, warn};
use std::collections::HashSet;
use std::sync::Arc;

use super::currencies_model::{Currency, UserCurrencyView};
use super::currencies_traits::DefaultCurrencyLookupTrait;
use super::currency_registry::CurrencyRegistry;
use crate::errors::Result;
use crate::users::User;

/// Computes the user-scoped `user_default` / `user_enabled` flags of currencies.
#[derive(Clone)]
pub struct DefaultCurrencyResolver {
    registry: CurrencyRegistry,
    default_lookup: Arc<dyn DefaultCurrencyLookupTrait>,
}

impl DefaultCurrencyResolver {
    pub fn new(
        registry: CurrencyRegistry,
        default_lookup: Arc<dyn DefaultCurrencyLookupTrait>,
    ) -> Self {
        Self {
            registry,
            default_lookup,
        }
    }

    fn group_default_id(&self, user: &User) -> Result<Option<i32>> {
        let default = self
            .default_lookup
            .get_default_currency_by_user_group(user.user_group_id)?;
        if default.is_none() {
            warn!(
                "User group {} has no default currency configured",
                user.user_group_id
            );
        }
        Ok(default.map(|c| c.id))
    }

    /// Annotates a single currency for `user`.
    ///
    /// A group without a default yields `user_default == false` for every
    /// currency. The default flag does not depend on the group having the
    /// currency enabled.
    pub fn resolve(&self, user: &User, currency: &Currency) -> Result<UserCurrencyView> {
        let default_id = self.group_default_id(user)?;
        let user_default = default_id == Some(currency.id);
        let user_enabled = self
            .registry
            .group_association(user.user_group_id, currency.id)?
            .is_some();

        debug!(
            "Resolved currency {} for user {}: default={}, enabled={}",
            currency.code, user.id, user_default, user_enabled
        );
        Ok(UserCurrencyView::new(currency, user_default, user_enabled))
    }

    /// Annotates a set of currencies in one pass.
    ///
    /// The group default is looked up once per pass, so over a set of distinct
    /// currencies at most one view carries `user_default == true`.
    pub fn resolve_all(&self, user: &User, currencies: &[Currency]) -> Result<Vec<UserCurrencyView>> {
        let default_id = self.group_default_id(user)?;
        let enabled_ids: HashSet<i32> = self
            .registry
            .group_associations(user.user_group_id)?
            .iter()
            .map(|a| a.currency_id)
            .collect();

        Ok(currencies
            .iter()
            .map(|currency| {
                UserCurrencyView::new(
                    currency,
                    default_id == Some(currency.id),
                    enabled_ids.contains(&currency.id),
                )
            })
            .collect())
    }
}
