use log::{debug, info};
use std::sync::Arc;

use super::currencies_model::{Currency, NewCurrency, UserCurrencyView};
use super::currencies_traits::{
    CurrencyRepositoryTrait, CurrencyServiceTrait, DefaultCurrencyLookupTrait,
};
use super::currency_registry::CurrencyRegistry;
use super::default_currency_resolver::DefaultCurrencyResolver;
use crate::errors::{Error, Result, ValidationError};
use crate::pagination::{paginate_request, Page, PageRequest};
use crate::users::User;

/// Service for listing and managing currencies
pub struct CurrencyService {
    repository: Arc<dyn CurrencyRepositoryTrait>,
    registry: CurrencyRegistry,
    resolver: DefaultCurrencyResolver,
}

impl CurrencyService {
    /// Creates a new CurrencyService instance
    pub fn new(
        repository: Arc<dyn CurrencyRepositoryTrait>,
        default_lookup: Arc<dyn DefaultCurrencyLookupTrait>,
    ) -> Self {
        let registry = CurrencyRegistry::new(repository.clone());
        let resolver = DefaultCurrencyResolver::new(registry.clone(), default_lookup);
        Self {
            repository,
            registry,
            resolver,
        }
    }

    pub fn registry(&self) -> &CurrencyRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &DefaultCurrencyResolver {
        &self.resolver
    }
}

#[async_trait::async_trait]
impl CurrencyServiceTrait for CurrencyService {
    fn list_currencies(
        &self,
        user: &User,
        request: PageRequest,
    ) -> Result<Page<UserCurrencyView>> {
        let currencies = self.registry.list_active()?;
        let page = paginate_request(currencies, request);
        let items = self.resolver.resolve_all(user, &page.items)?;
        Ok(Page {
            items,
            total: page.total,
            page: page.page,
            page_size: page.page_size,
        })
    }

    fn list_group_currencies(&self, user: &User) -> Result<Vec<UserCurrencyView>> {
        let currencies = self.registry.group_currencies(user.user_group_id)?;
        self.resolver.resolve_all(user, &currencies)
    }

    fn get_currency(&self, user: &User, currency_id: i32) -> Result<UserCurrencyView> {
        let currency = self.registry.find_by_id(currency_id, false)?;
        self.resolver.resolve(user, &currency)
    }

    /// Anonymous callers and keys that are not integers read as `NotFound`.
    fn bind_route(&self, raw_key: &str, user: Option<&User>) -> Result<UserCurrencyView> {
        let user = user.ok_or_else(|| Error::NotFound(format!("Currency '{}'", raw_key)))?;
        let currency_id: i32 = raw_key
            .trim()
            .parse()
            .map_err(|_| Error::NotFound(format!("Currency '{}'", raw_key)))?;
        self.get_currency(user, currency_id)
    }

    async fn create_currency(&self, new_currency: NewCurrency) -> Result<Currency> {
        let new_currency = new_currency.normalized();
        new_currency.validate()?;
        if self.repository.get_by_code(&new_currency.code)?.is_some() {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Currency code '{}' is already in use",
                new_currency.code
            ))));
        }
        let currency = self.repository.create(new_currency).await?;
        info!("Created currency {} ({})", currency.code, currency.id);
        Ok(currency)
    }

    async fn enable_for_group(&self, user_group_id: i32, currency_id: i32) -> Result<()> {
        let currency = self.registry.find_by_id(currency_id, false)?;
        if !currency.enabled {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Currency {} is globally disabled",
                currency.code
            ))));
        }
        self.repository
            .upsert_group_association(user_group_id, currency_id)
            .await?;
        debug!("Enabled currency {} for group {}", currency.code, user_group_id);
        Ok(())
    }

    async fn disable_for_group(&self, user_group_id: i32, currency_id: i32) -> Result<()> {
        let association = self.registry.group_association(user_group_id, currency_id)?;
        match association {
            Some(a) if a.group_default => Err(Error::Validation(
                ValidationError::DefaultCurrencyLocked {
                    currency_id,
                    user_group_id,
                },
            )),
            Some(_) => {
                self.repository
                    .remove_group_association(user_group_id, currency_id)
                    .await?;
                debug!("Disabled currency {} for group {}", currency_id, user_group_id);
                Ok(())
            }
            None => Ok(()),
        }
    }

    async fn make_group_default(&self, user_group_id: i32, currency_id: i32) -> Result<()> {
        self.enable_for_group(user_group_id, currency_id).await?;
        self.repository
            .set_group_default(user_group_id, currency_id)
            .await?;
        info!(
            "Currency {} is now the default of group {}",
            currency_id, user_group_id
        );
        Ok(())
    }

    async fn delete_currency(&self, currency_id: i32) -> Result<Currency> {
        self.registry.find_by_id(currency_id, false)?;
        if self.registry.usage(currency_id)?.is_in_use() {
            return Err(Error::Validation(ValidationError::CurrencyInUse(currency_id)));
        }
        if let Some(user_group_id) = self.registry.groups_defaulting_to(currency_id)?.first() {
            return Err(Error::Validation(ValidationError::DefaultCurrencyLocked {
                currency_id,
                user_group_id: *user_group_id,
            }));
        }
        let deleted = self.repository.soft_delete(currency_id).await?;
        info!("Soft deleted currency {} ({})", deleted.code, deleted.id);
        Ok(deleted)
    }
}
