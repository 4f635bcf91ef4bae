//! Currencies module - domain models, registry, default resolution and services.

mod currencies_model;
mod currencies_service;
mod currencies_traits;
mod currency_registry;
mod default_currency_resolver;

#[cfg(test)]
mod currencies_service_tests;

pub use currencies_model::{
    Currency, CurrencyUsage, GroupCurrencyAssociation, NewCurrency, UserCurrencyAssociation,
    UserCurrencyView,
};
pub use currencies_service::CurrencyService;
pub use currencies_traits::{
    CurrencyRepositoryTrait, CurrencyServiceTrait, DefaultCurrencyLookupTrait,
};
pub use currency_registry::CurrencyRegistry;
pub use default_currency_resolver::DefaultCurrencyResolver;
