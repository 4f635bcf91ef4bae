//! Unit tests for the currency registry, default resolver and service.

use super::*;
use crate::errors::{Error, ErrorKind, Result, ValidationError};
use crate::pagination::PageRequest;
use crate::users::User;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

// ============================================================================
// Mock Implementations
// ============================================================================

#[derive(Default)]
struct MockState {
    currencies: Vec<Currency>,
    group_associations: Vec<GroupCurrencyAssociation>,
    usage: Vec<(i32, CurrencyUsage)>,
}

#[derive(Default)]
struct MockCurrencyRepository {
    state: RwLock<MockState>,
    reads: AtomicUsize,
}

impl MockCurrencyRepository {
    fn new(currencies: Vec<Currency>, group_associations: Vec<GroupCurrencyAssociation>) -> Self {
        Self {
            state: RwLock::new(MockState {
                currencies,
                group_associations,
                usage: Vec::new(),
            }),
            reads: AtomicUsize::new(0),
        }
    }

    fn with_usage(self, currency_id: i32, usage: CurrencyUsage) -> Self {
        self.state.write().unwrap().usage.push((currency_id, usage));
        self
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, MockState> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.state.read().unwrap()
    }
}

#[async_trait]
impl CurrencyRepositoryTrait for MockCurrencyRepository {
    fn get_by_id(&self, currency_id: i32) -> Result<Option<Currency>> {
        Ok(self
            .read()
            .currencies
            .iter()
            .find(|c| c.id == currency_id)
            .cloned())
    }

    fn get_by_code(&self, code: &str) -> Result<Option<Currency>> {
        Ok(self
            .read()
            .currencies
            .iter()
            .find(|c| c.code == code && !c.is_deleted())
            .cloned())
    }

    fn list(&self) -> Result<Vec<Currency>> {
        Ok(self.read().currencies.clone())
    }

    fn list_group_associations(&self, user_group_id: i32) -> Result<Vec<GroupCurrencyAssociation>> {
        Ok(self
            .read()
            .group_associations
            .iter()
            .filter(|a| a.user_group_id == user_group_id)
            .cloned()
            .collect())
    }

    fn list_groups_for_currency(&self, currency_id: i32) -> Result<Vec<GroupCurrencyAssociation>> {
        Ok(self
            .read()
            .group_associations
            .iter()
            .filter(|a| a.currency_id == currency_id)
            .cloned()
            .collect())
    }

    fn get_user_association(
        &self,
        _user_id: i32,
        _currency_id: i32,
    ) -> Result<Option<UserCurrencyAssociation>> {
        Ok(None)
    }

    fn count_usage(&self, currency_id: i32) -> Result<CurrencyUsage> {
        Ok(self
            .read()
            .usage
            .iter()
            .find(|(id, _)| *id == currency_id)
            .map(|(_, usage)| *usage)
            .unwrap_or_default())
    }

    async fn create(&self, new_currency: NewCurrency) -> Result<Currency> {
        let mut state = self.state.write().unwrap();
        let id = state.currencies.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let currency = Currency {
            id,
            code: new_currency.code,
            name: new_currency.name,
            symbol: new_currency.symbol,
            decimal_places: new_currency.decimal_places,
            enabled: new_currency.enabled,
            created_at: timestamp(),
            updated_at: timestamp(),
            deleted_at: None,
        };
        state.currencies.push(currency.clone());
        Ok(currency)
    }

    async fn upsert_group_association(
        &self,
        user_group_id: i32,
        currency_id: i32,
    ) -> Result<GroupCurrencyAssociation> {
        let mut state = self.state.write().unwrap();
        if let Some(existing) = state
            .group_associations
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
        state.group_associations.push(association.clone());
        Ok(association)
    }

    async fn remove_group_association(
        &self,
        user_group_id: i32,
        currency_id: i32,
    ) -> Result<usize> {
        let mut state = self.state.write().unwrap();
        let before = state.group_associations.len();
        state
            .group_associations
            .retain(|a| !(a.user_group_id == user_group_id && a.currency_id == currency_id));
        Ok(before - state.group_associations.len())
    }

    async fn set_group_default(&self, user_group_id: i32, currency_id: i32) -> Result<()> {
        let mut state = self.state.write().unwrap();
        for association in state
            .group_associations
            .iter_mut()
            .filter(|a| a.user_group_id == user_group_id)
        {
            association.group_default = association.currency_id == currency_id;
        }
        Ok(())
    }

    async fn soft_delete(&self, currency_id: i32) -> Result<Currency> {
        let mut state = self.state.write().unwrap();
        let currency = state
            .currencies
            .iter_mut()
            .find(|c| c.id == currency_id)
            .ok_or_else(|| Error::NotFound(format!("Currency {}", currency_id)))?;
        currency.deleted_at = Some(timestamp());
        let deleted = currency.clone();
        state.group_associations.retain(|a| a.currency_id != currency_id);
        Ok(deleted)
    }
}

/// Reads the group default straight from the repository's associations.
struct MockDefaultLookup {
    repository: Arc<MockCurrencyRepository>,
}

impl DefaultCurrencyLookupTrait for MockDefaultLookup {
    fn get_default_currency_by_user_group(&self, user_group_id: i32) -> Result<Option<Currency>> {
        let default_id = self
            .repository
            .list_group_associations(user_group_id)?
            .into_iter()
            .find(|a| a.group_default)
            .map(|a| a.currency_id);
        match default_id {
            Some(id) => self.repository.get_by_id(id),
            None => Ok(None),
        }
    }
}

/// Always answers with one fixed currency, regardless of associations.
struct FixedDefaultLookup(Option<Currency>);

impl DefaultCurrencyLookupTrait for FixedDefaultLookup {
    fn get_default_currency_by_user_group(&self, _user_group_id: i32) -> Result<Option<Currency>> {
        Ok(self.0.clone())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn currency(id: i32, code: &str) -> Currency {
    Currency {
        id,
        code: code.to_string(),
        name: format!("{} currency", code),
        symbol: code.chars().take(1).collect(),
        decimal_places: 2,
        enabled: true,
        created_at: timestamp(),
        updated_at: timestamp(),
        deleted_at: None,
    }
}

fn association(user_group_id: i32, currency_id: i32, group_default: bool) -> GroupCurrencyAssociation {
    GroupCurrencyAssociation {
        user_group_id,
        currency_id,
        group_default,
    }
}

fn user() -> User {
    User {
        id: 1,
        email: "james@example.com".to_string(),
        user_group_id: 10,
    }
}

fn service_with(repository: Arc<MockCurrencyRepository>) -> CurrencyService {
    let lookup = Arc::new(MockDefaultLookup {
        repository: repository.clone(),
    });
    CurrencyService::new(repository, lookup)
}

/// Ten currencies with IDs 1..=10; group 10 enabled 1, 5 and 7 with 7 as default.
fn standard_repository() -> Arc<MockCurrencyRepository> {
    let currencies = (1..=10).map(|id| currency(id, &format!("C{:02}", id))).collect();
    Arc::new(MockCurrencyRepository::new(
        currencies,
        vec![
            association(10, 1, false),
            association(10, 5, false),
            association(10, 7, true),
            association(20, 3, true),
        ],
    ))
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_list_active_excludes_deleted_and_disabled() {
    let mut deleted = currency(2, "OLD");
    deleted.deleted_at = Some(timestamp());
    let mut disabled = currency(3, "OFF");
    disabled.enabled = false;
    let repository = Arc::new(MockCurrencyRepository::new(
        vec![currency(4, "EUR"), deleted, disabled, currency(1, "USD")],
        vec![],
    ));
    let registry = CurrencyRegistry::new(repository);

    let ids: Vec<i32> = registry.list_active().unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[test]
fn test_find_by_id_hides_deleted_unless_requested() {
    let mut deleted = currency(2, "OLD");
    deleted.deleted_at = Some(timestamp());
    let registry = CurrencyRegistry::new(Arc::new(MockCurrencyRepository::new(
        vec![deleted],
        vec![],
    )));

    assert!(registry.find_by_id(2, false).unwrap_err().is_not_found());
    assert_eq!(registry.find_by_id(2, true).unwrap().code, "OLD");
    assert!(registry.find_by_id(99, true).unwrap_err().is_not_found());
}

#[test]
fn test_group_association_absent_is_not_an_error() {
    let registry = CurrencyRegistry::new(standard_repository());
    assert!(registry.group_association(10, 3).unwrap().is_none());
    assert!(registry.group_association(10, 7).unwrap().unwrap().group_default);
}

#[test]
fn test_groups_defaulting_to() {
    let registry = CurrencyRegistry::new(standard_repository());
    assert_eq!(registry.groups_defaulting_to(7).unwrap(), vec![10]);
    assert!(registry.groups_defaulting_to(1).unwrap().is_empty());
}

// ============================================================================
// Resolver
// ============================================================================

#[test]
fn test_resolve_group_default_and_unassociated_currency() {
    let service = service_with(standard_repository());
    let user = user();

    let default = service.get_currency(&user, 7).unwrap();
    assert!(default.user_default);
    assert!(default.user_enabled);

    let other = service.get_currency(&user, 3).unwrap();
    assert!(!other.user_default);
    assert!(!other.user_enabled);

    let enabled_only = service.get_currency(&user, 5).unwrap();
    assert!(!enabled_only.user_default);
    assert!(enabled_only.user_enabled);
}

#[test]
fn test_resolve_default_holds_even_when_not_enabled_for_group() {
    let repository = standard_repository();
    let registry = CurrencyRegistry::new(repository.clone());
    let resolver =
        DefaultCurrencyResolver::new(registry, Arc::new(FixedDefaultLookup(Some(currency(3, "C03")))));

    let view = resolver.resolve(&user(), &currency(3, "C03")).unwrap();
    assert!(view.user_default);
    assert!(!view.user_enabled);
}

#[test]
fn test_resolve_without_group_default() {
    let registry = CurrencyRegistry::new(standard_repository());
    let resolver = DefaultCurrencyResolver::new(registry.clone(), Arc::new(FixedDefaultLookup(None)));

    let currencies = registry.list_active().unwrap();
    let views = resolver.resolve_all(&user(), &currencies).unwrap();
    assert!(views.iter().all(|v| !v.user_default));
    assert_eq!(views.iter().filter(|v| v.user_enabled).count(), 3);
}

#[test]
fn test_resolve_all_marks_a_single_default() {
    let service = service_with(standard_repository());
    let currencies = service.registry().list_active().unwrap();
    let views = service.resolver().resolve_all(&user(), &currencies).unwrap();

    let defaults: Vec<i32> = views.iter().filter(|v| v.user_default).map(|v| v.id).collect();
    assert_eq!(defaults, vec![7]);
}

#[test]
fn test_view_serializes_user_flags_camel_case() {
    let view = UserCurrencyView::new(&currency(7, "EUR"), true, false);
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["userDefault"], serde_json::json!(true));
    assert_eq!(json["userEnabled"], serde_json::json!(false));
    assert_eq!(json["decimalPlaces"], serde_json::json!(2));
}

// ============================================================================
// Service: listing and route binding
// ============================================================================

#[test]
fn test_list_currencies_paginates_then_annotates() {
    let currencies = (1..=25).map(|id| currency(id, &format!("C{:02}", id))).collect();
    let repository = Arc::new(MockCurrencyRepository::new(
        currencies,
        vec![association(10, 12, true), association(10, 3, false)],
    ));
    let service = service_with(repository);

    let page = service
        .list_currencies(&user(), PageRequest::new(2, 10).unwrap())
        .unwrap();
    assert_eq!(page.total, 25);
    assert_eq!(page.page, 2);
    assert_eq!(
        page.items.iter().map(|v| v.id).collect::<Vec<_>>(),
        (11..=20).collect::<Vec<_>>()
    );
    assert!(page.items.iter().find(|v| v.id == 12).unwrap().user_default);
    assert_eq!(page.items.iter().filter(|v| v.user_default).count(), 1);
}

#[test]
fn test_list_group_currencies() {
    let service = service_with(standard_repository());
    let ids: Vec<i32> = service
        .list_group_currencies(&user())
        .unwrap()
        .iter()
        .map(|v| v.id)
        .collect();
    assert_eq!(ids, vec![1, 5, 7]);
}

#[test]
fn test_bind_route_requires_a_user() {
    let repository = standard_repository();
    let service = service_with(repository.clone());

    let err = service.bind_route("7", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(repository.reads.load(Ordering::SeqCst), 0);
}

#[test]
fn test_bind_route_rejects_non_numeric_and_unknown_keys() {
    let service = service_with(standard_repository());
    let user = user();

    assert!(service.bind_route("euro", Some(&user)).unwrap_err().is_not_found());
    assert!(service.bind_route("404", Some(&user)).unwrap_err().is_not_found());

    let view = service.bind_route(" 7 ", Some(&user)).unwrap();
    assert_eq!(view.id, 7);
    assert!(view.user_default);
}

#[test]
fn test_bind_route_hides_soft_deleted_currency() {
    let mut deleted = currency(4, "OLD");
    deleted.deleted_at = Some(timestamp());
    let service = service_with(Arc::new(MockCurrencyRepository::new(vec![deleted], vec![])));
    assert!(service.bind_route("4", Some(&user())).unwrap_err().is_not_found());
}

// ============================================================================
// Service: mutations
// ============================================================================

#[tokio::test]
async fn test_create_currency_validates_and_rejects_duplicate_codes() {
    let service = service_with(standard_repository());

    let invalid = NewCurrency {
        code: "EU".to_string(),
        name: "Euro".to_string(),
        symbol: "€".to_string(),
        decimal_places: 2,
        enabled: true,
    };
    assert!(matches!(
        service.create_currency(invalid).await,
        Err(Error::Validation(_))
    ));

    let duplicate = NewCurrency {
        code: "C07".to_string(),
        name: "Copy".to_string(),
        symbol: "c".to_string(),
        decimal_places: 2,
        enabled: true,
    };
    assert!(matches!(
        service.create_currency(duplicate).await,
        Err(Error::Validation(ValidationError::InvalidInput(_)))
    ));

    let created = service
        .create_currency(NewCurrency {
            code: "EUR".to_string(),
            name: "Euro".to_string(),
            symbol: "€".to_string(),
            decimal_places: 2,
            enabled: true,
        })
        .await
        .unwrap();
    assert_eq!(created.id, 11);
}

#[tokio::test]
async fn test_create_currency_trims_fields_before_duplicate_check() {
    let service = service_with(standard_repository());

    let padded_duplicate = NewCurrency {
        code: " C07 ".to_string(),
        name: "Copy".to_string(),
        symbol: "c".to_string(),
        decimal_places: 2,
        enabled: true,
    };
    assert!(matches!(
        service.create_currency(padded_duplicate).await,
        Err(Error::Validation(ValidationError::InvalidInput(_)))
    ));

    let created = service
        .create_currency(NewCurrency {
            code: "  EUR ".to_string(),
            name: " Euro".to_string(),
            symbol: "€ ".to_string(),
            decimal_places: 2,
            enabled: true,
        })
        .await
        .unwrap();
    assert_eq!(
        (created.code.as_str(), created.name.as_str(), created.symbol.as_str()),
        ("EUR", "Euro", "€")
    );
}

#[tokio::test]
async fn test_disable_group_default_is_rejected() {
    let service = service_with(standard_repository());
    let err = service.disable_for_group(10, 7).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::DefaultCurrencyLocked {
            currency_id: 7,
            user_group_id: 10
        })
    ));

    service.disable_for_group(10, 5).await.unwrap();
    assert!(!service.get_currency(&user(), 5).unwrap().user_enabled);
}

#[tokio::test]
async fn test_make_group_default_moves_the_flag() {
    let service = service_with(standard_repository());
    let user = user();

    service.make_group_default(10, 3).await.unwrap();

    let new_default = service.get_currency(&user, 3).unwrap();
    assert!(new_default.user_default);
    assert!(new_default.user_enabled);
    assert!(!service.get_currency(&user, 7).unwrap().user_default);

    let currencies = service.registry().list_active().unwrap();
    let views = service.resolver().resolve_all(&user, &currencies).unwrap();
    assert_eq!(views.iter().filter(|v| v.user_default).count(), 1);
}

#[tokio::test]
async fn test_enable_globally_disabled_currency_is_rejected() {
    let mut disabled = currency(2, "OFF");
    disabled.enabled = false;
    let service = service_with(Arc::new(MockCurrencyRepository::new(vec![disabled], vec![])));
    assert!(matches!(
        service.enable_for_group(10, 2).await,
        Err(Error::Validation(_))
    ));
}

#[tokio::test]
async fn test_delete_currency_guards() {
    let repository = Arc::new(
        MockCurrencyRepository::new(
            vec![currency(1, "USD"), currency(2, "EUR"), currency(3, "GBP")],
            vec![association(10, 2, true)],
        )
        .with_usage(
            1,
            CurrencyUsage {
                budget_limits_count: 0,
                transaction_journals_count: 3,
                transactions_count: 6,
            },
        ),
    );
    let service = service_with(repository);

    assert!(matches!(
        service.delete_currency(1).await,
        Err(Error::Validation(ValidationError::CurrencyInUse(1)))
    ));
    assert!(matches!(
        service.delete_currency(2).await,
        Err(Error::Validation(ValidationError::DefaultCurrencyLocked { .. }))
    ));

    let deleted = service.delete_currency(3).await.unwrap();
    assert!(deleted.is_deleted());
    assert!(service.get_currency(&user(), 3).unwrap_err().is_not_found());
    assert!(service.registry().find_by_id(3, true).is_ok());
    assert!(service.delete_currency(3).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_currency_drops_group_links() {
    let repository = Arc::new(MockCurrencyRepository::new(
        vec![currency(1, "USD"), currency(2, "EUR")],
        vec![association(10, 1, true), association(10, 2, false)],
    ));
    let service = service_with(repository.clone());
    let user = user();

    service.delete_currency(2).await.unwrap();

    assert!(repository.list_groups_for_currency(2).unwrap().is_empty());
    let deleted = service.registry().find_by_id(2, true).unwrap();
    let view = service.resolver().resolve(&user, &deleted).unwrap();
    assert!(!view.user_enabled);
    assert!(!view.user_default);
    assert!(service.get_currency(&user, 1).unwrap().user_default);
}
