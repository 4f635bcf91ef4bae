//! Currency domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CURRENCY_CODE_LENGTH, CURRENCY_NAME_LENGTH, CURRENCY_SYMBOL_LENGTH, MAX_DECIMAL_PLACES,
};
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a transaction currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub symbol: String,
    pub decimal_places: u32,
    /// Globally enabled, independent of any user group
    pub enabled: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Soft deletion marker
    pub deleted_at: Option<NaiveDateTime>,
}

impl Currency {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Eligible for active listings.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.is_deleted()
    }
}

/// Input model for creating a new currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCurrency {
    pub code: String,
    pub name: String,
    pub symbol: String,
    pub decimal_places: u32,
    pub enabled: bool,
}

fn check_length(field: &str, value: &str, (min, max): (usize, usize)) -> Result<()> {
    let length = value.trim().chars().count();
    if length == 0 {
        return Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        )));
    }
    if length < min || length > max {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Currency {} must be between {} and {} characters",
            field, min, max
        ))));
    }
    Ok(())
}

impl NewCurrency {
    /// Strips surrounding whitespace from the text fields.
    pub fn normalized(self) -> Self {
        Self {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            symbol: self.symbol.trim().to_string(),
            ..self
        }
    }

    /// Validates the new currency data.
    pub fn validate(&self) -> Result<()> {
        check_length("code", &self.code, CURRENCY_CODE_LENGTH)?;
        check_length("name", &self.name, CURRENCY_NAME_LENGTH)?;
        check_length("symbol", &self.symbol, CURRENCY_SYMBOL_LENGTH)?;
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Currency decimal places must be at most {}",
                MAX_DECIMAL_PLACES
            ))));
        }
        Ok(())
    }
}

/// Link between a user group and a currency it has enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCurrencyAssociation {
    pub user_group_id: i32,
    pub currency_id: i32,
    pub group_default: bool,
}

/// Link between an individual user and a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCurrencyAssociation {
    pub user_id: i32,
    pub currency_id: i32,
    pub user_default: bool,
}

/// How many records still reference a currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyUsage {
    pub budget_limits_count: usize,
    pub transaction_journals_count: usize,
    pub transactions_count: usize,
}

impl CurrencyUsage {
    pub fn is_in_use(&self) -> bool {
        self.budget_limits_count > 0
            || self.transaction_journals_count > 0
            || self.transactions_count > 0
    }
}

/// A currency as seen by one user: the currency's fields plus the flags that
/// depend on the user's group. Computed per request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCurrencyView {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub symbol: String,
    pub decimal_places: u32,
    pub enabled: bool,
    pub user_default: bool,
    pub user_enabled: bool,
}

impl UserCurrencyView {
    pub fn new(currency: &Currency, user_default: bool, user_enabled: bool) -> Self {
        Self {
            id: currency.id,
            code: currency.code.clone(),
            name: currency.name.clone(),
            symbol: currency.symbol.clone(),
            decimal_places: currency.decimal_places,
            enabled: currency.enabled,
            user_default,
            user_enabled,
        }
    }
}
