use log::{debug, warn};
use std::sync::Arc;

use super::budgets_model::{Budget, BudgetLimit};
use super::budgets_traits::{BudgetListServiceTrait, BudgetRepositoryTrait};
use crate::constants::BUDGET_LIST_ENDPOINT;
use crate::errors::{Error, Result};
use crate::pagination::{paginate_request, Page, PageRequest};
use crate::settings::{EndpointState, ListingSettings};

/// Paged budget listings.
///
/// Filtering and ordering of budgets belong to the repository.
pub struct BudgetListService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    settings: ListingSettings,
}

impl BudgetListService {
    pub fn new(repository: Arc<dyn BudgetRepositoryTrait>, settings: ListingSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Fails before touching the repository while the listing is parked.
    fn ensure_listing_enabled(&self) -> Result<()> {
        match &self.settings.budget_listing {
            EndpointState::Enabled => Ok(()),
            EndpointState::MigrationIncomplete { destination } => {
                warn!(
                    "Budget listing requested but it needs to move to {}",
                    destination
                );
                Err(Error::MigrationIncomplete {
                    endpoint: BUDGET_LIST_ENDPOINT.to_string(),
                    destination: destination.clone(),
                })
            }
        }
    }
}

impl BudgetListServiceTrait for BudgetListService {
    fn list_budgets(&self, request: PageRequest) -> Result<Page<Budget>> {
        self.ensure_listing_enabled()?;

        let budgets = self.repository.get_active_budgets()?;
        debug!(
            "Listing page {} of {} active budgets",
            request.page,
            budgets.len()
        );
        Ok(paginate_request(budgets, request))
    }

    fn list_budget_limits(&self, budget_id: i32, request: PageRequest) -> Result<Page<BudgetLimit>> {
        if self.repository.get_budget(budget_id)?.is_none() {
            return Err(Error::NotFound(format!("Budget {} not found", budget_id)));
        }
        let mut limits = self.repository.get_budget_limits(budget_id)?;
        limits.sort_by_key(|l| (l.start_date, l.id));
        Ok(paginate_request(limits, request))
    }
}
