use serde::{Deserialize, Serialize};

use crate::constants::{BUDGET_LIST_DESTINATION, DEFAULT_PAGE_SIZE};

/// Whether an endpoint serves data or is parked pending relocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum EndpointState {
    Enabled,
    MigrationIncomplete { destination: String },
}

impl EndpointState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, EndpointState::Enabled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSettings {
    pub default_page_size: usize,
    pub budget_listing: EndpointState,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            budget_listing: EndpointState::MigrationIncomplete {
                destination: BUDGET_LIST_DESTINATION.to_string(),
            },
        }
    }
}

impl ListingSettings {
    pub fn with_budget_listing_enabled(mut self) -> Self {
        self.budget_listing = EndpointState::Enabled;
        self
    }
}
