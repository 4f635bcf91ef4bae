use std::path::PathBuf;

use ledger_core::constants::DEFAULT_PAGE_SIZE;
use ledger_core::settings::{EndpointState, ListingSettings};

pub struct Config {
    pub data_path: PathBuf,
    pub listing: ListingSettings,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let data_path = std::env::var("LEDGER_DATA_PATH")
            .unwrap_or_else(|_| "./data/ledger.json".into())
            .into();
        let default_page_size: usize = std::env::var("LEDGER_DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let budget_list_enabled = std::env::var("LEDGER_ENABLE_BUDGET_LIST")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);
        let log_format = std::env::var("LEDGER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let mut listing = ListingSettings {
            default_page_size,
            ..ListingSettings::default()
        };
        if budget_list_enabled {
            listing.budget_listing = EndpointState::Enabled;
        }

        Self {
            data_path,
            listing,
            log_format,
        }
    }
}
