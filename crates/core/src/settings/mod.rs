//! Listing settings shared by the paged endpoints.

mod settings_model;

pub use settings_model::{EndpointState, ListingSettings};
