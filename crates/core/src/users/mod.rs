//! Users module - the caller identity passed explicitly into services.

mod users_model;

pub use users_model::User;
