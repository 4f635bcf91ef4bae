//! Pagination module - page models and the slicing rule shared by listings.

mod pagination_model;
mod paginator;

pub use pagination_model::{Page, PageRequest};
pub use paginator::paginate;
pub(crate) use paginator::paginate_request;
