use super::pagination_model::{Page, PageRequest};
use crate::errors::Result;

/// Slices `collection` into the requested page.
///
/// The total is taken from the full collection before slicing, and the
/// collection is sliced exactly once. Pages past the end are empty but still
/// report the full total.
pub fn paginate<T>(collection: Vec<T>, page: usize, page_size: usize) -> Result<Page<T>> {
    let request = PageRequest::new(page, page_size)?;
    Ok(paginate_request(collection, request))
}

pub(crate) fn paginate_request<T>(collection: Vec<T>, request: PageRequest) -> Page<T> {
    let total = collection.len();
    let items = match request.offset() {
        Some(offset) if offset < total => collection
            .into_iter()
            .skip(offset)
            .take(request.page_size)
            .collect(),
        _ => Vec::new(),
    };

    Page {
        items,
        total,
        page: request.page,
        page_size: request.page_size,
    }
}
