//! In-memory repository implementations.
//!
//! Used by the `memory` storage backend and by service and boundary tests.
//! They enforce the same uniqueness rules as the MySQL schema.

mod customer_repository;
mod user_repository;

pub use customer_repository::*;
pub use user_repository::*;

use crate::sort::{sort_in_memory, SortField};
use meridian_core::{MeridianResult, Page, PageRequest};

/// Sorts and slices a full result set into the requested page.
fn paginate<T>(
    mut items: Vec<T>,
    fields: &[SortField<T>],
    page: &PageRequest,
    resource: &str,
) -> MeridianResult<Page<T>> {
    sort_in_memory(&mut items, fields, page, resource)?;
    let total = items.len() as u64;
    let content = items
        .into_iter()
        .skip(page.offset())
        .take(page.limit())
        .collect();
    Ok(Page::new(content, page.page, page.size, total))
}
