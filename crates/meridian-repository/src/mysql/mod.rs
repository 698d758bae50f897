//! MySQL repository implementations.

mod customer_repository;
mod user_repository;

pub use customer_repository::*;
pub use user_repository::*;

use meridian_core::{MeridianError, MeridianResult, PageRequest};

/// Converts a page request into `LIMIT` and `OFFSET` bind values.
fn limit_offset(page: &PageRequest) -> MeridianResult<(i64, i64)> {
    let out_of_range =
        || MeridianError::validation(format!("Page index {} is out of range", page.page));
    let limit = i64::try_from(page.limit()).map_err(|_| out_of_range())?;
    let offset = i64::try_from(page.offset()).map_err(|_| out_of_range())?;
    Ok((limit, offset))
}

/// Builds a `LIKE` pattern matching `fragment` anywhere, with the wildcard
/// characters in `fragment` taken literally.
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
