//! Pagination extractor.

use meridian_core::{MeridianResult, PageRequest, SortOrder};
use serde::Deserialize;

/// Query parameters for pagination.
///
/// `sort` may repeat: `?sort=lastName,asc&sort=createdAt,desc`. Extract it
/// with `axum_extra::extract::Query` so the repeated keys collect.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
    #[serde(default)]
    pub sort: Vec<String>,
}

impl PaginationQuery {
    /// Builds the page request, rejecting malformed sort keys and page
    /// indexes whose offset the store cannot address.
    ///
    /// Whether a property is sortable is decided by the repository.
    pub fn into_page_request(self) -> MeridianResult<PageRequest> {
        let sort = self
            .sort
            .iter()
            .filter(|key| !key.trim().is_empty())
            .map(|key| key.parse::<SortOrder>())
            .collect::<MeridianResult<Vec<_>>>()?;

        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
        .with_sort(sort)
        .checked()
    }
}
