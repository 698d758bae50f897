//! Whitelisted sort properties.
//!
//! Callers name sort keys the way the API does (`createdAt`). Each adapter
//! resolves them against one table per entity, so a property sorts the same
//! way in MySQL and in memory, and unknown names never reach SQL.
//!
//! Text columns use a case-insensitive collation in MySQL, so the in-memory
//! comparisons fold case too. Accent folding is not replicated.

use meridian_core::{MeridianError, MeridianResult, PageRequest, SortDirection, SortOrder};
use meridian_domain::{Customer, User};
use std::cmp::Ordering;

/// One sortable property of `T`.
pub struct SortField<T> {
    /// API name, in camelCase.
    pub property: &'static str,
    /// Column in the backing table.
    pub column: &'static str,
    /// Ascending in-memory comparison.
    pub compare: fn(&T, &T) -> Ordering,
}

impl<T> SortField<T> {
    fn matches(&self, property: &str) -> bool {
        normalize(self.property) == normalize(property)
    }
}

/// `firstName`, `first_name` and `FIRSTNAME` all name the same property.
fn normalize(property: &str) -> String {
    property
        .chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case-insensitive text ordering.
fn fold_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Like [`fold_cmp`], with `NULL` first as MySQL orders it ascending.
fn fold_cmp_opt(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => fold_cmp(a, b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

/// Sortable user properties.
pub const USER_SORT_FIELDS: &[SortField<User>] = &[
    SortField { property: "id", column: "id", compare: |a, b| a.id.cmp(&b.id) },
    SortField { property: "username", column: "username", compare: |a, b| fold_cmp(&a.username, &b.username) },
    SortField { property: "email", column: "email", compare: |a, b| fold_cmp(&a.email, &b.email) },
    SortField { property: "firstName", column: "first_name", compare: |a, b| fold_cmp(&a.first_name, &b.first_name) },
    SortField { property: "lastName", column: "last_name", compare: |a, b| fold_cmp(&a.last_name, &b.last_name) },
    SortField { property: "role", column: "role", compare: |a, b| a.role.as_str().cmp(b.role.as_str()) },
    SortField { property: "isActive", column: "is_active", compare: |a, b| a.active.cmp(&b.active) },
    SortField { property: "createdAt", column: "created_at", compare: |a, b| a.created_at.cmp(&b.created_at) },
    SortField { property: "updatedAt", column: "updated_at", compare: |a, b| a.updated_at.cmp(&b.updated_at) },
];

/// Sortable customer properties.
pub const CUSTOMER_SORT_FIELDS: &[SortField<Customer>] = &[
    SortField { property: "id", column: "id", compare: |a, b| a.id.cmp(&b.id) },
    SortField { property: "companyName", column: "company_name", compare: |a, b| fold_cmp(&a.company_name, &b.company_name) },
    SortField { property: "contactPerson", column: "contact_person", compare: |a, b| fold_cmp(&a.contact_person, &b.contact_person) },
    SortField { property: "email", column: "email", compare: |a, b| fold_cmp(&a.email, &b.email) },
    SortField { property: "phone", column: "phone", compare: |a, b| fold_cmp_opt(a.phone.as_deref(), b.phone.as_deref()) },
    SortField { property: "industry", column: "industry", compare: |a, b| fold_cmp_opt(a.industry.as_deref(), b.industry.as_deref()) },
    SortField { property: "status", column: "status", compare: |a, b| a.status.as_str().cmp(b.status.as_str()) },
    SortField { property: "createdAt", column: "created_at", compare: |a, b| a.created_at.cmp(&b.created_at) },
    SortField { property: "updatedAt", column: "updated_at", compare: |a, b| a.updated_at.cmp(&b.updated_at) },
];

/// Order applied when a page request carries no sort keys: newest first.
fn default_order() -> [SortOrder; 1] {
    [SortOrder::desc("createdAt")]
}

/// Resolves the page's sort keys, falling back to the default order.
/// The id is always appended as a final tie-breaker so pages are stable.
fn resolve<'a, T>(
    fields: &'a [SortField<T>],
    page: &PageRequest,
    resource: &str,
) -> MeridianResult<Vec<(&'a SortField<T>, SortDirection)>> {
    let defaults = default_order();
    let orders: &[SortOrder] = if page.is_unsorted() { &defaults } else { &page.sort };

    let mut resolved = Vec::with_capacity(orders.len() + 1);
    for order in orders {
        let field = fields
            .iter()
            .find(|field| field.matches(&order.property))
            .ok_or_else(|| {
                MeridianError::validation(format!(
                    "Cannot sort {resource} by unknown property '{}'",
                    order.property
                ))
            })?;
        resolved.push((field, order.direction));
    }

    if !resolved.iter().any(|(field, _)| field.property == "id") {
        let tie_direction = resolved.last().map_or(SortDirection::Asc, |(_, direction)| *direction);
        if let Some(id_field) = fields.iter().find(|field| field.property == "id") {
            resolved.push((id_field, tie_direction));
        }
    }

    Ok(resolved)
}

/// Builds the body of an `ORDER BY` clause from whitelisted columns only.
pub fn order_by_clause<T>(
    fields: &[SortField<T>],
    page: &PageRequest,
    resource: &str,
) -> MeridianResult<String> {
    let clause = resolve(fields, page, resource)?
        .into_iter()
        .map(|(field, direction)| format!("{} {}", field.column, direction.as_sql()))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(clause)
}

/// Sorts items in place the way [`order_by_clause`] would order rows.
pub fn sort_in_memory<T>(
    items: &mut [T],
    fields: &[SortField<T>],
    page: &PageRequest,
    resource: &str,
) -> MeridianResult<()> {
    let keys = resolve(fields, page, resource)?;
    items.sort_by(|a, b| {
        keys.iter().fold(Ordering::Equal, |acc, (field, direction)| {
            acc.then_with(|| {
                let ordering = (field.compare)(a, b);
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            })
        })
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order_is_newest_first() {
        let clause = order_by_clause(USER_SORT_FIELDS, &PageRequest::first(), "users").unwrap();
        assert_eq!(clause, "created_at DESC, id DESC");
    }

    #[test]
    fn test_explicit_sort_maps_columns() {
        let page = PageRequest::new(0, 10)
            .with_sort([SortOrder::asc("lastName"), SortOrder::desc("first_name")]);
        let clause = order_by_clause(USER_SORT_FIELDS, &page, "users").unwrap();
        assert_eq!(clause, "last_name ASC, first_name DESC, id DESC");
    }

    #[test]
    fn test_explicit_id_sort_is_not_duplicated() {
        let page = PageRequest::new(0, 10).with_sort([SortOrder::asc("id")]);
        let clause = order_by_clause(CUSTOMER_SORT_FIELDS, &page, "customers").unwrap();
        assert_eq!(clause, "id ASC");
    }

    #[test]
    fn test_unknown_property_is_rejected() {
        let page = PageRequest::new(0, 10).with_sort([SortOrder::asc("password_hash")]);
        let err = order_by_clause(USER_SORT_FIELDS, &page, "users").unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("password_hash"));
    }

    #[test]
    fn test_sort_in_memory_orders_by_keys() {
        let mut values = vec![3_i32, 1, 2];
        let fields: &[SortField<i32>] = &[
            SortField { property: "id", column: "id", compare: |a, b| a.cmp(b) },
            SortField { property: "createdAt", column: "created_at", compare: |a, b| a.cmp(b) },
        ];

        sort_in_memory(&mut values, fields, &PageRequest::first(), "numbers").unwrap();
        assert_eq!(values, vec![3, 2, 1]);

        let ascending = PageRequest::first().with_sort([SortOrder::asc("createdAt")]);
        sort_in_memory(&mut values, fields, &ascending, "numbers").unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_text_properties_sort_ignoring_case() {
        let created = chrono::Utc::now();
        let customer = |company: &str, phone: Option<&str>| {
            let mut customer = Customer::new(
                company.to_string(),
                "Jane Roe".to_string(),
                format!("{}@example.com", company.to_lowercase()),
                meridian_domain::Address::default(),
                created,
            );
            customer.phone = phone.map(str::to_string);
            customer
        };
        let mut customers = vec![
            customer("beta", Some("555")),
            customer("Charlie", None),
            customer("Alpha", Some("444")),
        ];

        let by_name = PageRequest::first().with_sort([SortOrder::asc("companyName")]);
        sort_in_memory(&mut customers, CUSTOMER_SORT_FIELDS, &by_name, "customers").unwrap();
        let names: Vec<_> = customers.iter().map(|c| c.company_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "Charlie"]);

        let by_phone = PageRequest::first().with_sort([SortOrder::asc("phone")]);
        sort_in_memory(&mut customers, CUSTOMER_SORT_FIELDS, &by_phone, "customers").unwrap();
        let names: Vec<_> = customers.iter().map(|c| c.company_name.as_str()).collect();
        assert_eq!(names, vec!["Charlie", "Alpha", "beta"]);
    }
}
