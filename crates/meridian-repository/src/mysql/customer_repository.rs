//! MySQL customer repository implementation.

use super::{contains_pattern, limit_offset};
use crate::sort::{order_by_clause, CUSTOMER_SORT_FIELDS};
use crate::traits::{CustomerFilter, CustomerRepository};
use crate::DatabasePoolInterface;
use meridian_core::{CustomerId, MeridianError, MeridianResult, Page, PageRequest};
use meridian_domain::{Address, Customer, CustomerStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const SELECT_CUSTOMERS: &str = "SELECT id, company_name, contact_person, email, phone, \
     address_street, address_city, address_state, address_zip_code, address_country, \
     industry, status, created_at, updated_at FROM customers";

/// MySQL customer repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = CustomerRepository)]
pub struct MySqlCustomerRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlCustomerRepository {
    /// Creates a new MySQL customer repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a customer. The address is flattened
/// into nullable columns.
#[derive(Debug, FromRow)]
struct CustomerRow {
    id: String,
    company_name: String,
    contact_person: String,
    email: String,
    phone: Option<String>,
    address_street: Option<String>,
    address_city: Option<String>,
    address_state: Option<String>,
    address_zip_code: Option<String>,
    address_country: Option<String>,
    industry: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = MeridianError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| MeridianError::Internal(format!("Invalid UUID in database: {e}")))?;
        let status = row.status.parse::<CustomerStatus>().map_err(|_| {
            MeridianError::Internal(format!("Invalid customer status in database: {}", row.status))
        })?;
        let address = Address {
            street: row.address_street,
            city: row.address_city,
            state: row.address_state,
            zip_code: row.address_zip_code,
            country: row.address_country,
        };

        Ok(Customer {
            id: CustomerId::from_uuid(id),
            company_name: row.company_name,
            contact_person: row.contact_person,
            email: row.email,
            phone: row.phone,
            address: address.into_option(),
            industry: row.industry,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &CustomerFilter) {
    let mut separator = " WHERE ";
    if let Some(status) = filter.status {
        builder.push(separator).push("status = ").push_bind(status.as_str());
        separator = " AND ";
    }
    if let Some(industry) = &filter.industry {
        builder
            .push(separator)
            .push("LOWER(industry) = LOWER(")
            .push_bind(industry.clone())
            .push(")");
        separator = " AND ";
    }
    if let Some(fragment) = &filter.company_name {
        builder
            .push(separator)
            .push("LOWER(company_name) LIKE LOWER(")
            .push_bind(contains_pattern(fragment))
            .push(")");
    }
}

fn into_customers(rows: Vec<CustomerRow>) -> MeridianResult<Vec<Customer>> {
    rows.into_iter().map(Customer::try_from).collect()
}

#[async_trait]
impl CustomerRepository for MySqlCustomerRepository {
    async fn save(&self, customer: &Customer) -> MeridianResult<Customer> {
        debug!("Saving customer: {}", customer.id);

        let id_str = customer.id.to_string();
        let address = customer.address.clone().unwrap_or_default();
        let mut tx = self.pool.inner().begin().await?;

        let existing: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM customers WHERE id = ? FOR UPDATE")
                .bind(&id_str)
                .fetch_optional(&mut *tx)
                .await?;

        if existing.is_some() {
            sqlx::query(
                r#"
                UPDATE customers
                SET company_name = ?, contact_person = ?, email = ?, phone = ?,
                    address_street = ?, address_city = ?, address_state = ?,
                    address_zip_code = ?, address_country = ?, industry = ?,
                    status = ?, updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(&customer.company_name)
            .bind(&customer.contact_person)
            .bind(&customer.email)
            .bind(&customer.phone)
            .bind(&address.street)
            .bind(&address.city)
            .bind(&address.state)
            .bind(&address.zip_code)
            .bind(&address.country)
            .bind(&customer.industry)
            .bind(customer.status.as_str())
            .bind(customer.updated_at)
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO customers (id, company_name, contact_person, email, phone,
                                       address_street, address_city, address_state,
                                       address_zip_code, address_country, industry,
                                       status, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&id_str)
            .bind(&customer.company_name)
            .bind(&customer.contact_person)
            .bind(&customer.email)
            .bind(&customer.phone)
            .bind(&address.street)
            .bind(&address.city)
            .bind(&address.state)
            .bind(&address.zip_code)
            .bind(&address.country)
            .bind(&customer.industry)
            .bind(customer.status.as_str())
            .bind(customer.created_at)
            .bind(customer.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.find_by_id(customer.id)
            .await?
            .ok_or_else(|| MeridianError::internal("Failed to fetch saved customer"))
    }

    async fn find_by_id(&self, id: CustomerId) -> MeridianResult<Option<Customer>> {
        debug!("Finding customer by id: {}", id);

        let row = sqlx::query_as::<_, CustomerRow>(&format!("{SELECT_CUSTOMERS} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Customer::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> MeridianResult<Option<Customer>> {
        debug!("Finding customer by email: {}", email);

        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "{SELECT_CUSTOMERS} WHERE LOWER(email) = LOWER(?)"
        ))
        .bind(email)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Customer::try_from).transpose()
    }

    async fn find_all(&self, page: &PageRequest) -> MeridianResult<Page<Customer>> {
        self.find_filtered(&CustomerFilter::default(), page).await
    }

    async fn find_filtered(
        &self,
        filter: &CustomerFilter,
        page: &PageRequest,
    ) -> MeridianResult<Page<Customer>> {
        debug!(?filter, page = page.page, size = page.size, "Finding customers");

        let order_by = order_by_clause(CUSTOMER_SORT_FIELDS, page, "customers")?;
        let (limit, offset) = limit_offset(page)?;
        let total = self.count_by_filter(filter).await?;

        let mut builder = QueryBuilder::<MySql>::new(SELECT_CUSTOMERS);
        push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY ")
            .push(order_by)
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = builder
            .build_query_as::<CustomerRow>()
            .fetch_all(self.pool.inner())
            .await?;

        Ok(Page::new(into_customers(rows)?, page.page, page.size, total))
    }

    async fn exists_by_email(&self, email: &str) -> MeridianResult<bool> {
        let result: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM customers WHERE LOWER(email) = LOWER(?) LIMIT 1")
                .bind(email)
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(result.is_some())
    }

    async fn exists_by_email_excluding_id(&self, email: &str, id: CustomerId) -> MeridianResult<bool> {
        let result: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM customers WHERE LOWER(email) = LOWER(?) AND id <> ? LIMIT 1",
        )
        .bind(email)
        .bind(id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(result.is_some())
    }

    async fn delete_by_id(&self, id: CustomerId) -> MeridianResult<bool> {
        debug!("Deleting customer: {}", id);

        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> MeridianResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count as u64)
    }

    async fn count_by_filter(&self, filter: &CustomerFilter) -> MeridianResult<u64> {
        let mut builder = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM customers");
        push_filter(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count as u64)
    }
}

impl std::fmt::Debug for MySqlCustomerRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlCustomerRepository").finish_non_exhaustive()
    }
}
