//! MySQL user repository implementation.

use super::limit_offset;
use crate::sort::{order_by_clause, USER_SORT_FIELDS};
use crate::traits::{UserFilter, UserRepository};
use crate::DatabasePoolInterface;
use meridian_core::{MeridianError, MeridianResult, Page, PageRequest, UserId};
use meridian_domain::{User, UserRole};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const SELECT_USERS: &str = "SELECT id, username, email, first_name, last_name, password_hash, \
     role, is_active, created_at, updated_at FROM users";

/// MySQL user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct MySqlUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String, // CHAR(36)
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    password_hash: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = MeridianError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| MeridianError::Internal(format!("Invalid UUID in database: {e}")))?;
        let role = row
            .role
            .parse::<UserRole>()
            .map_err(|_| MeridianError::Internal(format!("Invalid role in database: {}", row.role)))?;

        Ok(User {
            id: UserId::from_uuid(id),
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            password_hash: row.password_hash,
            role,
            active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &UserFilter) {
    let mut separator = " WHERE ";
    if let Some(role) = filter.role {
        builder.push(separator).push("role = ").push_bind(role.as_str());
        separator = " AND ";
    }
    if let Some(active) = filter.active {
        builder.push(separator).push("is_active = ").push_bind(active);
    }
}

fn into_users(rows: Vec<UserRow>) -> MeridianResult<Vec<User>> {
    rows.into_iter().map(User::try_from).collect()
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn save(&self, user: &User) -> MeridianResult<User> {
        debug!("Saving user: {}", user.id);

        let id_str = user.id.to_string();
        let mut tx = self.pool.inner().begin().await?;

        // Lock the row so a concurrent save of the same user waits for us
        let existing: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = ? FOR UPDATE")
            .bind(&id_str)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_some() {
            sqlx::query(
                r#"
                UPDATE users
                SET username = ?, email = ?, first_name = ?, last_name = ?,
                    password_hash = ?, role = ?, is_active = ?, updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.active)
            .bind(user.updated_at)
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO users (id, username, email, first_name, last_name,
                                   password_hash, role, is_active, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&id_str)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.active)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        // MySQL doesn't support RETURNING, so read back what was stored
        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| MeridianError::internal("Failed to fetch saved user"))
    }

    async fn find_by_id(&self, id: UserId) -> MeridianResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USERS} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> MeridianResult<Option<User>> {
        debug!("Finding user by username: {}", username);

        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USERS} WHERE username = ?"))
            .bind(username)
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> MeridianResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "{SELECT_USERS} WHERE LOWER(email) = LOWER(?)"
        ))
        .bind(email)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_all(&self, page: &PageRequest) -> MeridianResult<Page<User>> {
        self.find_filtered(&UserFilter::default(), page).await
    }

    async fn find_filtered(&self, filter: &UserFilter, page: &PageRequest) -> MeridianResult<Page<User>> {
        debug!(?filter, page = page.page, size = page.size, "Finding users");

        let order_by = order_by_clause(USER_SORT_FIELDS, page, "users")?;
        let (limit, offset) = limit_offset(page)?;
        let total = self.count_by_filter(filter).await?;

        let mut builder = QueryBuilder::<MySql>::new(SELECT_USERS);
        push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY ")
            .push(order_by)
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = builder
            .build_query_as::<UserRow>()
            .fetch_all(self.pool.inner())
            .await?;

        Ok(Page::new(into_users(rows)?, page.page, page.size, total))
    }

    async fn exists_by_username(&self, username: &str) -> MeridianResult<bool> {
        let result: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE username = ? LIMIT 1")
            .bind(username)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn exists_by_email(&self, email: &str) -> MeridianResult<bool> {
        let result: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM users WHERE LOWER(email) = LOWER(?) LIMIT 1")
                .bind(email)
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(result.is_some())
    }

    async fn exists_by_email_excluding_id(&self, email: &str, id: UserId) -> MeridianResult<bool> {
        let result: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM users WHERE LOWER(email) = LOWER(?) AND id <> ? LIMIT 1",
        )
        .bind(email)
        .bind(id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(result.is_some())
    }

    async fn delete_by_id(&self, id: UserId) -> MeridianResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> MeridianResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count as u64)
    }

    async fn count_by_filter(&self, filter: &UserFilter) -> MeridianResult<u64> {
        let mut builder = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM users");
        push_filter(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count as u64)
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository").finish_non_exhaustive()
    }
}
