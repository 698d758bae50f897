//! User management controller.

use crate::{
    extractors::{PaginationQuery, ValidatedJson},
    responses::{created, no_content, ok, ApiResult, AppError},
    state::AppState,
};
use meridian_core::{MeridianError, UseCase, UserId};
use meridian_domain::UserRole;
use meridian_repository::UserFilter;
use meridian_service::{
    ChangePasswordCommand, ChangePasswordRequest, CreateUserRequest, DeleteUserCommand,
    UpdateUserCommand, UpdateUserRequest, UserPageResponse, UserResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::{get, put},
    Router,
};
use axum_extra::extract::Query;
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

/// Filters accepted by the user list endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Only users with this role.
    pub role: Option<UserRole>,
    /// Only active (`true`) or inactive (`false`) users.
    pub is_active: Option<bool>,
}

impl From<UserListQuery> for UserFilter {
    fn from(query: UserListQuery) -> Self {
        Self {
            role: query.role,
            active: query.is_active,
        }
    }
}

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/username/:username", get(get_user_by_username))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/password", put(change_password))
}

/// List users, optionally filtered by role and active flag.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(
        ("page" = Option<usize>, Query, description = "Zero-based page index"),
        ("size" = Option<usize>, Query, description = "Page size, at most 100"),
        ("sort" = Option<Vec<String>>, Query, description = "Sort key as property[,asc|desc]; may repeat"),
        UserListQuery
    ),
    responses(
        (status = 200, description = "A page of users", body = UserPageResponse),
        (status = 400, description = "Invalid paging or sort parameters")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
    Query(query): Query<UserListQuery>,
) -> ApiResult<UserPageResponse> {
    debug!(?query, "List users request");

    let page_request = pagination.into_page_request()?;
    let filter = UserFilter::from(query);
    let page = if filter.is_empty() {
        state.user_service.get_all_users(&page_request).await?
    } else {
        state.user_service.find_users(&filter, &page_request).await?
    };

    ok(UserPageResponse::from(page))
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request body"),
        (status = 409, description = "Username or email already in use")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<Response, AppError> {
    debug!(username = %request.username, "Create user request");

    let user = state.create_user.execute(request.into()).await?;
    let location = format!("/api/v1/users/{}", user.id);
    Ok(created(&location, UserResponse::from(user)))
}

/// Get a user by id.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No such user")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    let user_id = parse_user_id(&id)?;
    let user = state.user_service.get_user_by_id(user_id).await?;
    ok(UserResponse::from(user))
}

/// Get a user by username.
#[utoipa::path(
    get,
    path = "/users/username/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Exact, case-sensitive username")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "No such user")
    )
)]
pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<UserResponse> {
    let user = state.user_service.get_user_by_username(&username).await?;
    ok(UserResponse::from(user))
}

/// Apply a partial update to a user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "The updated user", body = UserResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "No such user"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    let user_id = parse_user_id(&id)?;
    debug!(%user_id, "Update user request");

    let user = state
        .update_user
        .execute(UpdateUserCommand {
            id: user_id,
            changes: request.into(),
        })
        .await?;
    ok(UserResponse::from(user))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "No such user")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let user_id = parse_user_id(&id)?;
    debug!(%user_id, "Delete user request");

    state.delete_user.execute(DeleteUserCommand { id: user_id }).await?;
    Ok(no_content())
}

/// Replace a user's password.
#[utoipa::path(
    put,
    path = "/users/{id}/password",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Password does not meet the rules"),
        (status = 404, description = "No such user")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    let user_id = parse_user_id(&id)?;
    debug!(%user_id, "Change password request");

    state
        .change_password
        .execute(ChangePasswordCommand {
            id: user_id,
            new_password: request.new_password,
        })
        .await?;
    Ok(no_content())
}

fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id)
        .map_err(|_| AppError(MeridianError::validation(format!("Invalid user id: {id}"))))
}
