//! User-related DTOs.

use meridian_core::UserId;
use meridian_domain::{User, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        custom(function = "meridian_core::rules::valid_username")
    )]
    pub username: String,

    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email cannot exceed 255 characters")
    )]
    pub email: String,

    #[validate(
        length(min = 1, max = 100, message = "First name must be 1-100 characters"),
        custom(function = "meridian_core::rules::not_blank")
    )]
    pub first_name: String,

    #[validate(
        length(min = 1, max = 100, message = "Last name must be 1-100 characters"),
        custom(function = "meridian_core::rules::not_blank")
    )]
    pub last_name: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    #[schema(format = Password)]
    pub password: String,

    /// Defaults to `USER`.
    pub role: Option<UserRole>,
}

/// Partial user update. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email cannot exceed 255 characters")
    )]
    pub email: Option<String>,

    #[validate(
        length(min = 1, max = 100, message = "First name must be 1-100 characters"),
        custom(function = "meridian_core::rules::not_blank")
    )]
    pub first_name: Option<String>,

    #[validate(
        length(min = 1, max = 100, message = "Last name must be 1-100 characters"),
        custom(function = "meridian_core::rules::not_blank")
    )]
    pub last_name: Option<String>,

    pub role: Option<UserRole>,

    pub is_active: Option<bool>,
}

/// Request to change password.
#[derive(Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 8, max = 128, message = "New password must be 8-128 characters"))]
    #[schema(format = Password)]
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordRequest").finish_non_exhaustive()
    }
}

/// User response DTO. The password hash is never part of it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            full_name: user.full_name(),
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            is_active: user.active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// A page of users.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPageResponse {
    pub content: Vec<UserResponse>,
    pub page: usize,
    pub size: usize,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateUserRequest {
        CreateUserRequest {
            username: "validuser".to_string(),
            email: "valid@example.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            password: "password123".to_string(),
            role: None,
        }
    }

    #[test]
    fn test_create_user_request_valid() {
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn test_create_user_request_invalid_username() {
        let mut request = create_request();
        request.username = "ab".to_string();
        assert!(request.validate().is_err());

        request.username = "bad name!".to_string();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn test_create_user_request_invalid_email() {
        let mut request = create_request();
        request.email = "not-an-email".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_user_request_password_too_short() {
        let mut request = create_request();
        request.password = "short".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_user_request_blank_name() {
        let mut request = create_request();
        request.first_name = "   ".to_string();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
    }

    #[test]
    fn test_update_user_request_empty_is_valid() {
        assert!(UpdateUserRequest::default().validate().is_ok());
    }

    #[test]
    fn test_update_user_request_checks_present_fields() {
        let request = UpdateUserRequest {
            email: Some("broken".to_string()),
            ..UpdateUserRequest::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_requests_use_camel_case() {
        let request: UpdateUserRequest =
            serde_json::from_str(r#"{"firstName": "Jane", "isActive": false}"#).unwrap();
        assert_eq!(request.first_name.as_deref(), Some("Jane"));
        assert_eq!(request.is_active, Some(false));
    }

    #[test]
    fn test_user_response_from_user() {
        let user = User::new(
            "jdoe".to_string(),
            "jdoe@example.com".to_string(),
            "John".to_string(),
            "Doe".to_string(),
            "$argon2id$secret".to_string(),
            UserRole::Admin,
            Utc::now(),
        );

        let response = UserResponse::from(user.clone());
        assert_eq!(response.id, user.id);
        assert_eq!(response.full_name, "John Doe");
        assert!(response.is_active);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"isActive\":true"));
        assert!(json.contains("\"role\":\"ADMIN\""));
        assert!(!json.contains("argon2id"));
    }
}
