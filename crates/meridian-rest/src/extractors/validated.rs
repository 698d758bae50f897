//! Validated JSON extractor for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes the body and runs the `validator` rules on
//! it. Both malformed JSON and rule violations are answered with 400 and a
//! `VALIDATION_ERROR` body; rule violations list every offending field.

use crate::responses::ApiResponse;
use meridian_core::{field_errors, ErrorResponse};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::{Validate, ValidationErrors};

/// JSON extractor that validates the deserialized value.
///
/// ```ignore
/// async fn create_user(ValidatedJson(request): ValidatedJson<CreateUserRequest>) {
///     // request satisfies every rule declared on CreateUserRequest
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection type for validated JSON extraction.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// JSON parsing/deserialization error.
    JsonError(JsonRejection),
    /// Validation error with field-level details.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let error_response = match self {
            Self::JsonError(rejection) => ErrorResponse {
                code: "VALIDATION_ERROR".to_string(),
                message: format!("Malformed request body: {}", rejection.body_text()),
                details: None,
                trace_id: None,
            },
            Self::ValidationError(errors) => ErrorResponse {
                code: "VALIDATION_ERROR".to_string(),
                message: "Request validation failed".to_string(),
                details: Some(field_errors(&errors)),
                trace_id: None,
            },
        };
        debug!(message = %error_response.message, "Rejected request body");

        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(error_response)),
        )
            .into_response()
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_service::{AddressDto, CreateCustomerRequest, CreateUserRequest};

    fn user_request() -> CreateUserRequest {
        CreateUserRequest {
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            password: "password123".to_string(),
            role: None,
        }
    }

    #[test]
    fn test_single_field_error() {
        let mut request = user_request();
        request.password = "short".to_string();

        let errors = field_errors(&request.validate().unwrap_err());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "password");
        assert_eq!(errors[0].message, "Password must be 8-128 characters");
    }

    #[test]
    fn test_multiple_field_errors_are_sorted() {
        let mut request = user_request();
        request.username = "x".to_string();
        request.email = "invalid".to_string();

        let errors = field_errors(&request.validate().unwrap_err());
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "username"]);
    }

    #[test]
    fn test_nested_address_errors_are_prefixed() {
        let request = CreateCustomerRequest {
            company_name: "ACME".to_string(),
            contact_person: "John".to_string(),
            email: "john@acme.com".to_string(),
            phone: None,
            address: Some(AddressDto {
                country: Some("x".repeat(101)),
                ..AddressDto::default()
            }),
            industry: None,
            status: None,
        };

        let errors = field_errors(&request.validate().unwrap_err());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "address.country");
    }
}
