//! Validation utilities.

use crate::FieldError;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Flattens `validator::ValidationErrors` into field errors, sorted by field.
///
/// Nested structs are reported as `parent.child` and list items as
/// `parent[index].child`.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields = Vec::new();
    collect_field_errors(errors, None, &mut fields);
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

fn collect_field_errors(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|error| FieldError {
                    field: path.clone(),
                    message: error
                        .message
                        .as_ref()
                        .map_or_else(|| format!("Invalid value for '{field}'"), ToString::to_string),
                    code: error.code.to_string(),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, item) in items {
                    collect_field_errors(item, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank").with_message("must not be blank".into()));
        }
        Ok(())
    }

    /// Validates that a username uses only letters, digits, `.`, `_` or `-`.
    pub fn valid_username(username: &str) -> Result<(), ValidationError> {
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(ValidationError::new("username_invalid_characters")
                .with_message("may only contain letters, digits, '.', '_' and '-'".into()));
        }
        Ok(())
    }

    /// Validates a phone number: digits plus common separators, at least one digit.
    pub fn valid_phone(phone: &str) -> Result<(), ValidationError> {
        let allowed = phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.'));
        if !allowed || !phone.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new("phone_invalid")
                .with_message("must be a phone number".into()));
        }
        Ok(())
    }
}
