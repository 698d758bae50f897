//! Customer-related DTOs.

use meridian_core::CustomerId;
use meridian_domain::{Address, Customer, CustomerStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Postal address. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    #[validate(length(max = 255, message = "Street cannot exceed 255 characters"))]
    pub street: Option<String>,
    #[validate(length(max = 100, message = "City cannot exceed 100 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 100, message = "State cannot exceed 100 characters"))]
    pub state: Option<String>,
    #[validate(length(max = 20, message = "Zip code cannot exceed 20 characters"))]
    pub zip_code: Option<String>,
    #[validate(length(max = 100, message = "Country cannot exceed 100 characters"))]
    pub country: Option<String>,
}

impl From<AddressDto> for Address {
    fn from(dto: AddressDto) -> Self {
        Self {
            street: dto.street,
            city: dto.city,
            state: dto.state,
            zip_code: dto.zip_code,
            country: dto.country,
        }
    }
}

impl From<Address> for AddressDto {
    fn from(address: Address) -> Self {
        Self {
            street: address.street,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            country: address.country,
        }
    }
}

/// Request to create a customer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[validate(
        length(min = 1, max = 255, message = "Company name must be 1-255 characters"),
        custom(function = "meridian_core::rules::not_blank")
    )]
    pub company_name: String,

    #[validate(
        length(min = 1, max = 255, message = "Contact person must be 1-255 characters"),
        custom(function = "meridian_core::rules::not_blank")
    )]
    pub contact_person: String,

    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email cannot exceed 255 characters")
    )]
    pub email: String,

    #[validate(
        length(max = 20, message = "Phone cannot exceed 20 characters"),
        custom(function = "meridian_core::rules::valid_phone")
    )]
    pub phone: Option<String>,

    #[validate(nested)]
    pub address: Option<AddressDto>,

    #[validate(length(max = 100, message = "Industry cannot exceed 100 characters"))]
    pub industry: Option<String>,

    /// Defaults to `PROSPECT`.
    pub status: Option<CustomerStatus>,
}

/// Partial customer update. Omitted fields are left unchanged; a supplied
/// address replaces the stored one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[validate(
        length(min = 1, max = 255, message = "Company name must be 1-255 characters"),
        custom(function = "meridian_core::rules::not_blank")
    )]
    pub company_name: Option<String>,

    #[validate(
        length(min = 1, max = 255, message = "Contact person must be 1-255 characters"),
        custom(function = "meridian_core::rules::not_blank")
    )]
    pub contact_person: Option<String>,

    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email cannot exceed 255 characters")
    )]
    pub email: Option<String>,

    #[validate(
        length(max = 20, message = "Phone cannot exceed 20 characters"),
        custom(function = "meridian_core::rules::valid_phone")
    )]
    pub phone: Option<String>,

    #[validate(nested)]
    pub address: Option<AddressDto>,

    #[validate(length(max = 100, message = "Industry cannot exceed 100 characters"))]
    pub industry: Option<String>,

    pub status: Option<CustomerStatus>,
}

/// Customer response DTO.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: CustomerId,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<AddressDto>,
    pub industry: Option<String>,
    pub status: CustomerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            company_name: customer.company_name,
            contact_person: customer.contact_person,
            email: customer.email,
            phone: customer.phone,
            address: customer.address.map(AddressDto::from),
            industry: customer.industry,
            status: customer.status,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

/// A page of customers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPageResponse {
    pub content: Vec<CustomerResponse>,
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

    fn create_request() -> CreateCustomerRequest {
        CreateCustomerRequest {
            company_name: "ACME".to_string(),
            contact_person: "John Doe".to_string(),
            email: "john@acme.com".to_string(),
            phone: Some("+1 555 0100".to_string()),
            address: Some(AddressDto {
                city: Some("Springfield".to_string()),
                ..AddressDto::default()
            }),
            industry: None,
            status: None,
        }
    }

    #[test]
    fn test_create_customer_request_valid() {
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn test_create_customer_request_rejects_bad_phone() {
        let mut request = create_request();
        request.phone = Some("call me maybe".to_string());
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }

    #[test]
    fn test_nested_address_is_validated() {
        let mut request = create_request();
        request.address = Some(AddressDto {
            zip_code: Some("1".repeat(21)),
            ..AddressDto::default()
        });
        let errors = request.validate().unwrap_err();
        assert!(errors.errors().contains_key("address"));
    }

    #[test]
    fn test_status_deserializes_upper_case() {
        let request: UpdateCustomerRequest =
            serde_json::from_str(r#"{"status": "ACTIVE", "zipCode": "ignored"}"#).unwrap();
        assert_eq!(request.status, Some(CustomerStatus::Active));
    }

    #[test]
    fn test_customer_response_from_customer() {
        let customer = Customer::new(
            "ACME".to_string(),
            "John Doe".to_string(),
            "john@acme.com".to_string(),
            Address {
                zip_code: Some("62701".to_string()),
                ..Address::default()
            },
            Utc::now(),
        );

        let response = CustomerResponse::from(customer);
        assert_eq!(response.status, CustomerStatus::Prospect);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["address"]["zipCode"], "62701");
        assert_eq!(json["companyName"], "ACME");
    }
}
