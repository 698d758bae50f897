//! Entity-DTO mappers.
//!
//! Entity to response conversions live next to the DTOs. This module maps
//! request DTOs onto domain inputs and pages onto page responses.

use crate::dto::{
    CreateCustomerRequest, CreateUserRequest, CustomerPageResponse, CustomerResponse,
    UpdateCustomerRequest, UpdateUserRequest, UserPageResponse, UserResponse,
};
use meridian_core::{Page, Patch};
use meridian_domain::{
    Address, Customer, CustomerChanges, NewCustomer, NewUser, User, UserChanges,
};

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
            role: request.role.unwrap_or_default(),
        }
    }
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            email: Patch::from(request.email),
            first_name: Patch::from(request.first_name),
            last_name: Patch::from(request.last_name),
            role: Patch::from(request.role),
            active: Patch::from(request.is_active),
        }
    }
}

impl From<CreateCustomerRequest> for NewCustomer {
    fn from(request: CreateCustomerRequest) -> Self {
        Self {
            company_name: request.company_name,
            contact_person: request.contact_person,
            email: request.email,
            phone: request.phone,
            address: request.address.map(Address::from).unwrap_or_default(),
            industry: request.industry,
            status: request.status,
        }
    }
}

impl From<UpdateCustomerRequest> for CustomerChanges {
    fn from(request: UpdateCustomerRequest) -> Self {
        Self {
            company_name: Patch::from(request.company_name),
            contact_person: Patch::from(request.contact_person),
            email: Patch::from(request.email),
            phone: Patch::from(request.phone),
            address: Patch::from(request.address.map(Address::from)),
            industry: Patch::from(request.industry),
            status: Patch::from(request.status),
        }
    }
}

impl From<Page<User>> for UserPageResponse {
    fn from(page: Page<User>) -> Self {
        Self {
            content: page.content.into_iter().map(UserResponse::from).collect(),
            page: page.info.page,
            size: page.info.size,
            total_elements: page.info.total_elements,
            total_pages: page.info.total_pages,
            first: page.info.first,
            last: page.info.last,
        }
    }
}

impl From<Page<Customer>> for CustomerPageResponse {
    fn from(page: Page<Customer>) -> Self {
        Self {
            content: page.content.into_iter().map(CustomerResponse::from).collect(),
            page: page.info.page,
            size: page.info.size,
            total_elements: page.info.total_elements,
            total_pages: page.info.total_pages,
            first: page.info.first,
            last: page.info.last,
        }
    }
}
