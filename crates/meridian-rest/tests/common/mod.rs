//! Shared harness for router tests: in-memory services behind the real router.

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use meridian_config::ServerConfig;
use meridian_core::FixedClock;
use meridian_repository::{InMemoryCustomerRepository, InMemoryUserRepository};
use meridian_rest::{build_router, AppState};
use meridian_security::PasswordHasher;
use meridian_service::{CustomerServiceImpl, UserServiceImpl};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let clock = Arc::new(FixedClock::at(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        ));
        let users = Arc::new(UserServiceImpl::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(PasswordHasher::with_cost(1)),
            clock.clone(),
        ));
        let customers = Arc::new(CustomerServiceImpl::new(
            Arc::new(InMemoryCustomerRepository::new()),
            clock,
        ));

        Self {
            router: build_router(AppState::new(users, customers), &ServerConfig::default()),
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }
}
