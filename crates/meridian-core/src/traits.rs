//! Core traits shared across layers.

use crate::{Interface, MeridianResult};
use async_trait::async_trait;

/// Trait for entities with a unique identifier.
pub trait Entity<ID> {
    /// Returns the entity's unique identifier.
    fn id(&self) -> &ID;
}

/// Trait for use cases in the application layer.
///
/// A use case performs a single action, following the Command pattern:
/// the request is a command object and the response is the outcome.
#[async_trait]
pub trait UseCase<Request, Response>: Send + Sync
where
    Request: Send,
    Response: Send,
{
    /// Executes the use case.
    async fn execute(&self, request: Request) -> MeridianResult<Response>;
}

/// Trait for health checks.
#[async_trait]
pub trait HealthCheck: Interface + Send + Sync {
    /// Returns the name of this health check.
    fn name(&self) -> &str;

    /// Performs the health check.
    async fn check(&self) -> HealthStatus;
}

/// Health check status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// The component is healthy.
    Healthy,
    /// The component is degraded but functional.
    Degraded(String),
    /// The component is unhealthy.
    Unhealthy(String),
}

impl HealthStatus {
    /// Returns true if the status is healthy.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Returns true if the status is unhealthy.
    #[must_use]
    pub const fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy(_))
    }
}
