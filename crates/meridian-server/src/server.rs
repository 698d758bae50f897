//! Assembles the application for the configured backend and serves it.

use crate::di::{build_in_memory_module, build_mysql_module, DatabaseResolver};
use meridian_config::{AppConfig, StorageBackend};
use meridian_core::{MeridianError, MeridianResult};
use meridian_repository::{DatabaseHealthCheck, DatabasePoolInterface};
use meridian_rest::{build_router, AppState};
use axum::Router;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

/// A router ready to serve, plus what must be released on shutdown.
pub struct Application {
    pub router: Router,
    database_pool: Option<Arc<dyn DatabasePoolInterface>>,
}

impl Application {
    /// Wires services for the configured storage backend.
    ///
    /// The MySQL backend connects the pool, applies migrations when
    /// `database.run_migrations` is set, and registers a readiness check.
    pub async fn build(config: &AppConfig) -> MeridianResult<Self> {
        match config.database.backend {
            StorageBackend::Mysql => {
                let module = build_mysql_module(&config.database, &config.security).await?;
                let pool = module.database_pool();
                if config.database.run_migrations {
                    pool.run_migrations().await?;
                }

                let state = AppState::from_module(module.as_ref())
                    .with_health_check(Arc::new(DatabaseHealthCheck::new(pool.clone())));
                Ok(Self {
                    router: build_router(state, &config.server),
                    database_pool: Some(pool),
                })
            }
            StorageBackend::Memory => {
                warn!("Using in-memory storage; all data is lost on shutdown");
                let module = build_in_memory_module(&config.security);
                let state = AppState::from_module(module.as_ref());
                Ok(Self {
                    router: build_router(state, &config.server),
                    database_pool: None,
                })
            }
        }
    }

    /// Serves until Ctrl+C or SIGTERM, then drains in-flight requests.
    pub async fn serve(self, config: &AppConfig) -> MeridianResult<()> {
        let addr = config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| MeridianError::Internal(format!("Failed to bind {addr}: {e}")))?;
        info!("Starting REST server on http://{}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| MeridianError::Internal(format!("REST server error: {e}")))?;

        if let Some(pool) = self.database_pool {
            pool.close().await;
        }
        info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
