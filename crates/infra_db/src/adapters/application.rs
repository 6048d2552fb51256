//! PostgreSQL Application Adapter
//!
//! Implements `ApplicationPort` over [`ApplicationRepository`], translating
//! rows to domain values and database errors to port errors.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_application::{ApplicationPort, ApplicationService};
//! use infra_db::adapters::PostgresApplicationAdapter;
//!
//! let port: Arc<dyn ApplicationPort> = Arc::new(PostgresApplicationAdapter::new(pool));
//! let service = ApplicationService::new(port);
//! ```

use std::time::Instant;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{ApplicationId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_application::{Application, ApplicationPort, ApplicationStatus};

use crate::repositories::application::{ApplicationRepository, ApplicationRow};

const ADAPTER_ID: &str = "postgres-application-adapter";

/// PostgreSQL-backed implementation of ApplicationPort
#[derive(Debug, Clone)]
pub struct PostgresApplicationAdapter {
    repository: ApplicationRepository,
}

impl PostgresApplicationAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ApplicationRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresApplicationAdapter {}

#[async_trait]
impl HealthCheckable for PostgresApplicationAdapter {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms),
            Err(e) => HealthCheckResult::unhealthy(ADAPTER_ID, latency_ms, format!("Database error: {e}")),
        }
    }
}

#[async_trait]
impl ApplicationPort for PostgresApplicationAdapter {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Application>, PortError> {
        let rows = self.repository.find_all().await?;
        debug!(count = rows.len(), "Fetched applications");
        rows_to_applications(rows)
    }

    #[instrument(skip(self), fields(application_id = %id))]
    async fn find_by_id(&self, id: ApplicationId) -> Result<Option<Application>, PortError> {
        let row = self.repository.find_by_id(*id.as_uuid()).await?;
        row.map(row_to_application).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Application>, PortError> {
        rows_to_applications(self.repository.find_by_user_id(user_id).await?)
    }

    #[instrument(skip(self), fields(status = %status))]
    async fn find_by_status(&self, status: ApplicationStatus) -> Result<Vec<Application>, PortError> {
        rows_to_applications(self.repository.find_by_status(status.as_str()).await?)
    }

    #[instrument(skip(self, application), fields(application_id = %application.id))]
    async fn save(&self, application: Application) -> Result<Application, PortError> {
        let saved = self.repository.upsert(&ApplicationRow::from(&application)).await?;
        row_to_application(saved)
    }

    async fn exists(&self, id: ApplicationId) -> Result<bool, PortError> {
        Ok(self.repository.exists(*id.as_uuid()).await?)
    }

    #[instrument(skip(self), fields(application_id = %id))]
    async fn delete(&self, id: ApplicationId) -> Result<(), PortError> {
        let removed = self.repository.delete(*id.as_uuid()).await?;
        debug!(removed, "Deleted application rows");
        Ok(())
    }

    async fn count_by_user_id(&self, user_id: &str) -> Result<u64, PortError> {
        let count = self.repository.count_by_user_id(user_id).await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

fn row_to_application(row: ApplicationRow) -> Result<Application, PortError> {
    Application::try_from(row).map_err(PortError::from)
}

fn rows_to_applications(rows: Vec<ApplicationRow>) -> Result<Vec<Application>, PortError> {
    rows.into_iter().map(row_to_application).collect()
}
