//! Application Persistence Port
//!
//! [`ApplicationPort`] is everything the application service needs from a
//! store. Adapters:
//!
//! - [`InMemoryApplicationPort`]: process-local map, used when no database is
//!   configured and in tests
//! - `PostgresApplicationAdapter` (infra_db): the `loan_applications` table
//!
//! Listings from every adapter are ordered by `created_at`, then id.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{ApplicationId, DomainPort, HealthCheckResult, HealthCheckable, PortError};

use crate::application::{Application, ApplicationStatus};

/// Storage operations for loan applications
#[async_trait]
pub trait ApplicationPort: DomainPort + HealthCheckable {
    /// All applications
    async fn find_all(&self) -> Result<Vec<Application>, PortError>;

    /// An application by id, `None` when absent
    async fn find_by_id(&self, id: ApplicationId) -> Result<Option<Application>, PortError>;

    /// Applications submitted by a user
    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Application>, PortError>;

    /// Applications currently in `status`
    async fn find_by_status(&self, status: ApplicationStatus) -> Result<Vec<Application>, PortError>;

    /// Inserts or replaces an application, returning what was stored
    async fn save(&self, application: Application) -> Result<Application, PortError>;

    async fn exists(&self, id: ApplicationId) -> Result<bool, PortError>;

    /// Removes an application; removing an absent id is not an error
    async fn delete(&self, id: ApplicationId) -> Result<(), PortError>;

    async fn count_by_user_id(&self, user_id: &str) -> Result<u64, PortError>;
}

/// In-memory implementation of ApplicationPort
#[derive(Debug, Default, Clone)]
pub struct InMemoryApplicationPort {
    applications: Arc<RwLock<HashMap<ApplicationId, Application>>>,
}

impl InMemoryApplicationPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store
    pub async fn with_applications(applications: Vec<Application>) -> Self {
        let port = Self::new();
        {
            let mut store = port.applications.write().await;
            for application in applications {
                store.insert(application.id, application);
            }
        }
        port
    }

    async fn select<F>(&self, predicate: F) -> Vec<Application>
    where
        F: Fn(&Application) -> bool + Send,
    {
        let store = self.applications.read().await;
        let mut results: Vec<Application> = store.values().filter(|a| predicate(*a)).cloned().collect();
        results.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        results
    }
}

impl DomainPort for InMemoryApplicationPort {}

#[async_trait]
impl HealthCheckable for InMemoryApplicationPort {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("in-memory-application-port", 0)
    }
}

#[async_trait]
impl ApplicationPort for InMemoryApplicationPort {
    async fn find_all(&self) -> Result<Vec<Application>, PortError> {
        Ok(self.select(|_| true).await)
    }

    async fn find_by_id(&self, id: ApplicationId) -> Result<Option<Application>, PortError> {
        Ok(self.applications.read().await.get(&id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Application>, PortError> {
        Ok(self.select(|a| a.user_id == user_id).await)
    }

    async fn find_by_status(&self, status: ApplicationStatus) -> Result<Vec<Application>, PortError> {
        Ok(self.select(|a| a.status == status).await)
    }

    async fn save(&self, application: Application) -> Result<Application, PortError> {
        self.applications
            .write()
            .await
            .insert(application.id, application.clone());
        Ok(application)
    }

    async fn exists(&self, id: ApplicationId) -> Result<bool, PortError> {
        Ok(self.applications.read().await.contains_key(&id))
    }

    async fn delete(&self, id: ApplicationId) -> Result<(), PortError> {
        self.applications.write().await.remove(&id);
        Ok(())
    }

    async fn count_by_user_id(&self, user_id: &str) -> Result<u64, PortError> {
        let store = self.applications.read().await;
        Ok(store.values().filter(|a| a.user_id == user_id).count() as u64)
    }
}
