//! Application tracking service
//!
//! Thin orchestration over [`ApplicationPort`]: input checks, stamping, and
//! logging. Status changes are unrestricted; reviewers may move an
//! application between any two statuses.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use core_kernel::{ApplicationId, HealthCheckResult};

use crate::application::{Application, ApplicationStatus};
use crate::error::ApplicationError;
use crate::ports::ApplicationPort;

/// Service for recording and reviewing loan applications
#[derive(Clone)]
pub struct ApplicationService {
    port: Arc<dyn ApplicationPort>,
}

impl ApplicationService {
    pub fn new(port: Arc<dyn ApplicationPort>) -> Self {
        Self { port }
    }

    pub async fn get_all_applications(&self) -> Result<Vec<Application>, ApplicationError> {
        Ok(self.port.find_all().await?)
    }

    pub async fn get_application_by_id(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, ApplicationError> {
        Ok(self.port.find_by_id(id).await?)
    }

    /// Applications of a user, empty when the user has none
    pub async fn get_applications_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Vec<Application>, ApplicationError> {
        Ok(self.port.find_by_user_id(user_id.trim()).await?)
    }

    pub async fn get_applications_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, ApplicationError> {
        Ok(self.port.find_by_status(status).await?)
    }

    /// Records a new pending application
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` when the user id is blank or the
    /// amount is not positive
    pub async fn create_application(
        &self,
        user_id: &str,
        amount: Decimal,
    ) -> Result<Application, ApplicationError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            warn!("Rejected application with blank user id");
            return Err(ApplicationError::validation("userId must not be blank"));
        }
        if amount <= Decimal::ZERO {
            warn!(user_id, %amount, "Rejected application with non-positive amount");
            return Err(ApplicationError::validation("amount must be positive"));
        }

        let saved = self.port.save(Application::submit(user_id, amount)).await?;
        info!(id = %saved.id, user_id, %amount, "Application created");
        Ok(saved)
    }

    /// Changes the status of an application
    ///
    /// Returns `None`, saving nothing, when the id is unknown. Notes replace
    /// the previous notes only when given.
    pub async fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        notes: Option<String>,
    ) -> Result<Option<Application>, ApplicationError> {
        let Some(mut application) = self.port.find_by_id(id).await? else {
            debug!(%id, "Status update for unknown application");
            return Ok(None);
        };

        let previous = application.status;
        application.update_status(status, notes);
        let saved = self.port.save(application).await?;
        info!(%id, from = %previous, to = %status, "Application status updated");
        Ok(Some(saved))
    }

    /// Deletes an application, returning whether it existed
    pub async fn delete_application(&self, id: ApplicationId) -> Result<bool, ApplicationError> {
        if !self.port.exists(id).await? {
            return Ok(false);
        }
        self.port.delete(id).await?;
        info!(%id, "Application deleted");
        Ok(true)
    }

    pub async fn get_application_count_by_user_id(&self, user_id: &str) -> Result<u64, ApplicationError> {
        Ok(self.port.count_by_user_id(user_id.trim()).await?)
    }

    /// Health of the underlying store
    pub async fn health(&self) -> HealthCheckResult {
        self.port.health_check().await
    }
}
