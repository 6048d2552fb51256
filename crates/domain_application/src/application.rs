//! Loan application entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ApplicationId;
use crate::error::ApplicationError;

/// Review status of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    /// Submitted, not yet looked at
    Pending,
    UnderReview,
    Approved,
    Rejected,
    /// Withdrawn by the applicant
    Cancelled,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Pending,
        ApplicationStatus::UnderReview,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
        ApplicationStatus::Cancelled,
    ];

    /// Wire and storage form, e.g. `UNDER_REVIEW`
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::UnderReview => "UNDER_REVIEW",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ApplicationError;

    /// Parses a status ignoring case, accepting `-` or `_` as separator
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ApplicationError::UnknownStatus(s.to_string()))
    }
}

/// A loan application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    /// Identifier of the applicant in the calling platform
    pub user_id: String,
    /// Requested amount
    pub amount: Decimal,
    pub status: ApplicationStatus,
    /// Reviewer notes
    pub notes: Option<String>,
    pub application_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Creates a pending application stamped with the current time
    pub fn submit(user_id: impl Into<String>, amount: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: ApplicationId::new(),
            user_id: user_id.into(),
            amount,
            status: ApplicationStatus::Pending,
            notes: None,
            application_date: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves to `status`; any status may follow any other
    pub fn update_status(&mut self, status: ApplicationStatus, notes: Option<String>) {
        self.status = status;
        if notes.is_some() {
            self.notes = notes;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_submit_starts_pending() {
        let app = Application::submit("user123", dec!(5000000));
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert_eq!(app.created_at, app.updated_at);
        assert_eq!(app.application_date, app.created_at);
        assert!(app.notes.is_none());
    }

    #[test]
    fn test_update_status_keeps_notes_when_none_given() {
        let mut app = Application::submit("user123", dec!(5000000));
        app.update_status(ApplicationStatus::UnderReview, Some("Docs received".to_string()));
        app.update_status(ApplicationStatus::Approved, None);

        assert_eq!(app.status, ApplicationStatus::Approved);
        assert_eq!(app.notes.as_deref(), Some("Docs received"));
        assert!(app.updated_at >= app.created_at);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("pending".parse::<ApplicationStatus>().unwrap(), ApplicationStatus::Pending);
        assert_eq!("under-review".parse::<ApplicationStatus>().unwrap(), ApplicationStatus::UnderReview);
        assert_eq!(" APPROVED ".parse::<ApplicationStatus>().unwrap(), ApplicationStatus::Approved);
        assert!(matches!(
            "ARCHIVED".parse::<ApplicationStatus>(),
            Err(ApplicationError::UnknownStatus(_))
        ));
    }

    #[test]
    fn test_status_wire_form() {
        let json = serde_json::to_string(&ApplicationStatus::UnderReview).unwrap();
        assert_eq!(json, "\"UNDER_REVIEW\"");
        for status in ApplicationStatus::ALL {
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn test_application_uses_camel_case_keys() {
        let value = serde_json::to_value(Application::submit("u1", dec!(1000.50))).unwrap();
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["status"], "PENDING");
        assert!(value.get("applicationDate").is_some());
        assert!(value.get("createdAt").is_some());
    }
}
