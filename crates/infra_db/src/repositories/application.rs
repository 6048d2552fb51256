//! Loan application repository

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::ApplicationId;
use domain_application::{Application, ApplicationStatus};

use crate::error::DatabaseError;

const COLUMNS: &str =
    "id, user_id, amount, status, notes, application_date, created_at, updated_at";

/// A row of `loan_applications`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub user_id: String,
    pub amount: Decimal,
    pub status: String,
    pub notes: Option<String>,
    pub application_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Application> for ApplicationRow {
    fn from(application: &Application) -> Self {
        Self {
            id: *application.id.as_uuid(),
            user_id: application.user_id.clone(),
            amount: application.amount,
            status: application.status.as_str().to_string(),
            notes: application.notes.clone(),
            application_date: application.application_date,
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

impl TryFrom<ApplicationRow> for Application {
    type Error = DatabaseError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status: ApplicationStatus = row
            .status
            .parse()
            .map_err(|_| DatabaseError::InvalidData(format!("status '{}'", row.status)))?;

        Ok(Application {
            id: ApplicationId::from_uuid(row.id),
            user_id: row.user_id,
            amount: row.amount,
            status,
            notes: row.notes,
            application_date: row.application_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Data access for the `loan_applications` table
#[derive(Debug, Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<ApplicationRow>, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM loan_applications ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ApplicationRow>, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM loan_applications WHERE id = $1");
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<ApplicationRow>, DatabaseError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM loan_applications WHERE user_id = $1 ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_status(&self, status: &str) -> Result<Vec<ApplicationRow>, DatabaseError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM loan_applications WHERE status = $1 ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Inserts the row, or overwrites the mutable columns of an existing one
    pub async fn upsert(&self, row: &ApplicationRow) -> Result<ApplicationRow, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO loan_applications ({COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                amount = EXCLUDED.amount,
                status = EXCLUDED.status,
                notes = EXCLUDED.notes,
                updated_at = EXCLUDED.updated_at
            RETURNING {COLUMNS}
            "#
        );
        let saved = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(row.id)
            .bind(&row.user_id)
            .bind(row.amount)
            .bind(&row.status)
            .bind(&row.notes)
            .bind(row.application_date)
            .bind(row.created_at)
            .bind(row.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(saved)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM loan_applications WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Returns the number of rows removed
    pub async fn delete(&self, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM loan_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count_by_user_id(&self, user_id: &str) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM loan_applications WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
