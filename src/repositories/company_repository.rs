use chrono::Utc;
use sqlx::PgPool;

use super::CompanyStore;
use crate::models::company::{Company, CompanyPayload};
use crate::utils::errors::{conflict_error, AppError, AppResult};

const COMPANY_COLUMNS: &str = "id, cr_number, company_name_en, company_name_ar, phone_number, \
     license_start_date, classification, created_at, updated_at";

pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Traducir una violación del índice único a Conflict
fn map_write_error(e: sqlx::Error, cr_number: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => conflict_error(cr_number),
        _ => AppError::Database(e),
    }
}

#[async_trait::async_trait]
impl CompanyStore for CompanyRepository {
    async fn find_by_cr(&self, cr_number: &str) -> AppResult<Option<Company>> {
        let result = sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM companies WHERE cr_number = $1",
            COMPANY_COLUMNS
        ))
        .bind(cr_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Company>> {
        let result = sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM companies WHERE id = $1",
            COMPANY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    async fn exists_by_cr(&self, cr_number: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM companies WHERE cr_number = $1)")
                .bind(cr_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    async fn insert(&self, payload: &CompanyPayload) -> AppResult<Company> {
        let now = Utc::now();

        let result = sqlx::query_as::<_, Company>(&format!(
            r#"
            INSERT INTO companies (
                cr_number, company_name_en, company_name_ar, phone_number,
                license_start_date, classification, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        ))
        .bind(&payload.cr_number)
        .bind(&payload.company_name_en)
        .bind(&payload.company_name_ar)
        .bind(&payload.phone_number)
        .bind(payload.license_start_date)
        .bind(&payload.classification)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &payload.cr_number))?;

        Ok(result)
    }

    async fn update(&self, id: i32, payload: &CompanyPayload) -> AppResult<Option<Company>> {
        let result = sqlx::query_as::<_, Company>(&format!(
            r#"
            UPDATE companies
            SET cr_number = $2, company_name_en = $3, company_name_ar = $4,
                phone_number = $5, license_start_date = $6, classification = $7,
                updated_at = $8
            WHERE id = $1
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        ))
        .bind(id)
        .bind(&payload.cr_number)
        .bind(&payload.company_name_en)
        .bind(&payload.company_name_ar)
        .bind(&payload.phone_number)
        .bind(payload.license_start_date)
        .bind(&payload.classification)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &payload.cr_number))?;

        Ok(result)
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<Vec<Company>> {
        let result = sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM companies ORDER BY company_name_en ASC, id ASC OFFSET $1 LIMIT $2",
            COMPANY_COLUMNS
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }
}
