/*
 * Responsibility
 * - featured_companies テーブル向け SQLx 操作
 * - PgPool を受け取り list / insert / delete / logo 更新を提供
 *
 * Table (created by the bootstrap scripts):
 *   featured_companies (
 *     company_id        BIGINT PRIMARY KEY,
 *     logo              BYTEA,
 *     logo_content_type TEXT,
 *     featured_at       TIMESTAMPTZ NOT NULL DEFAULT now()
 *   )
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct FeaturedCompanyRow {
    pub company_id: i64,
    pub logo_content_type: Option<String>,
    pub featured_at: DateTime<Utc>,
}

pub async fn list(db: &PgPool) -> Result<Vec<FeaturedCompanyRow>, RepoError> {
    let rows = sqlx::query_as::<_, FeaturedCompanyRow>(
        r#"
        SELECT company_id, logo_content_type, featured_at
        FROM featured_companies
        ORDER BY featured_at DESC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn insert(db: &PgPool, company_id: i64) -> Result<FeaturedCompanyRow, RepoError> {
    let row = sqlx::query_as::<_, FeaturedCompanyRow>(
        r#"
        INSERT INTO featured_companies (company_id)
        VALUES ($1)
        RETURNING company_id, logo_content_type, featured_at
        "#,
    )
    .bind(company_id)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(db: &PgPool, company_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM featured_companies
        WHERE company_id = $1
        "#,
    )
    .bind(company_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn set_logo(
    db: &PgPool,
    company_id: i64,
    content_type: &str,
    logo: &[u8],
) -> Result<Option<FeaturedCompanyRow>, RepoError> {
    let row = sqlx::query_as::<_, FeaturedCompanyRow>(
        r#"
        UPDATE featured_companies
        SET logo = $2, logo_content_type = $3
        WHERE company_id = $1
        RETURNING company_id, logo_content_type, featured_at
        "#,
    )
    .bind(company_id)
    .bind(logo)
    .bind(content_type)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
