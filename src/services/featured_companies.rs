/*
 * Responsibility
 * - featured companies の業務ロジックへの窓口 (handler はこの trait だけを見る)
 * - 本番は Postgres (featured_company_repo) を使う実装
 * - テストでは InMemory 実装に差し替える
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::repos::{error::RepoError, featured_company_repo};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturedCompany {
    pub company_id: i64,
    pub logo_content_type: Option<String>,
    pub featured_at: DateTime<Utc>,
}

impl From<featured_company_repo::FeaturedCompanyRow> for FeaturedCompany {
    fn from(row: featured_company_repo::FeaturedCompanyRow) -> Self {
        Self {
            company_id: row.company_id,
            logo_content_type: row.logo_content_type,
            featured_at: row.featured_at,
        }
    }
}

#[async_trait]
pub trait FeaturedCompanyStore: Send + Sync {
    async fn list(&self) -> Result<Vec<FeaturedCompany>, RepoError>;

    /// `RepoError::Conflict` when the company is already featured.
    async fn add(&self, company_id: i64) -> Result<FeaturedCompany, RepoError>;

    /// `false` when the company was not featured.
    async fn remove(&self, company_id: i64) -> Result<bool, RepoError>;

    /// `None` when the company is not featured.
    async fn set_logo(
        &self,
        company_id: i64,
        content_type: &str,
        logo: &[u8],
    ) -> Result<Option<FeaturedCompany>, RepoError>;
}

#[derive(Debug, Clone)]
pub struct PgFeaturedCompanyStore {
    db: PgPool,
}

impl PgFeaturedCompanyStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeaturedCompanyStore for PgFeaturedCompanyStore {
    async fn list(&self) -> Result<Vec<FeaturedCompany>, RepoError> {
        let rows = featured_company_repo::list(&self.db).await?;
        Ok(rows.into_iter().map(FeaturedCompany::from).collect())
    }

    async fn add(&self, company_id: i64) -> Result<FeaturedCompany, RepoError> {
        featured_company_repo::insert(&self.db, company_id)
            .await
            .map(FeaturedCompany::from)
    }

    async fn remove(&self, company_id: i64) -> Result<bool, RepoError> {
        featured_company_repo::delete(&self.db, company_id).await
    }

    async fn set_logo(
        &self,
        company_id: i64,
        content_type: &str,
        logo: &[u8],
    ) -> Result<Option<FeaturedCompany>, RepoError> {
        let row = featured_company_repo::set_logo(&self.db, company_id, content_type, logo).await?;
        Ok(row.map(FeaturedCompany::from))
    }
}
