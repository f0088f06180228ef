/*
 * Responsibility
 * - Featured companies の request/response DTO
 * - validation (形式チェック) 用の validate()
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::featured_companies::FeaturedCompany;

#[derive(Debug, Deserialize)]
pub struct AddFeaturedCompanyRequest {
    pub company_id: i64,
}

impl AddFeaturedCompanyRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.company_id <= 0 {
            return Err("company_id must be a positive integer");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct FeaturedCompanyResponse {
    pub company_id: i64,
    pub has_logo: bool,
    pub logo_content_type: Option<String>,
    pub featured_at: DateTime<Utc>,
}

impl From<FeaturedCompany> for FeaturedCompanyResponse {
    fn from(c: FeaturedCompany) -> Self {
        Self {
            company_id: c.company_id,
            has_logo: c.logo_content_type.is_some(),
            logo_content_type: c.logo_content_type,
            featured_at: c.featured_at,
        }
    }
}
