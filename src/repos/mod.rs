pub mod error;
pub mod featured_company_repo;
