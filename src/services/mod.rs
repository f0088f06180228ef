pub mod auth;
pub mod featured_companies;
