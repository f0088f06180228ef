pub mod featured_companies;
pub mod health;
