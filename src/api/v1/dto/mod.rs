pub mod featured_companies;
