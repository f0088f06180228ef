/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: AuthService (verifier + resolver), featured: FeaturedCompanyStore, upload: UploadPolicy
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::middleware::upload::UploadPolicy;
use crate::services::{auth::AuthService, featured_companies::FeaturedCompanyStore};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub featured: Arc<dyn FeaturedCompanyStore>,
    pub upload: UploadPolicy,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        featured: Arc<dyn FeaturedCompanyStore>,
        upload: UploadPolicy,
    ) -> Self {
        Self {
            auth,
            featured,
            upload,
        }
    }
}
