//! Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthService, CredentialVerifier, LinkagePolicy};

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    let verifier = CredentialVerifier::new(
        config.jwt_secret.as_deref(),
        config.access_token_leeway_seconds,
    );

    let linkage = if config.strict_actor_linkage {
        LinkagePolicy::Strict
    } else {
        LinkagePolicy::Lenient
    };

    if !verifier.has_secret() {
        tracing::warn!("JWT_SECRET is not set; credentialed requests will get SERVER_MISCONFIG");
    }

    Arc::new(AuthService::new(verifier, linkage))
}
