use crate::services::auth::{
    Actor, CredentialVerifier, InvalidClaims, LinkagePolicy, VerifiedClaims, VerifyError, actor,
};

/// Verifier + resolver settings shared by every request (read-only after startup).
#[derive(Debug, Clone)]
pub struct AuthService {
    verifier: CredentialVerifier,
    linkage: LinkagePolicy,
}

impl AuthService {
    pub fn new(verifier: CredentialVerifier, linkage: LinkagePolicy) -> Self {
        Self { verifier, linkage }
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedClaims, VerifyError> {
        self.verifier.verify(token)
    }

    pub fn resolve(&self, claims: &VerifiedClaims) -> Result<Actor, InvalidClaims> {
        actor::resolve(claims, self.linkage)
    }

    pub fn has_secret(&self) -> bool {
        self.verifier.has_secret()
    }
}
