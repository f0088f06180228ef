pub mod access_jwt;
pub mod actor;
pub mod factory;
pub mod service;

pub use access_jwt::{CredentialVerifier, VerifiedClaims, VerifyError};
pub use actor::{Actor, ActorType, InvalidClaims, LinkagePolicy};
pub use factory::build_auth_service;
pub use service::AuthService;
