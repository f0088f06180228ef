use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use std::{error::Error as StdError, fmt};

// Errors returned by access-token verification.
#[derive(Debug)]
pub enum VerifyError {
    /// `JWT_SECRET` is not configured. Operator fault, never a client fault.
    MissingSecret,
    /// Malformed, badly signed, or expired token.
    InvalidToken(jsonwebtoken::errors::Error),
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSecret => write!(f, "token secret is not configured"),
            Self::InvalidToken(e) => write!(f, "jwt verification failed: {}", e),
        }
    }
}

impl StdError for VerifyError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidToken(e) => Some(e),
            Self::MissingSecret => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::InvalidToken(e)
    }
}

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Claims whose signature and expiry have been checked.
///
/// The payload is kept as a raw JSON object: deciding whether the claims describe
/// a valid actor is the resolver's job, so a signed token with odd claims must
/// still make it past this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedClaims(Map<String, Value>);

impl VerifiedClaims {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

impl From<Map<String, Value>> for VerifiedClaims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Shared-secret (HMAC) access-token verifier.
///
/// - HS256 / HS384 / HS512 are accepted; asymmetric algorithms and `none` are not.
/// - `aud` is not checked: no audience is configured for this service.
/// - The secret is injected once at startup and never mutated.
/// - Key material is not printable via Debug.
#[derive(Clone)]
pub struct CredentialVerifier {
    decoding_key: Option<DecodingKey>,
    validation: Validation,
}

impl fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("CredentialVerifier")
            .field("has_secret", &self.decoding_key.is_some())
            .field("validation", &self.validation)
            .finish()
    }
}

impl CredentialVerifier {
    /// `secret` of `None` (or blank) builds a verifier that rejects every token with
    /// `MissingSecret`, so a misconfigured deployment still serves anonymous routes.
    pub fn new(secret: Option<&str>, leeway_seconds: u64) -> Self {
        let decoding_key = secret
            .filter(|s| !s.trim().is_empty())
            .map(|s| DecodingKey::from_secret(s.as_bytes()));

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn has_secret(&self) -> bool {
        self.decoding_key.is_some()
    }

    /// Verify signature + `exp` and return the raw claims.
    ///
    /// `jsonwebtoken::Validation` checks:
    /// - signature (HMAC family only; the header `alg` must be one of them)
    /// - `exp` is present and not in the past (with leeway)
    pub fn verify(&self, token: &str) -> Result<VerifiedClaims, VerifyError> {
        let key = self.decoding_key.as_ref().ok_or(VerifyError::MissingSecret)?;

        let data = jsonwebtoken::decode::<Map<String, Value>>(token, key, &self.validation)?;

        Ok(VerifiedClaims(data.claims))
    }
}
