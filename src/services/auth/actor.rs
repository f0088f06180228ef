/*
 * Responsibility
 * - 検証済み claims → Actor (型付きの認証主体) への変換
 * - user_id / type の存在と type の値域をチェックする (I/O なし、副作用なし)
 * - company_id / candidate_id は基本そのまま通す (LinkagePolicy::Strict の時だけ整合性を見る)
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

use super::access_jwt::VerifiedClaims;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Admin,
    Company,
    Candidate,
}

impl ActorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Company => "company",
            Self::Candidate => "candidate",
        }
    }
}

impl fmt::Display for ActorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorType {
    type Err = InvalidClaims;

    // Exact match only: "Admin" is not an admin.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "company" => Ok(Self::Company),
            "candidate" => Ok(Self::Candidate),
            _ => Err(InvalidClaims::UnknownType),
        }
    }
}

/// The authenticated principal of a single request.
///
/// Built fresh from verified claims, inserted into request extensions by the
/// access middleware and dropped with the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub user_id: u64,
    #[serde(rename = "type")]
    pub kind: ActorType,
    pub company_id: Option<i64>,
    pub candidate_id: Option<i64>,
}

impl Actor {
    pub fn is(&self, kind: ActorType) -> bool {
        self.kind == kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidClaims {
    MissingUserId,
    InvalidUserId,
    MissingType,
    UnknownType,
    InvalidLinkedId(&'static str),
    MissingLinkedId(&'static str),
}

impl fmt::Display for InvalidClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUserId => write!(f, "missing 'user_id' claim"),
            Self::InvalidUserId => write!(f, "'user_id' must be a positive integer"),
            Self::MissingType => write!(f, "missing 'type' claim"),
            Self::UnknownType => write!(f, "unknown 'type' claim"),
            Self::InvalidLinkedId(name) => write!(f, "'{}' must be an integer", name),
            Self::MissingLinkedId(name) => write!(f, "missing '{}' claim", name),
        }
    }
}

impl std::error::Error for InvalidClaims {}

/// How strictly `company_id` / `candidate_id` are checked against `type`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkagePolicy {
    /// Linked ids pass through as-is; only `user_id` and `type` are enforced.
    #[default]
    Lenient,
    /// `company` actors need `company_id`, `candidate` actors need `candidate_id`.
    Strict,
}

/// Map verified claims onto an `Actor`.
pub fn resolve(claims: &VerifiedClaims, policy: LinkagePolicy) -> Result<Actor, InvalidClaims> {
    let user_id = match claims.get("user_id") {
        None | Some(Value::Null) => return Err(InvalidClaims::MissingUserId),
        Some(v) => v
            .as_u64()
            .filter(|id| *id > 0)
            .ok_or(InvalidClaims::InvalidUserId)?,
    };

    let kind = match claims.get("type") {
        None | Some(Value::Null) => return Err(InvalidClaims::MissingType),
        Some(Value::String(s)) => s.parse::<ActorType>()?,
        Some(_) => return Err(InvalidClaims::UnknownType),
    };

    let company_id = linked_id(claims, "company_id")?;
    let candidate_id = linked_id(claims, "candidate_id")?;

    if policy == LinkagePolicy::Strict {
        match kind {
            ActorType::Company if company_id.is_none() => {
                return Err(InvalidClaims::MissingLinkedId("company_id"));
            }
            ActorType::Candidate if candidate_id.is_none() => {
                return Err(InvalidClaims::MissingLinkedId("candidate_id"));
            }
            _ => {}
        }
    }

    Ok(Actor {
        user_id,
        kind,
        company_id,
        candidate_id,
    })
}

// Absent and null are both "not linked".
fn linked_id(claims: &VerifiedClaims, name: &'static str) -> Result<Option<i64>, InvalidClaims> {
    match claims.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_i64()
            .map(Some)
            .ok_or(InvalidClaims::InvalidLinkedId(name)),
    }
}
