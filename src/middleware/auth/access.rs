//! Access gate: bearer token 検証 → Actor 解決 → role 判定 → Actor を extensions に入れる
//!
//! Order matters (first failure wins):
//! 1. `Authorization: Bearer <token>` を取り出す (形が違えば「credential なし」扱い)
//! 2. credential なし: `required = false` なら Actor なしで通す / `true` なら 401
//! 3. 署名 + exp 検証: secret 未設定は 500 `SERVER_MISCONFIG`、それ以外の失敗は 401
//! 4. claims → Actor: 構造が不正なら 401 "Invalid claims"
//! 5. `roles` が空でなく Actor の type が含まれなければ 403
//! 6. Actor を request extensions に格納して次へ
//!
//! Every rejection is turned into a JSON response here; nothing propagates past the layer.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::error::AppError;
use crate::services::auth::{Actor, ActorType, AuthService, VerifyError};
use crate::state::AppState;

/// Per-route access options.
///
/// `roles` empty means "any authenticated actor".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    pub required: bool,
    pub roles: Vec<ActorType>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::required()
    }
}

impl AccessPolicy {
    pub fn required() -> Self {
        Self {
            required: true,
            roles: Vec::new(),
        }
    }

    /// Anonymous requests pass through without an actor.
    pub fn optional() -> Self {
        Self {
            required: false,
            roles: Vec::new(),
        }
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = ActorType>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    pub fn allows(&self, kind: ActorType) -> bool {
        self.roles.is_empty() || self.roles.contains(&kind)
    }
}

/// Why a request was turned away. Variants are listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingCredential,
    MissingSecret,
    InvalidToken,
    InvalidClaims,
    RoleNotAllowed,
}

impl From<Rejection> for AppError {
    fn from(r: Rejection) -> Self {
        match r {
            Rejection::MissingCredential => AppError::Unauthorized("Missing credential"),
            Rejection::MissingSecret => AppError::ServerMisconfig,
            Rejection::InvalidToken => AppError::Unauthorized("Invalid or expired credential"),
            Rejection::InvalidClaims => AppError::Unauthorized("Invalid claims"),
            Rejection::RoleNotAllowed => AppError::Forbidden("Forbidden"),
        }
    }
}

/// `Authorization: Bearer <token>` → `<token>`.
///
/// Missing header, non-UTF-8 value, another scheme, or an empty token all mean
/// "no credential".
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Run the gate's guard chain against request headers.
///
/// `Ok(None)` is an admitted anonymous request.
pub fn authorize(
    auth: &AuthService,
    policy: &AccessPolicy,
    headers: &HeaderMap,
) -> Result<Option<Actor>, Rejection> {
    let Some(token) = bearer_token(headers) else {
        return if policy.required {
            Err(Rejection::MissingCredential)
        } else {
            Ok(None)
        };
    };

    let claims = auth.verify(token).map_err(|err| match err {
        VerifyError::MissingSecret => Rejection::MissingSecret,
        VerifyError::InvalidToken(_) => Rejection::InvalidToken,
    })?;

    let actor = auth.resolve(&claims).map_err(|_| Rejection::InvalidClaims)?;

    if !policy.allows(actor.kind) {
        return Err(Rejection::RoleNotAllowed);
    }

    Ok(Some(actor))
}

#[derive(Clone)]
struct Gate {
    auth: Arc<AuthService>,
    policy: Arc<AccessPolicy>,
}

/// Put the access gate in front of a single route's handlers.
///
/// 例：
/// ```ignore
/// .route(
///     "/featured-companies",
///     access::guard(post(add), &state, AccessPolicy::required().with_roles([ActorType::Admin])),
/// )
/// ```
pub fn guard(
    method_router: MethodRouter<AppState>,
    state: &AppState,
    policy: AccessPolicy,
) -> MethodRouter<AppState> {
    let gate = Gate {
        auth: state.auth.clone(),
        policy: Arc::new(policy),
    };

    // route_layer: unmatched methods still get 405, not 401
    method_router.route_layer(middleware::from_fn_with_state(gate, access_middleware))
}

async fn access_middleware(
    State(gate): State<Gate>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let actor = match authorize(&gate.auth, &gate.policy, req.headers()) {
        Ok(actor) => actor,
        Err(rejection) => {
            tracing::debug!(?rejection, "access rejected");
            return Err(rejection.into());
        }
    };

    // middleware → extractor への受け渡し
    if let Some(actor) = actor {
        req.extensions_mut().insert(actor);
    }

    Ok(next.run(req).await)
}
