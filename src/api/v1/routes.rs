/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - route ごとの access policy (required / roles) と upload validation をここで決める
 */
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::middleware::auth::access::{self, AccessPolicy};
use crate::middleware::upload;
use crate::services::auth::ActorType;
use crate::state::AppState;

use crate::api::v1::handlers::{
    featured_companies::{
        add_featured_company, list_featured_companies, remove_featured_company,
        upload_featured_company_logo,
    },
    health::health,
};

pub fn routes(state: &AppState) -> Router<AppState> {
    let admin_only = AccessPolicy::required().with_roles([ActorType::Admin]);
    let logo_owners = AccessPolicy::required().with_roles([ActorType::Admin, ActorType::Company]);

    Router::new()
        .route("/health", get(health))
        .route(
            "/featured-companies",
            access::guard(get(list_featured_companies), state, AccessPolicy::optional())
                .merge(access::guard(
                    post(add_featured_company),
                    state,
                    admin_only.clone(),
                )),
        )
        .route(
            "/featured-companies/{company_id}",
            access::guard(delete(remove_featured_company), state, admin_only),
        )
        .route(
            "/featured-companies/{company_id}/logo",
            access::guard(
                upload::guard(put(upload_featured_company_logo), &state.upload),
                state,
                logo_owners,
            ),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::upload::UploadPolicy;
    use crate::services::auth::{AuthService, CredentialVerifier, LinkagePolicy};
    use crate::services::featured_companies::memory::InMemoryFeaturedCompanyStore;

    const SECRET: &str = "routes-secret";

    struct TestApp {
        router: Router,
        store: Arc<InMemoryFeaturedCompanyStore>,
    }

    fn test_app() -> TestApp {
        let store = Arc::new(InMemoryFeaturedCompanyStore::default());
        let state = AppState::new(
            Arc::new(AuthService::new(
                CredentialVerifier::new(Some(SECRET), 0),
                LinkagePolicy::Lenient,
            )),
            store.clone(),
            UploadPolicy::new(["image/png"], 16),
        );
        TestApp {
            router: routes(&state).with_state(state),
            store,
        }
    }

    fn bearer(claims: Value) -> String {
        let mut claims = claims;
        claims["exp"] = json!(chrono::Utc::now().timestamp() + 3600);
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        format!("Bearer {token}")
    }

    fn admin() -> String {
        bearer(json!({ "user_id": 1, "type": "admin" }))
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn add_request(auth: Option<&str>, company_id: i64) -> Request<Body> {
        let mut req = Request::post("/featured-companies")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            req = req.header(header::AUTHORIZATION, auth);
        }
        req.body(Body::from(json!({ "company_id": company_id }).to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_needs_no_credential() {
        let app = test_app();
        let (status, body) = send(
            &app.router,
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn admin_can_add_list_and_remove() {
        let app = test_app();
        let admin = admin();

        let (status, body) = send(&app.router, add_request(Some(admin.as_str()), 42)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["company_id"], 42);
        assert_eq!(body["has_logo"], false);

        let (status, body) = send(
            &app.router,
            Request::get("/featured-companies").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = send(
            &app.router,
            Request::delete("/featured-companies/42")
                .header(header::AUTHORIZATION, &admin)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(
            &app.router,
            Request::delete("/featured-companies/42")
                .header(header::AUTHORIZATION, &admin)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn adding_twice_conflicts_and_bad_ids_are_rejected() {
        let app = test_app();
        let admin = admin();

        send(&app.router, add_request(Some(admin.as_str()), 7)).await;
        let (status, body) = send(&app.router, add_request(Some(admin.as_str()), 7)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "ALREADY_FEATURED");

        let (status, body) = send(&app.router, add_request(Some(admin.as_str()), 0)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_COMPANY_ID");
    }

    #[tokio::test]
    async fn non_admins_cannot_modify_the_list() {
        let app = test_app();

        let (status, _) = send(&app.router, add_request(None, 7)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let company = bearer(json!({ "user_id": 2, "type": "company", "company_id": 7 }));
        let (status, body) = send(&app.router, add_request(Some(company.as_str()), 7)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn list_rejects_a_bad_token_even_though_anonymous_is_allowed() {
        let app = test_app();
        let (status, _) = send(
            &app.router,
            Request::get("/featured-companies")
                .header(header::AUTHORIZATION, "Bearer not.a.jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    fn logo_request(
        auth: &str,
        company_id: i64,
        content_type: &str,
        body: &[u8],
    ) -> Request<Body> {
        Request::put(format!("/featured-companies/{company_id}/logo"))
            .header(header::AUTHORIZATION, auth)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_vec()))
            .unwrap()
    }

    #[tokio::test]
    async fn company_uploads_its_own_logo() {
        let app = test_app();
        send(&app.router, add_request(Some(admin().as_str()), 7)).await;

        let own = bearer(json!({ "user_id": 2, "type": "company", "company_id": 7 }));
        let (status, body) = send(&app.router, logo_request(&own, 7, "image/png", b"png!")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["logo_content_type"], "image/png");
        assert_eq!(app.store.logo(7), Some(b"png!".to_vec()));

        let other = bearer(json!({ "user_id": 3, "type": "company", "company_id": 8 }));
        let (status, _) = send(&app.router, logo_request(&other, 7, "image/png", b"png!")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn logo_upload_is_validated_after_authentication() {
        let app = test_app();
        send(&app.router, add_request(Some(admin().as_str()), 7)).await;

        let candidate = bearer(json!({ "user_id": 4, "type": "candidate", "candidate_id": 1 }));
        let (status, _) =
            send(&app.router, logo_request(&candidate, 7, "text/plain", b"x")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app.router, logo_request(&admin(), 7, "text/plain", b"x")).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"], "UNSUPPORTED_FILE_TYPE");

        let (status, body) = send(&app.router, logo_request(&admin(), 7, "image/png", b"")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "EMPTY_UPLOAD");

        let (status, _) = send(&app.router, logo_request(&admin(), 99, "image/png", b"x")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
