/*
 * Responsibility
 * - /featured-companies 系 handler
 * - Path/Json を extractor で受け、DTO validation → FeaturedCompanyStore 呼び出し (1 call で返す)
 * - 認証・role 判定は routes 側の access gate が済ませている前提
 */
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::dto::featured_companies::{AddFeaturedCompanyRequest, FeaturedCompanyResponse},
    api::v1::extractors::CurrentActor,
    error::AppError,
    middleware::upload::{UploadBody, ValidatedUpload},
    services::auth::ActorType,
    state::AppState,
};

pub async fn list_featured_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeaturedCompanyResponse>>, AppError> {
    let companies = state.featured.list().await?;

    Ok(Json(
        companies
            .into_iter()
            .map(FeaturedCompanyResponse::from)
            .collect(),
    ))
}

pub async fn add_featured_company(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(req): Json<AddFeaturedCompanyRequest>,
) -> Result<(StatusCode, Json<FeaturedCompanyResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_COMPANY_ID", msg))?;

    let company = state.featured.add(req.company_id).await?;
    tracing::info!(
        company_id = company.company_id,
        user_id = actor.user_id,
        "company featured"
    );

    Ok((StatusCode::CREATED, Json(company.into())))
}

pub async fn remove_featured_company(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(company_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.featured.remove(company_id).await? {
        return Err(AppError::not_found("featured company"));
    }
    tracing::info!(company_id, user_id = actor.user_id, "company unfeatured");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn upload_featured_company_logo(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(company_id): Path<i64>,
    Extension(upload): Extension<ValidatedUpload>,
    UploadBody(body): UploadBody,
) -> Result<Json<FeaturedCompanyResponse>, AppError> {
    // company accounts may only touch their own logo
    if actor.is(ActorType::Company) && actor.company_id != Some(company_id) {
        return Err(AppError::Forbidden("Forbidden"));
    }

    if body.is_empty() {
        return Err(AppError::bad_request("EMPTY_UPLOAD", "file is empty"));
    }

    let company = state
        .featured
        .set_logo(company_id, &upload.content_type, &body)
        .await?
        .ok_or(AppError::not_found("featured company"))?;

    Ok(Json(company.into()))
}
