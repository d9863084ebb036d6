use std::sync::Arc;

use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::prospectdb::ProspectExt,
    dtos::{
        prospectdtos::{ImportProspectsDto, ImportSummaryDto, ProspectQueryDto},
        ApiResponse,
    },
    error::HttpError,
    middleware::JWTAuthMiddleware,
    utils::csv::{parse_company_list, export_prospects, CompanyIdentifier},
    AppState,
};

pub fn prospects_handler() -> Router {
    Router::new()
        .route("/", get(list_prospects))
        .route("/import", post(import_prospects))
        .route("/export", get(export_prospects_csv))
}

pub async fn import_prospects(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<ImportProspectsDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let identifiers = parse_company_list(&body.content);
    if identifiers.is_empty() {
        return Err(HttpError::bad_request(
            "No company records found in the import content",
        ));
    }

    let mut summary = ImportSummaryDto {
        imported: 0,
        names: 0,
        domains: 0,
        linkedin_urls: 0,
    };

    for identifier in identifiers {
        match &identifier {
            CompanyIdentifier::Name(_) => summary.names += 1,
            CompanyIdentifier::Domain(_) => summary.domains += 1,
            CompanyIdentifier::LinkedinUrl(_) => summary.linkedin_urls += 1,
        }

        app_state
            .db_client
            .save_prospect(identifier, Some(auth.user.id))
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        summary.imported += 1;
    }

    tracing::info!("Imported {} prospects", summary.imported);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Prospects imported", summary)),
    ))
}

pub async fn list_prospects(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<ProspectQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let prospects = app_state
        .db_client
        .list_prospects(page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Prospects", prospects)))
}

pub async fn export_prospects_csv(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let prospects = app_state
        .db_client
        .get_all_prospects()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let csv = export_prospects(&prospects);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"prospects.csv\"",
            ),
        ],
        csv,
    ))
}
