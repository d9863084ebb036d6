use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::candidatedb::CandidateExt,
    dtos::{
        candidatedtos::{
            CandidateQueryDto, CandidateResponseDto, ChangeCandidateStatusDto,
            CreateCandidateDto, UpdateCandidateDto,
        },
        ApiResponse, PaginatedResponse,
    },
    error::HttpError,
    middleware::{require_admin, JWTAuthMiddleware},
    models::candidatemodel::CandidateStatus,
    AppState,
};

pub fn candidates_handler() -> Router {
    Router::new()
        .route("/", post(create_candidate))
        .route("/", get(list_candidates))
        .route("/board", get(pipeline_board))
        .route("/:candidate_id", get(get_candidate))
        .route("/:candidate_id", put(update_candidate))
        .route("/:candidate_id", delete(delete_candidate))
        .route("/:candidate_id/status", put(change_status))
        .route(
            "/:candidate_id/submissions/:job_order_id",
            post(submit_to_job_order),
        )
}

pub async fn create_candidate(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateCandidateDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let candidate = app_state
        .db_client
        .save_candidate(
            body.name,
            body.email,
            body.phone,
            body.linkedin_url,
            body.current_title,
            body.current_company,
            body.location,
            body.salary_expectation,
            body.notes,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Candidate created successfully",
            CandidateResponseDto::from_candidate(&candidate),
        )),
    ))
}

pub async fn list_candidates(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<CandidateQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let status = parse_status_filter(query.status.as_deref())?;
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let candidates = app_state
        .db_client
        .list_candidates(query.search.as_deref(), status, page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .count_candidates(query.search.as_deref(), status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let data: Vec<CandidateResponseDto> = candidates
        .iter()
        .map(CandidateResponseDto::from_candidate)
        .collect();

    Ok(Json(PaginatedResponse::new(data, total, page, limit)))
}

pub async fn pipeline_board(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let board = app_state.pipeline_service.board().await?;

    Ok(Json(ApiResponse::success("Pipeline board", board)))
}

pub async fn get_candidate(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(candidate_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let candidate = app_state
        .db_client
        .get_candidate(candidate_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Candidate {} not found", candidate_id)))?;

    Ok(Json(ApiResponse::success(
        "Candidate retrieved successfully",
        CandidateResponseDto::from_candidate(&candidate),
    )))
}

pub async fn update_candidate(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(candidate_id): Path<Uuid>,
    Json(body): Json<UpdateCandidateDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_candidate(candidate_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Candidate {} not found", candidate_id)))?;

    let candidate = app_state
        .db_client
        .update_candidate(
            candidate_id,
            body.name,
            body.email,
            body.phone,
            body.linkedin_url,
            body.current_title,
            body.current_company,
            body.location,
            body.salary_expectation,
            body.notes,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Candidate updated successfully",
        CandidateResponseDto::from_candidate(&candidate),
    )))
}

pub async fn change_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(candidate_id): Path<Uuid>,
    Json(body): Json<ChangeCandidateStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let candidate = app_state
        .pipeline_service
        .change_status(candidate_id, &body.status)
        .await?;

    Ok(Json(ApiResponse::success(
        "Candidate status updated successfully",
        CandidateResponseDto::from_candidate(&candidate),
    )))
}

pub async fn delete_candidate(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(candidate_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    require_admin(&auth)?;

    app_state
        .db_client
        .get_candidate(candidate_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Candidate {} not found", candidate_id)))?;

    app_state
        .db_client
        .delete_candidate(candidate_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::<()>::success(
        "Candidate deleted successfully",
        (),
    )))
}

pub async fn submit_to_job_order(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path((candidate_id, job_order_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .get_candidate(candidate_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Candidate {} not found", candidate_id)))?;

    app_state
        .db_client
        .create_submission(candidate_id, job_order_id, Some(auth.user.id))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::<()>::success(
            "Candidate submitted to job order",
            (),
        )),
    ))
}

fn parse_status_filter(status: Option<&str>) -> Result<Option<CandidateStatus>, HttpError> {
    match status {
        None => Ok(None),
        Some(raw) => CandidateStatus::from_str(raw)
            .map(Some)
            .ok_or_else(|| HttpError::bad_request(format!("Invalid status value: {}", raw))),
    }
}
