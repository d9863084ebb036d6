use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{candidatedb::CandidateExt, joborderdb::JobOrderExt, placementdb::PlacementExt},
    dtos::{
        placementdtos::{CreatePlacementDto, PlacementQueryDto, PlacementResponseDto},
        ApiResponse, PaginatedResponse,
    },
    error::HttpError,
    AppState,
};

pub fn placements_handler() -> Router {
    Router::new()
        .route("/", post(create_placement))
        .route("/", get(list_placements))
        .route("/:placement_id", get(get_placement))
}

pub async fn create_placement(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreatePlacementDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_candidate(body.candidate_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| {
            HttpError::not_found(format!("Candidate {} not found", body.candidate_id))
        })?;

    app_state
        .db_client
        .get_job_order(body.job_order_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| {
            HttpError::not_found(format!("Job order {} not found", body.job_order_id))
        })?;

    let placement = app_state
        .db_client
        .save_placement(
            body.candidate_id,
            body.job_order_id,
            body.start_date,
            body.salary,
            body.fee_amount,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Placement created successfully",
            PlacementResponseDto::from_placement(&placement),
        )),
    ))
}

pub async fn list_placements(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<PlacementQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let placements = app_state
        .db_client
        .list_placements(page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .count_placements()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let data: Vec<PlacementResponseDto> = placements
        .iter()
        .map(PlacementResponseDto::from_placement)
        .collect();

    Ok(Json(PaginatedResponse::new(data, total, page, limit)))
}

pub async fn get_placement(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(placement_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let placement = app_state
        .db_client
        .get_placement(placement_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Placement {} not found", placement_id)))?;

    Ok(Json(ApiResponse::success(
        "Placement retrieved successfully",
        PlacementResponseDto::from_placement(&placement),
    )))
}
