use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    dtos::{
        syncdtos::{BatchSyncDto, BatchSyncResponseDto},
        ApiResponse,
    },
    error::HttpError,
    AppState,
};

pub fn sync_handler() -> Router {
    Router::new()
        .route("/candidates/:candidate_id", post(sync_candidate))
        .route("/candidates", post(sync_candidates_batch))
        .route("/job-orders/:job_order_id", post(sync_job_order))
        .route("/job-orders", post(sync_job_orders_batch))
        .route("/placements/:placement_id", post(sync_placement))
        .route("/pending", get(pending_overview))
}

pub async fn sync_candidate(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(candidate_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let ack = app_state.sync_service.sync_candidate(candidate_id).await?;

    Ok(Json(ApiResponse::success("Candidate synced to ATS", ack)))
}

pub async fn sync_candidates_batch(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<BatchSyncDto>,
) -> Result<impl IntoResponse, HttpError> {
    let results = app_state
        .sync_service
        .sync_candidates_batch(body.ids)
        .await?;

    Ok(Json(ApiResponse::success(
        "Candidate batch sync finished",
        BatchSyncResponseDto::from_results(results),
    )))
}

pub async fn sync_job_order(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_order_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let ack = app_state.sync_service.sync_job_order(job_order_id).await?;

    Ok(Json(ApiResponse::success("Job order synced to ATS", ack)))
}

pub async fn sync_job_orders_batch(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<BatchSyncDto>,
) -> Result<impl IntoResponse, HttpError> {
    let results = app_state
        .sync_service
        .sync_job_orders_batch(body.ids)
        .await?;

    Ok(Json(ApiResponse::success(
        "Job order batch sync finished",
        BatchSyncResponseDto::from_results(results),
    )))
}

pub async fn sync_placement(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(placement_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let ack = app_state.sync_service.sync_placement(placement_id).await?;

    Ok(Json(ApiResponse::success("Placement synced to ATS", ack)))
}

pub async fn pending_overview(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let overview = app_state.sync_service.pending_overview().await?;

    Ok(Json(ApiResponse::success("Pending sync overview", overview)))
}
