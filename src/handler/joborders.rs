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
    db::{candidatedb::CandidateExt, joborderdb::JobOrderExt},
    dtos::{
        candidatedtos::CandidateResponseDto,
        joborderdtos::{
            ChangeJobOrderStatusDto, CreateJobOrderDto, JobOrderQueryDto, JobOrderResponseDto,
        },
        ApiResponse, PaginatedResponse,
    },
    error::HttpError,
    middleware::{require_admin, JWTAuthMiddleware},
    models::jobordermodel::{JobOrderStatus, JobPriority},
    AppState,
};

pub fn joborders_handler() -> Router {
    Router::new()
        .route("/", post(create_job_order))
        .route("/", get(list_job_orders))
        .route("/:job_order_id", get(get_job_order))
        .route("/:job_order_id", put(update_job_order))
        .route("/:job_order_id", delete(delete_job_order))
        .route("/:job_order_id/status", put(change_status))
        .route("/:job_order_id/candidates", get(get_submitted_candidates))
}

pub async fn create_job_order(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateJobOrderDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if let (Some(min), Some(max)) = (body.salary_min, body.salary_max) {
        if min > max {
            return Err(HttpError::bad_request(
                "Minimum salary cannot exceed maximum salary",
            ));
        }
    }

    let job_order = app_state
        .db_client
        .save_job_order(
            body.client_company,
            body.contact_name,
            body.contact_email,
            body.contact_phone,
            body.job_title,
            body.department,
            body.location,
            body.employment_type,
            body.salary_min,
            body.salary_max,
            body.fee_type,
            body.fee_amount,
            body.description,
            body.requirements,
            body.required_skills,
            body.priority.unwrap_or(JobPriority::Normal),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Job order created successfully",
            JobOrderResponseDto::from_job_order(&job_order),
        )),
    ))
}

pub async fn list_job_orders(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<JobOrderQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let status = parse_status_filter(query.status.as_deref())?;
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let job_orders = app_state
        .db_client
        .list_job_orders(query.search.as_deref(), status, page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .count_job_orders(query.search.as_deref(), status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let data: Vec<JobOrderResponseDto> = job_orders
        .iter()
        .map(JobOrderResponseDto::from_job_order)
        .collect();

    Ok(Json(PaginatedResponse::new(data, total, page, limit)))
}

pub async fn get_job_order(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_order_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job_order = app_state
        .db_client
        .get_job_order(job_order_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Job order {} not found", job_order_id)))?;

    Ok(Json(ApiResponse::success(
        "Job order retrieved successfully",
        JobOrderResponseDto::from_job_order(&job_order),
    )))
}

pub async fn update_job_order(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_order_id): Path<Uuid>,
    Json(body): Json<CreateJobOrderDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_job_order(job_order_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Job order {} not found", job_order_id)))?;

    let job_order = app_state
        .db_client
        .update_job_order(
            job_order_id,
            body.client_company,
            body.contact_name,
            body.contact_email,
            body.contact_phone,
            body.job_title,
            body.department,
            body.location,
            body.employment_type,
            body.salary_min,
            body.salary_max,
            body.fee_type,
            body.fee_amount,
            body.description,
            body.requirements,
            body.required_skills,
            body.priority.unwrap_or(JobPriority::Normal),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Job order updated successfully",
        JobOrderResponseDto::from_job_order(&job_order),
    )))
}

pub async fn change_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_order_id): Path<Uuid>,
    Json(body): Json<ChangeJobOrderStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let status = JobOrderStatus::from_str(&body.status)
        .ok_or_else(|| HttpError::bad_request(format!("Invalid status value: {}", body.status)))?;

    app_state
        .db_client
        .get_job_order(job_order_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Job order {} not found", job_order_id)))?;

    let job_order = app_state
        .db_client
        .update_job_order_status(job_order_id, status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Job order status updated successfully",
        JobOrderResponseDto::from_job_order(&job_order),
    )))
}

pub async fn delete_job_order(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(job_order_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    require_admin(&auth)?;

    app_state
        .db_client
        .get_job_order(job_order_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Job order {} not found", job_order_id)))?;

    app_state
        .db_client
        .delete_job_order(job_order_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::<()>::success(
        "Job order deleted successfully",
        (),
    )))
}

pub async fn get_submitted_candidates(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_order_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .get_job_order(job_order_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Job order {} not found", job_order_id)))?;

    let candidates = app_state
        .db_client
        .get_candidates_for_job_order(job_order_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let data: Vec<CandidateResponseDto> = candidates
        .iter()
        .map(CandidateResponseDto::from_candidate)
        .collect();

    Ok(Json(ApiResponse::success("Submitted candidates", data)))
}

fn parse_status_filter(status: Option<&str>) -> Result<Option<JobOrderStatus>, HttpError> {
    match status {
        None => Ok(None),
        Some(raw) => JobOrderStatus::from_str(raw)
            .map(Some)
            .ok_or_else(|| HttpError::bad_request(format!("Invalid status value: {}", raw))),
    }
}
