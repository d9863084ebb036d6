use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{reminderdtos::CreateReminderDto, ApiResponse},
    error::HttpError,
    middleware::JWTAuthMiddleware,
    service::reminder_service::ReminderWhen,
    AppState,
};

pub fn reminders_handler() -> Router {
    Router::new()
        .route("/prospect/:prospect_id", post(create_reminder))
        .route("/prospect/:prospect_id", get(get_prospect_reminders))
        .route("/due-soon", get(due_soon))
        .route("/:reminder_id/complete", put(complete_reminder))
        .route("/:reminder_id", delete(delete_reminder))
}

pub async fn create_reminder(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(prospect_id): Path<Uuid>,
    Json(body): Json<CreateReminderDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let when = match (body.reminder_date, body.quick_pick) {
        (Some(date), None) => ReminderWhen::At(date),
        (None, Some(pick)) => ReminderWhen::QuickPick(pick),
        _ => {
            return Err(HttpError::bad_request(
                "Provide either reminder_date or quick_pick, not both",
            ));
        }
    };

    let reminder = app_state
        .reminder_service
        .create(prospect_id, auth.user.id, when, body.note)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Reminder created", reminder)),
    ))
}

pub async fn get_prospect_reminders(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(prospect_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reminders = app_state
        .reminder_service
        .for_prospect(prospect_id, Utc::now())
        .await?;

    Ok(Json(ApiResponse::success("Reminders", reminders)))
}

pub async fn due_soon(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let summary = app_state.reminder_service.due_soon(Utc::now()).await?;

    Ok(Json(ApiResponse::success("Due soon", summary)))
}

pub async fn complete_reminder(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(reminder_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reminder = app_state.reminder_service.complete(reminder_id).await?;

    Ok(Json(ApiResponse::success("Reminder completed", reminder)))
}

pub async fn delete_reminder(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(reminder_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.reminder_service.delete(reminder_id).await?;

    Ok(Json(ApiResponse::<()>::success("Reminder deleted", ())))
}
