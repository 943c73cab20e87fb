use axum::extract::{Path, State};
use pantrychef_core::domain::session::ports::SessionService;
use uuid::Uuid;

use crate::application::http::{
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
    session::{handlers::get_session::SessionResponse, validators::UpdateManualEntryRequest},
};

#[utoipa::path(
    put,
    path = "/{session_id}/manual-entry",
    tag = "session",
    summary = "Set the manually added ingredient",
    description = "The manual entry is appended after the selected ingredients when confirming",
    responses(
        (status = 200, body = SessionResponse),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Session is not reviewing ingredients")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
    request_body = UpdateManualEntryRequest
)]
pub async fn update_manual_entry(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<UpdateManualEntryRequest>,
) -> Result<Response<SessionResponse>, ApiError> {
    let snapshot = state
        .service
        .set_manual_entry(session_id, payload.text)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SessionResponse { data: snapshot }))
}
