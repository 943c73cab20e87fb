use axum::extract::{Path, State};
use pantrychef_core::domain::session::ports::SessionService;
use uuid::Uuid;

use crate::application::http::{
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    session::handlers::get_session::SessionResponse,
};

#[utoipa::path(
    post,
    path = "/{session_id}/reset",
    tag = "session",
    summary = "Start over",
    description = "Discards everything held by the session. Results of calls still in flight are dropped when they arrive.",
    responses(
        (status = 200, body = SessionResponse)
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn reset_session(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let snapshot = state
        .service
        .reset_session(session_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SessionResponse { data: snapshot }))
}
