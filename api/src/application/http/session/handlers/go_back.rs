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
    path = "/{session_id}/back",
    tag = "session",
    summary = "Leave ingredient review",
    responses(
        (status = 200, body = SessionResponse),
        (status = 409, description = "Session is not reviewing ingredients")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn go_back(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let snapshot = state
        .service
        .go_back(session_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SessionResponse { data: snapshot }))
}
