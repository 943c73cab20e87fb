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
    path = "/{session_id}/confirm",
    tag = "session",
    summary = "Generate recipes from the confirmed ingredients",
    description = "A failed generation returns the session to ingredient review with an error message",
    responses(
        (status = 200, body = SessionResponse),
        (status = 409, description = "Session is busy or not reviewing ingredients"),
        (status = 422, description = "Nothing selected and no manual entry")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn confirm_ingredients(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let snapshot = state
        .service
        .confirm_ingredients(session_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SessionResponse { data: snapshot }))
}
