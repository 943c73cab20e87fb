use axum::extract::State;
use pantrychef_core::domain::session::ports::SessionService;

use crate::application::http::{
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    session::handlers::get_session::SessionResponse,
};

#[utoipa::path(
    post,
    path = "",
    tag = "session",
    summary = "Start a session",
    description = "Creates a new session in the initial state",
    responses(
        (status = 201, body = SessionResponse)
    ),
)]
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let snapshot = state
        .service
        .create_session()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(SessionResponse { data: snapshot }))
}
