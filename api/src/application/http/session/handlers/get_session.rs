use axum::extract::{Path, State};
use pantrychef_core::domain::session::{ports::SessionService, value_objects::SessionSnapshot};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub data: SessionSnapshot,
}

#[utoipa::path(
    get,
    path = "/{session_id}",
    tag = "session",
    summary = "Get a session",
    description = "Returns the current state, detected ingredients, recipes and last error of a session",
    responses(
        (status = 200, body = SessionResponse),
        (status = 404, description = "Session not found")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn get_session(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let snapshot = state
        .service
        .get_session(session_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SessionResponse { data: snapshot }))
}
