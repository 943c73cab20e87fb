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
    path = "/{session_id}/ingredients/{ingredient_id}/toggle",
    tag = "session",
    summary = "Toggle a detected ingredient",
    responses(
        (status = 200, body = SessionResponse),
        (status = 404, description = "Session or ingredient not found"),
        (status = 409, description = "Session is not reviewing ingredients")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
        ("ingredient_id" = String, Path, description = "Ingredient ID"),
    ),
)]
pub async fn toggle_ingredient(
    Path((session_id, ingredient_id)): Path<(Uuid, String)>,
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let snapshot = state
        .service
        .toggle_ingredient(session_id, ingredient_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SessionResponse { data: snapshot }))
}
