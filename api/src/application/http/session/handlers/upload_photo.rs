use axum::extract::{Multipart, Path, State};
use pantrychef_core::domain::{
    common::entities::app_errors::CoreError, gateway::value_objects::ImageUpload,
    session::ports::SessionService,
};
use tracing::error;
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
    path = "/{session_id}/photo",
    tag = "session",
    summary = "Detect ingredients from a photo",
    description = "Sends a JPEG or PNG photo (multipart field `image`) to the model. A failed detection returns the session back in its initial state with an error message.",
    responses(
        (status = 200, body = SessionResponse),
        (status = 400, description = "Missing or unsupported image"),
        (status = 409, description = "Session is busy or not in the initial state"),
        (status = 413, description = "Image too large")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn upload_photo(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<SessionResponse>, ApiError> {
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "image" {
            let content_type = field.content_type().map(|c| c.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

            image = Some(
                ImageUpload::new(data, content_type.as_deref())
                    .map_err(|e| ApiError::from(CoreError::from(e)))?,
            );
        }
    }

    let image = image.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    let snapshot = state
        .service
        .select_photo(session_id, image)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SessionResponse { data: snapshot }))
}
