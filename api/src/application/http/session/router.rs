use super::handlers::{
    confirm_ingredients::{__path_confirm_ingredients, confirm_ingredients},
    create_session::{__path_create_session, create_session},
    delete_session::{__path_delete_session, delete_session},
    get_session::{__path_get_session, get_session},
    go_back::{__path_go_back, go_back},
    reset_session::{__path_reset_session, reset_session},
    toggle_ingredient::{__path_toggle_ingredient, toggle_ingredient},
    update_manual_entry::{__path_update_manual_entry, update_manual_entry},
    upload_photo::{__path_upload_photo, upload_photo},
};
use crate::application::http::server::app_state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use pantrychef_core::domain::gateway::value_objects::MAX_IMAGE_SIZE;
use utoipa::OpenApi;

/// Multipart framing on top of the image itself.
const PHOTO_BODY_OVERHEAD: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(paths(
    create_session,
    get_session,
    delete_session,
    upload_photo,
    toggle_ingredient,
    update_manual_entry,
    confirm_ingredients,
    go_back,
    reset_session
))]
pub struct SessionApiDoc;

pub fn session_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/sessions", state.args.server.root_path),
            post(create_session),
        )
        .route(
            &format!("{}/sessions/{{session_id}}", state.args.server.root_path),
            get(get_session).delete(delete_session),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/photo",
                state.args.server.root_path
            ),
            post(upload_photo).layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + PHOTO_BODY_OVERHEAD)),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/ingredients/{{ingredient_id}}/toggle",
                state.args.server.root_path
            ),
            post(toggle_ingredient),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/manual-entry",
                state.args.server.root_path
            ),
            put(update_manual_entry),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/confirm",
                state.args.server.root_path
            ),
            post(confirm_ingredients),
        )
        .route(
            &format!("{}/sessions/{{session_id}}/back", state.args.server.root_path),
            post(go_back),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/reset",
                state.args.server.root_path
            ),
            post(reset_session),
        )
}
