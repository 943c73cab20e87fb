use utoipa::OpenApi;

use crate::application::http::session::router::SessionApiDoc;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PantryChef API"
    ),
    paths(crate::application::http::health::health),
    nest(
        (path = "/sessions", api = SessionApiDoc),
    )
)]
pub struct ApiDoc;
