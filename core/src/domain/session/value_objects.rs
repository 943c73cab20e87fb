use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    recipe::entities::Recipe, review::entities::ReviewSnapshot, session::entities::AppState,
};

/// Read model of a session, safe to hand to any front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub state: AppState,
    /// Human-readable message from the last failed call, if any.
    pub error: Option<String>,
    pub review: Option<ReviewSnapshot>,
    pub recipes: Vec<Recipe>,
    pub status_messages: Vec<String>,
    pub updated_at: DateTime<Utc>,
}
