use thiserror::Error;

use crate::domain::{gateway::value_objects::ImageError, session::entities::TransitionError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Session not found")]
    SessionNotFound,

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    InvalidImage(#[from] ImageError),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error")]
    InternalServerError,
}
