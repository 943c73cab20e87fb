use thiserror::Error;

pub const DETECTION_FAILED_MESSAGE: &str =
    "Something went wrong while analyzing your photo. Please try again.";
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to cook up some recipes. Our chefs are taking a break. Please try again!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    DetectionFailed,
    GenerationFailed,
}

impl GatewayErrorKind {
    /// Message shown to the user; the failure detail stays in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            GatewayErrorKind::DetectionFailed => DETECTION_FAILED_MESSAGE,
            GatewayErrorKind::GenerationFailed => GENERATION_FAILED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Ingredient detection failed: {0}")]
    DetectionFailed(String),

    #[error("Recipe generation failed: {0}")]
    GenerationFailed(String),
}

impl GatewayError {
    pub fn kind(&self) -> GatewayErrorKind {
        match self {
            GatewayError::DetectionFailed(_) => GatewayErrorKind::DetectionFailed,
            GatewayError::GenerationFailed(_) => GatewayErrorKind::GenerationFailed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Model response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Model response does not match the declared schema: {0}")]
    SchemaMismatch(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => ParseError::SchemaMismatch(err.to_string()),
            _ => ParseError::InvalidJson(err.to_string()),
        }
    }
}
