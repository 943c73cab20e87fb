use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    gateway::{errors::GatewayError, value_objects::ImageUpload},
    ingredient::entities::Ingredient,
    recipe::entities::Recipe,
};

/// LLM Client trait for calling AI models with a declared response schema.
///
/// `Ok(None)` means the model answered without any text.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image: ImageUpload,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;
}

/// Typed calls to the external model. Never retries.
pub trait AiGateway: Send + Sync {
    fn detect_ingredients(
        &self,
        image: ImageUpload,
    ) -> impl Future<Output = Result<Vec<Ingredient>, GatewayError>> + Send;

    fn generate_recipes(
        &self,
        ingredient_names: Vec<String>,
    ) -> impl Future<Output = Result<Vec<Recipe>, GatewayError>> + Send;
}
