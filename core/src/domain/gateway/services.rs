use tracing::{error, info, instrument};

use crate::domain::{
    common::services::Service,
    gateway::{
        errors::GatewayError,
        helpers::{parse_detected_ingredients, parse_recipe_drafts},
        ports::{AiGateway, LLMClient},
        prompts::{INGREDIENT_DETECTION_PROMPT, build_recipe_prompt},
        schema::{get_ingredient_detection_schema, get_recipe_generation_schema},
        value_objects::ImageUpload,
    },
    ingredient::entities::Ingredient,
    recipe::entities::Recipe,
    session::ports::SessionRepository,
};

impl<LLM, SR> AiGateway for Service<LLM, SR>
where
    LLM: LLMClient,
    SR: SessionRepository,
{
    #[instrument(skip(self, image), fields(mime_type = %image.mime_type(), size = image.len()))]
    async fn detect_ingredients(&self, image: ImageUpload) -> Result<Vec<Ingredient>, GatewayError> {
        let raw_response = self
            .llm_client
            .generate_with_image(
                INGREDIENT_DETECTION_PROMPT.to_string(),
                image,
                get_ingredient_detection_schema(),
            )
            .await
            .map_err(|e| {
                error!("Ingredient detection request failed: {}", e);
                GatewayError::DetectionFailed(e.to_string())
            })?;

        let detected = parse_detected_ingredients(raw_response.as_deref()).map_err(|e| {
            error!("Invalid ingredient detection response: {}", e);
            GatewayError::DetectionFailed(e.to_string())
        })?;

        let batch = self.id_sequence.next_batch();
        let ingredients: Vec<Ingredient> = detected
            .into_iter()
            .enumerate()
            .map(|(index, item)| item.into_ingredient(index, batch))
            .collect();

        info!(count = ingredients.len(), "Ingredients detected");

        Ok(ingredients)
    }

    #[instrument(skip(self), fields(count = ingredient_names.len()))]
    async fn generate_recipes(
        &self,
        ingredient_names: Vec<String>,
    ) -> Result<Vec<Recipe>, GatewayError> {
        if ingredient_names.is_empty() {
            return Err(GatewayError::GenerationFailed(
                "no ingredients to cook with".to_string(),
            ));
        }

        let raw_response = self
            .llm_client
            .generate_with_text(
                build_recipe_prompt(&ingredient_names),
                get_recipe_generation_schema(),
            )
            .await
            .map_err(|e| {
                error!("Recipe generation request failed: {}", e);
                GatewayError::GenerationFailed(e.to_string())
            })?;

        let drafts = parse_recipe_drafts(raw_response.as_deref()).map_err(|e| {
            error!("Invalid recipe generation response: {}", e);
            GatewayError::GenerationFailed(e.to_string())
        })?;

        let batch = self.id_sequence.next_batch();
        let recipes: Vec<Recipe> = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| draft.into_recipe(index, batch))
            .collect();

        info!(count = recipes.len(), "Recipes generated");

        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{
        domain::{
            common::entities::app_errors::CoreError, gateway::ports::MockLLMClient,
            recipe::entities::Difficulty,
        },
        infrastructure::session::InMemorySessionRepository,
    };

    const TWO_INGREDIENTS: &str = r#"[
        {"name": "Tomato", "category": "vegetable"},
        {"name": "Milk", "category": "dairy"}
    ]"#;

    const THREE_RECIPES: &str = r#"[
        {"title": "Tomato Soup", "description": "Silky and bright", "time": "25 mins",
         "difficulty": "Easy", "ingredients": ["Tomato", "Salt"],
         "instructions": ["Chop", "Simmer", "Blend"],
         "wasteReductionTip": "Roast the tomato skins into a crisp topping", "calories": 180},
        {"title": "Tomato Salad", "description": "Fresh", "time": "10 mins",
         "difficulty": "Medium", "ingredients": ["Tomato"],
         "instructions": ["Slice", "Season"],
         "wasteReductionTip": "Keep the seeds for a vinaigrette"},
        {"title": "Stuffed Tomato", "description": "Baked", "time": "40 mins",
         "difficulty": "Hard", "ingredients": ["Tomato", "Rice"],
         "instructions": ["Hollow", "Fill", "Bake"],
         "wasteReductionTip": "Fold the scooped pulp into the filling"}
    ]"#;

    fn jpeg() -> ImageUpload {
        ImageUpload::new(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00], Some("image/jpeg")).unwrap()
    }

    fn service(llm: MockLLMClient) -> Service<MockLLMClient, InMemorySessionRepository> {
        Service::new(llm, InMemorySessionRepository::new())
    }

    #[tokio::test]
    async fn test_detect_ingredients_assigns_unique_ids() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .times(2)
            .returning(|_, _, _| Box::pin(async { Ok(Some(TWO_INGREDIENTS.to_string())) }));
        let service = service(llm);

        let first = service.detect_ingredients(jpeg()).await.unwrap();
        let second = service.detect_ingredients(jpeg()).await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(first[0].name, "Tomato");
        assert_eq!(first[1].category, "dairy");

        let ids: HashSet<&str> = first
            .iter()
            .chain(second.iter())
            .map(|ingredient| ingredient.id.as_str())
            .collect();
        assert_eq!(ids.len(), 4);
    }

    #[tokio::test]
    async fn test_detect_ingredients_sends_prompt_schema_and_image() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .withf(|prompt, image, schema| {
                prompt == INGREDIENT_DETECTION_PROMPT
                    && image.mime_type().as_str() == "image/jpeg"
                    && schema["items"]["required"] == serde_json::json!(["name", "category"])
            })
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(Some("[]".to_string())) }));

        let ingredients = service(llm).detect_ingredients(jpeg()).await.unwrap();
        assert!(ingredients.is_empty());
    }

    #[tokio::test]
    async fn test_detect_ingredients_empty_text_is_not_an_error() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .returning(|_, _, _| Box::pin(async { Ok(None) }));

        let ingredients = service(llm).detect_ingredients(jpeg()).await.unwrap();
        assert!(ingredients.is_empty());
    }

    #[tokio::test]
    async fn test_detect_ingredients_malformed_response_fails() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .returning(|_, _, _| Box::pin(async { Ok(Some("Tomato, Milk".to_string())) }));

        let err = service(llm).detect_ingredients(jpeg()).await.unwrap_err();
        assert!(matches!(err, GatewayError::DetectionFailed(_)));
    }

    #[tokio::test]
    async fn test_detect_ingredients_transport_error_fails() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image().returning(|_, _, _| {
            Box::pin(async {
                Err(CoreError::ExternalServiceError(
                    "connection reset".to_string(),
                ))
            })
        });

        let err = service(llm).detect_ingredients(jpeg()).await.unwrap_err();
        assert!(matches!(err, GatewayError::DetectionFailed(ref msg) if msg.contains("connection reset")));
    }

    #[tokio::test]
    async fn test_generate_recipes_returns_typed_recipes() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text()
            .withf(|prompt, _| prompt.contains("Based on these ingredients: Tomato,"))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(Some(THREE_RECIPES.to_string())) }));

        let recipes = service(llm)
            .generate_recipes(vec!["Tomato".to_string()])
            .await
            .unwrap();

        assert_eq!(recipes.len(), 3);
        let ids: HashSet<&str> = recipes.iter().map(|recipe| recipe.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        for recipe in &recipes {
            assert!(Difficulty::ALL.contains(&recipe.difficulty));
            assert!(!recipe.instructions.is_empty());
            assert!(!recipe.waste_reduction_tip.is_empty());
        }
        assert_eq!(recipes[0].calories, Some(180.0));
        assert_eq!(recipes[1].calories, None);
    }

    #[tokio::test]
    async fn test_generate_recipes_schema_violation_fails() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text().returning(|_, _| {
            Box::pin(async { Ok(Some(r#"[{"title": "Soup"}]"#.to_string())) })
        });

        let err = service(llm)
            .generate_recipes(vec!["Tomato".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_generate_recipes_without_ingredients_skips_model() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text().times(0);

        let err = service(llm).generate_recipes(Vec::new()).await.unwrap_err();
        assert!(matches!(err, GatewayError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_generate_recipes_empty_text_is_empty_list() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text()
            .returning(|_, _| Box::pin(async { Ok(Some(String::new())) }));

        let recipes = service(llm)
            .generate_recipes(vec!["Tomato".to_string()])
            .await
            .unwrap();
        assert!(recipes.is_empty());
    }
}
