use serde::de::DeserializeOwned;

use crate::domain::gateway::{
    entities::{DetectedIngredient, RecipeDraft},
    errors::ParseError,
};

/// Decodes the raw model text into a typed array.
///
/// Missing or blank text is a valid "nothing found" answer.
pub fn parse_model_array<T: DeserializeOwned>(raw: Option<&str>) -> Result<Vec<T>, ParseError> {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(Vec::new());
    };

    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    if !value.is_array() {
        return Err(ParseError::SchemaMismatch(
            "expected a JSON array at the top level".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(ParseError::from)
}

pub fn parse_detected_ingredients(raw: Option<&str>) -> Result<Vec<DetectedIngredient>, ParseError> {
    parse_model_array(raw)
}

pub fn parse_recipe_drafts(raw: Option<&str>) -> Result<Vec<RecipeDraft>, ParseError> {
    parse_model_array(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::entities::Difficulty;

    #[test]
    fn test_blank_text_is_empty_result() {
        assert_eq!(parse_detected_ingredients(None).unwrap(), vec![]);
        assert_eq!(parse_detected_ingredients(Some("  \n")).unwrap(), vec![]);
    }

    #[test]
    fn test_non_json_is_invalid_json() {
        let result = parse_detected_ingredients(Some("I see a tomato"));
        assert!(matches!(result, Err(ParseError::InvalidJson(_))));
    }

    #[test]
    fn test_object_instead_of_array_is_schema_mismatch() {
        let result = parse_detected_ingredients(Some(r#"{"name":"Tomato","category":"vegetable"}"#));
        assert!(matches!(result, Err(ParseError::SchemaMismatch(_))));
    }

    #[test]
    fn test_missing_required_field_is_schema_mismatch() {
        let result = parse_detected_ingredients(Some(r#"[{"name":"Tomato"}]"#));
        assert!(matches!(result, Err(ParseError::SchemaMismatch(_))));
    }

    #[test]
    fn test_recipe_with_unknown_difficulty_is_rejected() {
        let raw = r#"[{
            "title": "Soup", "description": "Warm", "time": "10 mins",
            "difficulty": "Extreme", "ingredients": ["Tomato"],
            "instructions": ["Boil"], "wasteReductionTip": "Use peels"
        }]"#;
        assert!(matches!(
            parse_recipe_drafts(Some(raw)),
            Err(ParseError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_recipe_calories_are_optional() {
        let raw = r#"[{
            "title": "Soup", "description": "Warm", "time": "10 mins",
            "difficulty": "Medium", "ingredients": ["Tomato"],
            "instructions": ["Boil"], "wasteReductionTip": "Use peels"
        }]"#;
        let drafts = parse_recipe_drafts(Some(raw)).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].difficulty, Difficulty::Medium);
        assert_eq!(drafts[0].calories, None);
    }
}
