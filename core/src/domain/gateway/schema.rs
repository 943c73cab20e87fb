use serde_json::json;

use crate::domain::recipe::entities::Difficulty;

/// Returns the JSON schema for ingredient detection responses
pub fn get_ingredient_detection_schema() -> serde_json::Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "category": { "type": "string" }
            },
            "required": ["name", "category"]
        }
    })
}

/// Returns the JSON schema for recipe generation responses
pub fn get_recipe_generation_schema() -> serde_json::Value {
    let difficulties: Vec<&str> = Difficulty::ALL.iter().map(Difficulty::as_str).collect();

    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "description": { "type": "string" },
                "time": { "type": "string" },
                "difficulty": {
                    "type": "string",
                    "enum": difficulties
                },
                "ingredients": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "instructions": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "wasteReductionTip": { "type": "string" },
                "calories": { "type": "number" }
            },
            "required": [
                "title", "description", "time", "difficulty",
                "ingredients", "instructions", "wasteReductionTip"
            ]
        }
    })
}
