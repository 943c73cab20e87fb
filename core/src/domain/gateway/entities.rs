use serde::Deserialize;

use crate::domain::{
    common::synthesize_id,
    ingredient::entities::Ingredient,
    recipe::entities::{Difficulty, Recipe},
};

pub const INGREDIENT_ID_PREFIX: &str = "ing";
pub const RECIPE_ID_PREFIX: &str = "recipe";

/// One element of the detection response, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DetectedIngredient {
    pub name: String,
    pub category: String,
}

impl DetectedIngredient {
    pub fn into_ingredient(self, index: usize, batch: u64) -> Ingredient {
        Ingredient::new(
            synthesize_id(INGREDIENT_ID_PREFIX, index, batch),
            self.name,
            self.category,
        )
    }
}

/// One element of the generation response, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub time: String,
    pub difficulty: Difficulty,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub waste_reduction_tip: String,
    #[serde(default)]
    pub calories: Option<f64>,
}

impl RecipeDraft {
    pub fn into_recipe(self, index: usize, batch: u64) -> Recipe {
        Recipe {
            id: synthesize_id(RECIPE_ID_PREFIX, index, batch),
            title: self.title,
            description: self.description,
            time: self.time,
            difficulty: self.difficulty,
            ingredients: self.ingredients,
            instructions: self.instructions,
            waste_reduction_tip: self.waste_reduction_tip,
            calories: self.calories,
        }
    }
}
