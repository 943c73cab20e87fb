use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A food item the model recognised in a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub category: String, // e.g. vegetable, fruit, dairy, protein, pantry staple
}

impl Ingredient {
    pub fn new(id: String, name: String, category: String) -> Self {
        Self { id, name, category }
    }
}
