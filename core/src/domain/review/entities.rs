use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::ingredient::entities::Ingredient;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("Ingredient {0} is not part of the detected list")]
    UnknownIngredient(String),

    #[error("Select at least one ingredient or add one manually")]
    EmptySelection,
}

/// Review sub-state: which detected ingredients the user keeps, plus an
/// optional manually typed one.
///
/// Every id in `selected` belongs to `ingredients`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientReview {
    ingredients: Vec<Ingredient>,
    selected: HashSet<String>,
    manual_entry: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReviewItem {
    #[serde(flatten)]
    pub ingredient: Ingredient,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReviewSnapshot {
    pub items: Vec<ReviewItem>,
    pub manual_entry: String,
    pub can_confirm: bool,
}

impl IngredientReview {
    /// Starts with every detected ingredient selected.
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        let selected = ingredients.iter().map(|i| i.id.clone()).collect();

        Self {
            ingredients,
            selected,
            manual_entry: String::new(),
        }
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn manual_entry(&self) -> &str {
        &self.manual_entry
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Flips the selection of `id` and returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> Result<bool, ReviewError> {
        if !self.ingredients.iter().any(|i| i.id == id) {
            return Err(ReviewError::UnknownIngredient(id.to_string()));
        }

        if self.selected.remove(id) {
            Ok(false)
        } else {
            self.selected.insert(id.to_string());
            Ok(true)
        }
    }

    pub fn set_manual_entry(&mut self, text: impl Into<String>) {
        self.manual_entry = text.into();
    }

    pub fn can_confirm(&self) -> bool {
        !self.selected.is_empty() || !self.manual_entry.trim().is_empty()
    }

    /// Selected names in detection order, then the manual entry if any.
    pub fn confirm(&self) -> Result<Vec<String>, ReviewError> {
        if !self.can_confirm() {
            return Err(ReviewError::EmptySelection);
        }

        let mut names: Vec<String> = self
            .ingredients
            .iter()
            .filter(|i| self.selected.contains(&i.id))
            .map(|i| i.name.clone())
            .collect();

        let manual = self.manual_entry.trim();
        if !manual.is_empty() {
            names.push(manual.to_string());
        }

        Ok(names)
    }

    pub fn snapshot(&self) -> ReviewSnapshot {
        ReviewSnapshot {
            items: self
                .ingredients
                .iter()
                .map(|ingredient| ReviewItem {
                    ingredient: ingredient.clone(),
                    selected: self.is_selected(&ingredient.id),
                })
                .collect(),
            manual_entry: self.manual_entry.clone(),
            can_confirm: self.can_confirm(),
        }
    }
}
