use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::{generate_timestamp, generate_uuid_v7},
    gateway::errors::{GatewayError, GatewayErrorKind},
    ingredient::entities::Ingredient,
    recipe::entities::Recipe,
    review::entities::{IngredientReview, ReviewError},
    session::value_objects::SessionSnapshot,
};

const DETECTING_MESSAGES: &[&str] = &[
    "Peeking into your fridge...",
    "Identifying that half-empty jar of pickles...",
    "Counting your onions...",
    "Organizing your pantry shelves...",
    "Looking for hidden treasures...",
];

const GENERATING_MESSAGES: &[&str] = &[
    "Consulting the master chefs...",
    "Dreaming up delicious recipes...",
    "Checking for the perfect balance of flavors...",
    "Optimizing for minimum food waste...",
    "Sprinkling some culinary magic...",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AppState {
    Initial,
    Detecting,
    IngredientsReview,
    GeneratingRecipes,
    Results,
}

impl AppState {
    /// A gateway call is outstanding.
    pub fn is_waiting(&self) -> bool {
        matches!(self, AppState::Detecting | AppState::GeneratingRecipes)
    }

    /// Rotating status lines for the waiting screens.
    pub fn status_messages(&self) -> &'static [&'static str] {
        match self {
            AppState::Detecting => DETECTING_MESSAGES,
            AppState::GeneratingRecipes => GENERATING_MESSAGES,
            _ => &[],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Initial => "initial",
            AppState::Detecting => "detecting",
            AppState::IngredientsReview => "ingredients_review",
            AppState::GeneratingRecipes => "generating_recipes",
            AppState::Results => "results",
        }
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SelectPhoto,
    ToggleIngredient,
    EditManualEntry,
    ConfirmIngredients,
    Back,
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionEvent::SelectPhoto => "select photo",
            SessionEvent::ToggleIngredient => "toggle ingredient",
            SessionEvent::EditManualEntry => "edit manual entry",
            SessionEvent::ConfirmIngredients => "confirm ingredients",
            SessionEvent::Back => "go back",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("A request is already in progress ({0})")]
    Busy(AppState),

    #[error("Cannot {event} while in {state}")]
    NotAllowed { state: AppState, event: SessionEvent },

    #[error(transparent)]
    Review(#[from] ReviewError),
}

/// Failure left on the session by the last gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl From<&GatewayError> for SessionError {
    fn from(err: &GatewayError) -> Self {
        let kind = err.kind();
        Self {
            kind,
            message: kind.user_message().to_string(),
        }
    }
}

/// Issued when entering `detecting`; redeemed by `complete_detection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionTicket {
    pub session_id: Uuid,
    pub token: u64,
}

/// Issued when entering `generating_recipes`; redeemed by `complete_generation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    pub session_id: Uuid,
    pub token: u64,
    pub ingredient_names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied(AppState),
    /// The session was reset (or moved on) while the call was running.
    Stale,
}

/// One client's detection/generation flow.
///
/// `token` changes on every reset; completions carrying an older token are
/// dropped so a late response can never overwrite a fresh session.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    state: AppState,
    token: u64,
    review: Option<IngredientReview>,
    recipes: Vec<Recipe>,
    error: Option<SessionError>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let (now, _) = generate_timestamp();

        Self {
            id: generate_uuid_v7(),
            state: AppState::Initial,
            token: 0,
            review: None,
            recipes: Vec::new(),
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn review(&self) -> Option<&IngredientReview> {
        self.review.as_ref()
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        self.review
            .as_ref()
            .map(IngredientReview::ingredients)
            .unwrap_or_default()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    fn ensure(&self, expected: AppState, event: SessionEvent) -> Result<(), TransitionError> {
        if self.state.is_waiting() {
            return Err(TransitionError::Busy(self.state));
        }
        if self.state != expected {
            return Err(TransitionError::NotAllowed {
                state: self.state,
                event,
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// The review exists whenever the state is `ingredients_review`.
    fn review_mut(
        &mut self,
        event: SessionEvent,
    ) -> Result<&mut IngredientReview, TransitionError> {
        let state = self.state;
        self.review
            .as_mut()
            .ok_or(TransitionError::NotAllowed { state, event })
    }

    /// initial → detecting
    pub fn begin_detection(&mut self) -> Result<DetectionTicket, TransitionError> {
        self.ensure(AppState::Initial, SessionEvent::SelectPhoto)?;

        self.error = None;
        self.state = AppState::Detecting;
        self.touch();

        Ok(DetectionTicket {
            session_id: self.id,
            token: self.token,
        })
    }

    /// detecting → ingredients_review, or back to initial on failure.
    pub fn complete_detection(
        &mut self,
        ticket: &DetectionTicket,
        outcome: Result<Vec<Ingredient>, GatewayError>,
    ) -> Settlement {
        if ticket.session_id != self.id
            || ticket.token != self.token
            || self.state != AppState::Detecting
        {
            debug!(session_id = %self.id, state = %self.state, "Dropping stale detection result");
            return Settlement::Stale;
        }

        match outcome {
            Ok(ingredients) => {
                self.review = Some(IngredientReview::new(ingredients));
                self.state = AppState::IngredientsReview;
            }
            Err(err) => {
                self.error = Some(SessionError::from(&err));
                self.review = None;
                self.state = AppState::Initial;
            }
        }
        self.touch();

        Settlement::Applied(self.state)
    }

    pub fn toggle_ingredient(&mut self, ingredient_id: &str) -> Result<bool, TransitionError> {
        self.ensure(AppState::IngredientsReview, SessionEvent::ToggleIngredient)?;

        let selected = self
            .review_mut(SessionEvent::ToggleIngredient)?
            .toggle(ingredient_id)?;
        self.touch();

        Ok(selected)
    }

    pub fn set_manual_entry(&mut self, text: impl Into<String>) -> Result<(), TransitionError> {
        self.ensure(AppState::IngredientsReview, SessionEvent::EditManualEntry)?;

        self.review_mut(SessionEvent::EditManualEntry)?
            .set_manual_entry(text);
        self.touch();

        Ok(())
    }

    /// ingredients_review → generating_recipes. An empty confirmation leaves
    /// the session untouched.
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, TransitionError> {
        self.ensure(AppState::IngredientsReview, SessionEvent::ConfirmIngredients)?;

        let ingredient_names = self
            .review_mut(SessionEvent::ConfirmIngredients)?
            .confirm()?;

        self.error = None;
        self.state = AppState::GeneratingRecipes;
        self.touch();

        Ok(GenerationTicket {
            session_id: self.id,
            token: self.token,
            ingredient_names,
        })
    }

    /// generating_recipes → results, or back to ingredients_review on failure.
    pub fn complete_generation(
        &mut self,
        ticket: &GenerationTicket,
        outcome: Result<Vec<Recipe>, GatewayError>,
    ) -> Settlement {
        if ticket.session_id != self.id
            || ticket.token != self.token
            || self.state != AppState::GeneratingRecipes
        {
            debug!(session_id = %self.id, state = %self.state, "Dropping stale generation result");
            return Settlement::Stale;
        }

        match outcome {
            Ok(recipes) => {
                self.recipes = recipes;
                self.state = AppState::Results;
            }
            Err(err) => {
                self.error = Some(SessionError::from(&err));
                self.state = AppState::IngredientsReview;
            }
        }
        self.touch();

        Settlement::Applied(self.state)
    }

    /// ingredients_review → initial, discarding the detected ingredients.
    pub fn go_back(&mut self) -> Result<(), TransitionError> {
        self.ensure(AppState::IngredientsReview, SessionEvent::Back)?;

        self.review = None;
        self.state = AppState::Initial;
        self.touch();

        Ok(())
    }

    /// Any state → initial. Invalidates outstanding tickets.
    pub fn reset(&mut self) {
        self.token = self.token.wrapping_add(1);
        self.state = AppState::Initial;
        self.review = None;
        self.recipes.clear();
        self.error = None;
        self.touch();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            state: self.state,
            error: self.error.as_ref().map(|e| e.message.clone()),
            review: self.review.as_ref().map(IngredientReview::snapshot),
            recipes: self.recipes.clone(),
            status_messages: self
                .state
                .status_messages()
                .iter()
                .map(|m| m.to_string())
                .collect(),
            updated_at: self.updated_at,
        }
    }
}
