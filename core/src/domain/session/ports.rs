use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    gateway::value_objects::ImageUpload,
    session::{entities::Session, value_objects::SessionSnapshot},
};

/// Registry of live sessions.
///
/// `update` runs the closure while holding exclusive access to the session,
/// which is what makes a check-then-transition atomic.
pub trait SessionRepository: Send + Sync {
    fn create(&self, session: Session) -> Result<Session, CoreError>;

    fn get_by_id(&self, session_id: Uuid) -> Result<Option<Session>, CoreError>;

    fn update<T, F>(&self, session_id: Uuid, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Session) -> T;

    fn delete(&self, session_id: Uuid) -> Result<(), CoreError>;
}

/// Service trait driving the detect → review → generate flow
pub trait SessionService: Send + Sync {
    fn create_session(&self) -> impl Future<Output = Result<SessionSnapshot, CoreError>> + Send;

    fn get_session(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<SessionSnapshot, CoreError>> + Send;

    /// Runs a full detection cycle. A failed detection is reported through
    /// the returned snapshot, not as an `Err`.
    fn select_photo(
        &self,
        session_id: Uuid,
        image: ImageUpload,
    ) -> impl Future<Output = Result<SessionSnapshot, CoreError>> + Send;

    fn toggle_ingredient(
        &self,
        session_id: Uuid,
        ingredient_id: String,
    ) -> impl Future<Output = Result<SessionSnapshot, CoreError>> + Send;

    fn set_manual_entry(
        &self,
        session_id: Uuid,
        text: String,
    ) -> impl Future<Output = Result<SessionSnapshot, CoreError>> + Send;

    /// Runs a full generation cycle from the confirmed ingredients.
    fn confirm_ingredients(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<SessionSnapshot, CoreError>> + Send;

    fn go_back(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<SessionSnapshot, CoreError>> + Send;

    fn reset_session(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<SessionSnapshot, CoreError>> + Send;

    fn delete_session(&self, session_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}
