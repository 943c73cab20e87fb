use std::future::Future;

use tracing::{Instrument, Span, debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    gateway::{
        ports::{AiGateway, LLMClient},
        value_objects::ImageUpload,
    },
    session::{
        entities::{Session, Settlement},
        ports::{SessionRepository, SessionService},
        value_objects::SessionSnapshot,
    },
};

impl<LLM, SR> Service<LLM, SR>
where
    LLM: LLMClient + 'static,
    SR: SessionRepository + 'static,
{
    /// Runs the gateway call and its settlement on a detached task, so the
    /// session leaves the waiting state even if the caller is dropped.
    async fn settle_detached<F>(&self, settle: F) -> Result<SessionSnapshot, CoreError>
    where
        F: Future<Output = Result<SessionSnapshot, CoreError>> + Send + 'static,
    {
        tokio::spawn(settle.instrument(Span::current()))
            .await
            .map_err(|e| {
                error!("Settlement task failed: {}", e);
                CoreError::InternalServerError
            })?
    }
}

impl<LLM, SR> SessionService for Service<LLM, SR>
where
    LLM: LLMClient + 'static,
    SR: SessionRepository + 'static,
{
    async fn create_session(&self) -> Result<SessionSnapshot, CoreError> {
        let session = self.session_repository.create(Session::new())?;
        info!(session_id = %session.id, "Session created");

        Ok(session.snapshot())
    }

    async fn get_session(&self, session_id: Uuid) -> Result<SessionSnapshot, CoreError> {
        self.session_repository
            .get_by_id(session_id)?
            .map(|session| session.snapshot())
            .ok_or(CoreError::SessionNotFound)
    }

    #[instrument(skip_all, fields(session_id = %session_id))]
    async fn select_photo(
        &self,
        session_id: Uuid,
        image: ImageUpload,
    ) -> Result<SessionSnapshot, CoreError> {
        let ticket = self
            .session_repository
            .update(session_id, |session| session.begin_detection())??;

        info!("Detecting ingredients");
        let service = self.clone();

        self.settle_detached(async move {
            let outcome = service.detect_ingredients(image).await;

            service.session_repository.update(session_id, |session| {
                match session.complete_detection(&ticket, outcome) {
                    Settlement::Applied(state) => info!(state = %state, "Detection settled"),
                    Settlement::Stale => debug!("Detection result discarded"),
                }
                session.snapshot()
            })
        })
        .await
    }

    async fn toggle_ingredient(
        &self,
        session_id: Uuid,
        ingredient_id: String,
    ) -> Result<SessionSnapshot, CoreError> {
        self.session_repository.update(session_id, |session| {
            session.toggle_ingredient(&ingredient_id)?;
            Ok::<_, CoreError>(session.snapshot())
        })?
    }

    async fn set_manual_entry(
        &self,
        session_id: Uuid,
        text: String,
    ) -> Result<SessionSnapshot, CoreError> {
        self.session_repository.update(session_id, |session| {
            session.set_manual_entry(text)?;
            Ok::<_, CoreError>(session.snapshot())
        })?
    }

    #[instrument(skip_all, fields(session_id = %session_id))]
    async fn confirm_ingredients(&self, session_id: Uuid) -> Result<SessionSnapshot, CoreError> {
        let ticket = self
            .session_repository
            .update(session_id, |session| session.begin_generation())?
            .inspect_err(|e| warn!("Cannot confirm ingredients: {}", e))?;

        info!(ingredients = ?ticket.ingredient_names, "Generating recipes");
        let service = self.clone();

        self.settle_detached(async move {
            let outcome = service
                .generate_recipes(ticket.ingredient_names.clone())
                .await;

            service.session_repository.update(session_id, |session| {
                match session.complete_generation(&ticket, outcome) {
                    Settlement::Applied(state) => info!(state = %state, "Generation settled"),
                    Settlement::Stale => debug!("Generation result discarded"),
                }
                session.snapshot()
            })
        })
        .await
    }

    async fn go_back(&self, session_id: Uuid) -> Result<SessionSnapshot, CoreError> {
        self.session_repository.update(session_id, |session| {
            session.go_back()?;
            Ok::<_, CoreError>(session.snapshot())
        })?
    }

    async fn reset_session(&self, session_id: Uuid) -> Result<SessionSnapshot, CoreError> {
        let snapshot = self.session_repository.update(session_id, |session| {
            session.reset();
            session.snapshot()
        })?;
        info!(session_id = %session_id, "Session reset");

        Ok(snapshot)
    }

    async fn delete_session(&self, session_id: Uuid) -> Result<(), CoreError> {
        self.session_repository.delete(session_id)?;
        info!(session_id = %session_id, "Session deleted");

        Ok(())
    }
}
