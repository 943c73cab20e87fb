use std::sync::Arc;

use crate::domain::{
    common::IdSequence, gateway::ports::LLMClient, session::ports::SessionRepository,
};

/// Shared service carrying every port the domain services are implemented on.
pub struct Service<LLM, SR>
where
    LLM: LLMClient,
    SR: SessionRepository,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) session_repository: Arc<SR>,
    pub(crate) id_sequence: Arc<IdSequence>,
}

impl<LLM, SR> Service<LLM, SR>
where
    LLM: LLMClient,
    SR: SessionRepository,
{
    pub fn new(llm_client: LLM, session_repository: SR) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            session_repository: Arc::new(session_repository),
            id_sequence: Arc::new(IdSequence::new()),
        }
    }
}

impl<LLM, SR> Clone for Service<LLM, SR>
where
    LLM: LLMClient,
    SR: SessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            session_repository: Arc::clone(&self.session_repository),
            id_sequence: Arc::clone(&self.id_sequence),
        }
    }
}
