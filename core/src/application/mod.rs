use tracing::info;

use crate::{
    domain::common::{PantryChefConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{llm::GeminiLLMClient, session::InMemorySessionRepository},
};

pub type PantryChefService = Service<GeminiLLMClient, InMemorySessionRepository>;

pub async fn create_service(config: PantryChefConfig) -> Result<PantryChefService, CoreError> {
    let llm_client = GeminiLLMClient::from_config(&config.llm)?;
    let session_repository = InMemorySessionRepository::with_idle_ttl(config.session.idle_ttl_secs);

    info!(
        model = %config.llm.gemini_model,
        session_idle_ttl_secs = config.session.idle_ttl_secs,
        "PantryChef service ready"
    );

    Ok(Service::new(llm_client, session_repository))
}
