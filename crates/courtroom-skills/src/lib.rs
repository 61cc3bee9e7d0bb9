//! Courtroom agent tools and the registry that wires them to configuration.

pub use courtroom_core::{AgentSkill, SkillRegistry};

mod backend;
mod chain_access;
mod create_persona;
mod create_persona_image;
mod get_all_personas;
mod register_argument;
mod register_persona;
mod upload_content;
mod upload_persona;

pub use backend::{BackendClient, UploadResponse};
pub use chain_access::{LazyIndex, LazyRegistrar};
pub use create_persona::CreatePersona;
pub use create_persona_image::CreatePersonaImage;
pub use get_all_personas::GetAllPersonas;
pub use register_argument::RegisterArgument;
pub use register_persona::RegisterPersona;
pub use upload_content::UploadContent;
pub use upload_persona::UploadPersona;

use courtroom_core::{
    CaseIndex, ContentKind, CourtError, CourtResult, CourtroomConfig, CourtroomRegistrar,
    HostedModelClient, HttpPersonaSource, PersonaDiscovery,
};
use std::sync::Arc;

/// Every courtroom tool, built from configuration. Chain access connects on first use; a
/// missing model key leaves the generation tools registered but answering with an error.
pub fn courtroom_registry(cfg: &CourtroomConfig) -> CourtResult<SkillRegistry> {
    let shared = Arc::new(cfg.clone());
    let registrar: Arc<dyn CourtroomRegistrar> = Arc::new(LazyRegistrar::new(shared.clone()));
    let index: Arc<dyn CaseIndex> = Arc::new(LazyIndex::new(shared));
    let models = match HostedModelClient::from_config(cfg) {
        Ok(client) => Some(Arc::new(client)),
        Err(e @ CourtError::Config(_)) => {
            tracing::warn!(target: "courtroom::skills", error = %e, "Generation tools disabled");
            None
        }
        Err(e) => return Err(e),
    };
    let backend = Arc::new(BackendClient::from_config(cfg)?);
    let discovery = Arc::new(PersonaDiscovery::new(
        index,
        Arc::new(HttpPersonaSource::new(cfg.http_timeout())?),
    ));

    Ok(build_registry(SkillParts {
        models,
        persona_model: cfg.persona_model.clone(),
        image_model: cfg.image_model.clone(),
        backend,
        registrar,
        discovery,
    }))
}

/// Collaborators the tools are built from; tests substitute fakes here.
pub struct SkillParts {
    pub models: Option<Arc<HostedModelClient>>,
    pub persona_model: String,
    pub image_model: String,
    pub backend: Arc<BackendClient>,
    pub registrar: Arc<dyn CourtroomRegistrar>,
    pub discovery: Arc<PersonaDiscovery>,
}

pub fn build_registry(parts: SkillParts) -> SkillRegistry {
    let mut registry = SkillRegistry::new();
    registry.register(Arc::new(CreatePersona::new(
        parts.models.clone(),
        parts.persona_model,
    )));
    registry.register(Arc::new(CreatePersonaImage::new(
        parts.models,
        parts.backend.clone(),
        parts.image_model,
    )));
    registry.register(Arc::new(UploadPersona::new(parts.backend.clone())));
    for kind in ContentKind::ALL {
        registry.register(Arc::new(UploadContent::new(kind, parts.backend.clone())));
    }
    registry.register(Arc::new(RegisterPersona::new(parts.registrar.clone())));
    registry.register(Arc::new(RegisterArgument::new(parts.registrar)));
    registry.register(Arc::new(GetAllPersonas::new(parts.discovery)));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_exposes_every_tool() {
        let registry = courtroom_registry(&CourtroomConfig::default()).unwrap();
        let mut names = registry.skill_names();
        names.sort();
        assert_eq!(
            names,
            vec![
                "courtroom_get_all_personas_action",
                "courtroom_register_argument_action",
                "courtroom_register_persona_action",
                "create_persona_image_tool",
                "create_persona_tool",
                "upload_argument_tool",
                "upload_complaint_tool",
                "upload_evidence_tool",
                "upload_persona_tool",
            ]
        );
    }

    #[tokio::test]
    async fn generation_without_key_is_an_error_result() {
        let registry = courtroom_registry(&CourtroomConfig::default()).unwrap();
        let out = registry
            .dispatch(
                "create_persona_tool",
                &courtroom_core::ToolContext::default(),
                Some(serde_json::json!({"persona_description": "a tired plumber"})),
            )
            .await
            .unwrap();
        assert_eq!(out["status"], "error");
        assert!(out["error"].as_str().unwrap().contains("HUGGINGFACE_API_KEY"));
    }
}
