//! `create_persona_tool`: drafts a persona profile with the hosted chat model.

use courtroom_core::prompts::persona_prompt;
use courtroom_core::{error_result, parse_payload, AgentSkill, HostedModelClient, SkillError, ToolContext};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

const SKILL_NAME: &str = "create_persona_tool";

const DESCRIPTION: &str = "Create a highly descriptive persona of an adult person who is about to be \
seen in the courtroom and must include as much detail of personality quirks as possible. They are an \
average type of person. Middle or lower class.";

const MAX_TOKENS: u32 = 500;

#[derive(Debug, Deserialize)]
struct CreatePersonaArgs {
    persona_description: String,
}

pub struct CreatePersona {
    models: Option<Arc<HostedModelClient>>,
    model: String,
}

impl CreatePersona {
    /// `models` is `None` when no hosted-model key is configured; the skill then reports an error result.
    pub fn new(models: Option<Arc<HostedModelClient>>, model: impl Into<String>) -> Self {
        Self {
            models,
            model: model.into(),
        }
    }
}

#[async_trait::async_trait]
impl AgentSkill for CreatePersona {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn execute(&self, _ctx: &ToolContext, payload: Option<Value>) -> Result<Value, SkillError> {
        let args: CreatePersonaArgs =
            parse_payload(SKILL_NAME, "{ persona_description: string }", payload)?;
        let Some(models) = self.models.as_ref() else {
            return Ok(error_result(SKILL_NAME, "HUGGINGFACE_API_KEY is not set"));
        };

        tracing::info!(target: "courtroom::skills", skill = SKILL_NAME, "Drafting persona");
        let prompt = persona_prompt(&args.persona_description);
        match models.stream_chat(&self.model, &prompt, MAX_TOKENS).await {
            Ok(persona) => Ok(json!({
                "status": "ok",
                "skill": SKILL_NAME,
                "persona": persona,
            })),
            Err(e) => Ok(error_result(SKILL_NAME, format!("Error generating persona: {}", e))),
        }
    }
}
