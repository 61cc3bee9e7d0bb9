//! `create_persona_image_tool`: renders a courtroom portrait and uploads it through the backend.

use crate::backend::BackendClient;
use courtroom_core::prompts::portrait_prompt;
use courtroom_core::{
    error_result, parse_payload, AgentSkill, CourtError, CourtResult, HostedModelClient, SkillError,
    ToolContext,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::Cursor;
use std::sync::Arc;

const SKILL_NAME: &str = "create_persona_image_tool";

const DESCRIPTION: &str = "Create a decentralized image of the courtroom participant and receive an \
image gateway url. When it fails, you should retry up to three times.";

#[derive(Debug, Deserialize)]
struct CreatePersonaImageArgs {
    person_name: String,
    persona_struct: String,
}

pub struct CreatePersonaImage {
    models: Option<Arc<HostedModelClient>>,
    backend: Arc<BackendClient>,
    model: String,
}

impl CreatePersonaImage {
    pub fn new(
        models: Option<Arc<HostedModelClient>>,
        backend: Arc<BackendClient>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            models,
            backend,
            model: model.into(),
        }
    }

    async fn render_and_upload(
        &self,
        models: &HostedModelClient,
        args: &CreatePersonaImageArgs,
    ) -> CourtResult<String> {
        let prompt = portrait_prompt(&args.persona_struct);
        let raw = models.text_to_image(&self.model, &prompt).await?;
        let png = reencode_png(&raw)?;
        let file_name = format!("{}.png", args.person_name);
        let uploaded = self.backend.upload_image(&file_name, png).await?;
        Ok(uploaded.gateway_url)
    }
}

/// Decodes whatever format the model returned and writes it back out as PNG.
pub(crate) fn reencode_png(raw: &[u8]) -> CourtResult<Vec<u8>> {
    let img = image::load_from_memory(raw).map_err(|e| CourtError::Image(e.to_string()))?;
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
        .map_err(|e| CourtError::Image(e.to_string()))?;
    Ok(png)
}

#[async_trait::async_trait]
impl AgentSkill for CreatePersonaImage {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn execute(&self, _ctx: &ToolContext, payload: Option<Value>) -> Result<Value, SkillError> {
        let args: CreatePersonaImageArgs = parse_payload(
            SKILL_NAME,
            "{ person_name: string, persona_struct: string }",
            payload,
        )?;
        let Some(models) = self.models.as_ref() else {
            return Ok(error_result(SKILL_NAME, "HUGGINGFACE_API_KEY is not set"));
        };

        tracing::info!(target: "courtroom::skills", skill = SKILL_NAME, person = %args.person_name, "Starting image generation");
        match self.render_and_upload(models, &args).await {
            Ok(gateway_url) => Ok(json!({
                "status": "ok",
                "skill": SKILL_NAME,
                "gateway_url": gateway_url,
            })),
            Err(e) => Ok(error_result(SKILL_NAME, e)),
        }
    }
}
