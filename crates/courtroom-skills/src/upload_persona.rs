//! `upload_persona_tool`: attaches the portrait URL to the drafted persona and pins it via the backend.

use crate::backend::BackendClient;
use courtroom_core::{error_result, parse_payload, AgentSkill, SkillError, ToolContext};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

const SKILL_NAME: &str = "upload_persona_tool";

const DESCRIPTION: &str = "Upload complete persona to a decentralized image of the courtroom \
participant; all details are to be serialized in the JSON schema provided. The output is a URL of \
the persona";

const SHAPE: &str = "{ persona_image_url: string, persona_struct: string (JSON object: name, age, \
occupation, physical_description, personality, details { children, criminal_background, \
personalHistory, motivations, relationships, quirks, location }) }";

#[derive(Debug, Deserialize)]
struct UploadPersonaArgs {
    persona_image_url: String,
    persona_struct: String,
}

pub struct UploadPersona {
    backend: Arc<BackendClient>,
}

impl UploadPersona {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }
}

#[async_trait::async_trait]
impl AgentSkill for UploadPersona {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn execute(&self, _ctx: &ToolContext, payload: Option<Value>) -> Result<Value, SkillError> {
        let args: UploadPersonaArgs = parse_payload(SKILL_NAME, SHAPE, payload)?;
        let mut persona = match serde_json::from_str::<Value>(&args.persona_struct)? {
            Value::Object(map) => map,
            _ => return Err(format!("{}: persona_struct must be a JSON object", SKILL_NAME).into()),
        };
        persona.insert("image_url".to_string(), Value::String(args.persona_image_url));

        match self.backend.upload_json("/personas", &Value::Object(persona)).await {
            Ok(uploaded) => Ok(json!({
                "status": "ok",
                "skill": SKILL_NAME,
                "gateway_url": uploaded.gateway_url,
                "ipfs_hash": uploaded.ipfs_hash,
            })),
            Err(e) => Ok(error_result(SKILL_NAME, format!("Upload failed: {}", e))),
        }
    }
}
