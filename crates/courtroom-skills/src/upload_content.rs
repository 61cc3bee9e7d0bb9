//! `upload_argument_tool`, `upload_evidence_tool`, `upload_complaint_tool`.
//!
//! One skill type parameterized by [`ContentKind`]; each takes
//! `{<kind>_one_sentence_summary, <kind>_story}` and posts `{summary, content}` to the backend.

use crate::backend::BackendClient;
use courtroom_core::{
    error_result, parse_payload, AgentSkill, ContentKind, ContentRecord, SkillError, ToolContext,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;

const NARRATIVE_DESCRIPTION: &str = "Upload completely creative narrative to support the your claims \
and protect yourself from your opponent, but also to weaken their position and claims. It should be \
bombastic and hallmark of the Jerry Springer television entertainment program. Do not use names or \
pronouns, but instead use PLAINTIFF and DEFENDANT";

const COMPLAINT_DESCRIPTION: &str = "Upload completely creative narrative about a conflict between \
two private individuals. This problem will lead them to small claims court. It should be bombastic \
and hallmark of the Jerry Springer television entertainment program. Do not use names, but instead \
use PLAINTIFF and DEFENDANT";

pub struct UploadContent {
    kind: ContentKind,
    name: String,
    backend: Arc<BackendClient>,
}

impl UploadContent {
    pub fn new(kind: ContentKind, backend: Arc<BackendClient>) -> Self {
        Self {
            kind,
            name: format!("upload_{}_tool", kind.as_str()),
            backend,
        }
    }

    fn summary_field(&self) -> String {
        format!("{}_one_sentence_summary", self.kind.as_str())
    }

    fn story_field(&self) -> String {
        format!("{}_story", self.kind.as_str())
    }

    fn record_from(&self, args: &Map<String, Value>) -> Result<ContentRecord, SkillError> {
        let field = |key: String| -> Result<String, SkillError> {
            args.get(&key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| format!("{} requires string field '{}'", self.name, key).into())
        };
        Ok(ContentRecord {
            summary: field(self.summary_field())?,
            content: field(self.story_field())?,
        })
    }
}

#[async_trait::async_trait]
impl AgentSkill for UploadContent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        match self.kind {
            ContentKind::Complaint => COMPLAINT_DESCRIPTION,
            ContentKind::Argument | ContentKind::Evidence => NARRATIVE_DESCRIPTION,
        }
    }

    async fn execute(&self, _ctx: &ToolContext, payload: Option<Value>) -> Result<Value, SkillError> {
        let shape = format!(
            "{{ {}: string, {}: string }}",
            self.summary_field(),
            self.story_field()
        );
        let args: Map<String, Value> = parse_payload(&self.name, &shape, payload)?;
        let record = self.record_from(&args)?;

        tracing::info!(target: "courtroom::skills", skill = %self.name, summary = %record.summary, "Storing content");
        match self
            .backend
            .upload_json(self.kind.path(), &serde_json::to_value(&record)?)
            .await
        {
            Ok(uploaded) => Ok(json!({
                "status": "ok",
                "skill": self.name,
                "gateway_url": uploaded.gateway_url,
                "ipfs_hash": uploaded.ipfs_hash,
            })),
            Err(e) => Ok(error_result(&self.name, format!("Upload failed: {}", e))),
        }
    }
}
