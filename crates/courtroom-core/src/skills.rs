//! Agent skill trait and registry.
//!
//! Every courtroom tool the agent can call implements [`AgentSkill`]. A skill answers with
//! `{"status": "ok" | "error", "skill": <name>, ...}`; an absent or malformed payload is the
//! only thing it reports as `Err`.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// Error type skills return for input problems.
pub type SkillError = Box<dyn std::error::Error + Send + Sync>;

pub const DEFAULT_AGENT_ID: &str = "default";

/// Who is calling a skill, for log correlation.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ToolContext {
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Optional correlation id for request tracing.
    #[serde(default)]
    pub correlation_id: Option<String>,
}

impl ToolContext {
    pub fn resolved_agent_id(&self) -> &str {
        self.agent_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_AGENT_ID)
    }
}

#[derive(Debug)]
struct UnknownSkill(String);

impl fmt::Display for UnknownSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown skill: {}", self.0)
    }
}

impl std::error::Error for UnknownSkill {}

/// Trait implemented by all agent capabilities (skills).
#[async_trait::async_trait]
pub trait AgentSkill: Send + Sync {
    /// Unique skill name for routing.
    fn name(&self) -> &str;

    /// What the agent is told about the tool.
    fn description(&self) -> &str;

    async fn execute(&self, ctx: &ToolContext, payload: Option<Value>) -> Result<Value, SkillError>;
}

/// Registry of agent skills that can be dispatched by name.
pub struct SkillRegistry {
    skills: Vec<Arc<dyn AgentSkill>>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self { skills: Vec::new() }
    }

    pub fn register(&mut self, skill: Arc<dyn AgentSkill>) {
        self.skills.push(skill);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn AgentSkill>> {
        self.skills.iter().find(|s| s.name() == name).cloned()
    }

    /// Returns the names of all registered skills, in registration order.
    pub fn skill_names(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.name().to_string()).collect()
    }

    /// `(name, description)` pairs for tool listings.
    pub fn describe(&self) -> Vec<(String, String)> {
        self.skills
            .iter()
            .map(|s| (s.name().to_string(), s.description().to_string()))
            .collect()
    }

    pub async fn dispatch(
        &self,
        name: &str,
        ctx: &ToolContext,
        payload: Option<Value>,
    ) -> Result<Value, SkillError> {
        let skill = self.get(name).ok_or_else(|| UnknownSkill(name.to_string()))?;
        tracing::debug!(
            target: "courtroom::skills",
            skill = %name,
            agent = %ctx.resolved_agent_id(),
            correlation_id = ?ctx.correlation_id,
            "Dispatching skill"
        );
        skill.execute(ctx, payload).await
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Deserializes a skill payload, naming the skill and its expected shape on failure.
pub fn parse_payload<T: DeserializeOwned>(
    skill: &str,
    shape: &str,
    payload: Option<Value>,
) -> Result<T, SkillError> {
    let payload = payload.ok_or_else(|| format!("{} requires payload: {}", skill, shape))?;
    serde_json::from_value(payload)
        .map_err(|e| format!("{} payload invalid ({}); expected {}", skill, e, shape).into())
}

/// `{"status":"error","skill":..,"error":..}` with a warning logged under the skills target.
pub fn error_result(skill: &str, error: impl fmt::Display) -> Value {
    let error = error.to_string();
    tracing::warn!(target: "courtroom::skills", skill = %skill, error = %error, "Skill failed");
    json!({
        "status": "error",
        "skill": skill,
        "error": error,
    })
}
