//! `courtroom_register_persona_action`: records a pinned persona URL with `createPersona`.

use courtroom_core::{
    parse_address, parse_payload, AgentSkill, CourtResult, CourtroomRegistrar, RegistrationReceipt,
    SkillError, ToolContext,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

const SKILL_NAME: &str = "courtroom_register_persona_action";

const DESCRIPTION: &str = "This tool registers a persona on the People's Court contract. It takes \
the contract address and the URL of the uploaded persona (personaUri) and returns the transaction \
hash once the transaction is confirmed.";

#[derive(Debug, Deserialize)]
struct RegisterPersonaArgs {
    contract_address: String,
    #[serde(rename = "personaUri", alias = "persona_uri")]
    persona_uri: String,
}

pub struct RegisterPersona {
    registrar: Arc<dyn CourtroomRegistrar>,
}

impl RegisterPersona {
    pub fn new(registrar: Arc<dyn CourtroomRegistrar>) -> Self {
        Self { registrar }
    }

    async fn register(&self, args: &RegisterPersonaArgs) -> CourtResult<RegistrationReceipt> {
        let contract = parse_address(&args.contract_address)?;
        self.registrar.create_persona(contract, &args.persona_uri).await
    }
}

/// Renders a registration outcome the way the agent is used to reading it.
pub(crate) fn registration_result(
    skill: &str,
    what: &str,
    outcome: CourtResult<RegistrationReceipt>,
) -> Value {
    match outcome {
        Ok(receipt) => {
            let tx_hash = receipt.tx_hash_hex();
            tracing::info!(target: "courtroom::skills", skill = %skill, tx = %tx_hash, "Registered {} onchain", what);
            json!({
                "status": "ok",
                "skill": skill,
                "message": format!("Registered {} onchain with transaction hash: {}", what, tx_hash),
                "tx_hash": tx_hash,
                "block_number": receipt.block_number,
            })
        }
        Err(e) => {
            tracing::warn!(target: "courtroom::skills", skill = %skill, error = %e, "Registration failed");
            json!({
                "status": "error",
                "skill": skill,
                "message": format!("Error registering {} onchain {}", what, e),
                "error": e.to_string(),
            })
        }
    }
}

#[async_trait::async_trait]
impl AgentSkill for RegisterPersona {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn execute(&self, _ctx: &ToolContext, payload: Option<Value>) -> Result<Value, SkillError> {
        let args: RegisterPersonaArgs = parse_payload(
            SKILL_NAME,
            "{ contract_address: string, personaUri: string }",
            payload,
        )?;
        let outcome = self.register(&args).await;
        Ok(registration_result(SKILL_NAME, "persona", outcome))
    }
}
