//! `courtroom_register_argument_action`: records a pinned argument URL with `submitArgument`.

use crate::register_persona::registration_result;
use courtroom_core::{
    parse_address, parse_case_id, parse_payload, AgentSkill, CourtResult, CourtroomRegistrar,
    RegistrationReceipt, SkillError, ToolContext,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const SKILL_NAME: &str = "courtroom_register_argument_action";

const DESCRIPTION: &str = "This tool submits an argument for a case on the People's Court contract. \
It takes the contract address, the case id (a decimal number) and the URL of the uploaded argument \
(argumentUri) and returns the transaction hash once the transaction is confirmed.";

#[derive(Debug, Deserialize)]
struct RegisterArgumentArgs {
    contract_address: String,
    /// Decimal string; a bare JSON number is accepted too.
    #[serde(rename = "caseId", alias = "case_id")]
    case_id: Value,
    #[serde(rename = "argumentUri", alias = "argument_uri")]
    argument_uri: String,
}

pub struct RegisterArgument {
    registrar: Arc<dyn CourtroomRegistrar>,
}

impl RegisterArgument {
    pub fn new(registrar: Arc<dyn CourtroomRegistrar>) -> Self {
        Self { registrar }
    }

    async fn register(&self, args: &RegisterArgumentArgs) -> CourtResult<RegistrationReceipt> {
        let contract = parse_address(&args.contract_address)?;
        let raw_id = match &args.case_id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let case_id = parse_case_id(&raw_id)?;
        self.registrar
            .submit_argument(contract, case_id, &args.argument_uri)
            .await
    }
}

#[async_trait::async_trait]
impl AgentSkill for RegisterArgument {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn execute(&self, _ctx: &ToolContext, payload: Option<Value>) -> Result<Value, SkillError> {
        let args: RegisterArgumentArgs = parse_payload(
            SKILL_NAME,
            "{ contract_address: string, caseId: string, argumentUri: string }",
            payload,
        )?;
        let outcome = self.register(&args).await;
        Ok(registration_result(SKILL_NAME, "argument", outcome))
    }
}
