//! `courtroom_get_all_personas_action`: personas of the current case's plaintiff and defendant.

use courtroom_core::{
    error_result, parse_address, parse_payload, AgentSkill, CourtResult, PersonaDiscovery,
    PersonaMap, SkillError, ToolContext,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

const SKILL_NAME: &str = "courtroom_get_all_personas_action";

const DESCRIPTION: &str = "This tool returns the personas of the plaintiff and the defendant in the \
current case of the People's Court contract, keyed by wallet address. Each persona carries its \
COURTROOM_ROLE (plaintiff or defendant) and WALLET_ADDRESS. Fewer than two entries means a persona \
is not registered yet or could not be fetched.";

#[derive(Debug, Deserialize)]
struct GetAllPersonasArgs {
    contract_address: String,
}

pub struct GetAllPersonas {
    discovery: Arc<PersonaDiscovery>,
}

impl GetAllPersonas {
    pub fn new(discovery: Arc<PersonaDiscovery>) -> Self {
        Self { discovery }
    }

    async fn discover(&self, contract_address: &str) -> CourtResult<PersonaMap> {
        let contract = parse_address(contract_address)?;
        self.discovery.discover(contract).await
    }
}

#[async_trait::async_trait]
impl AgentSkill for GetAllPersonas {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn execute(&self, _ctx: &ToolContext, payload: Option<Value>) -> Result<Value, SkillError> {
        let args: GetAllPersonasArgs =
            parse_payload(SKILL_NAME, "{ contract_address: string }", payload)?;
        let personas = match self.discover(&args.contract_address).await {
            Ok(p) => p,
            Err(e) => return Ok(error_result(SKILL_NAME, e)),
        };

        let count = personas.len();
        let mut by_address = Map::new();
        for persona in personas.into_values() {
            let key = persona.wallet_address.clone();
            by_address.insert(key, Value::Object(persona.into_document()));
        }
        Ok(json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "personas": by_address,
            "count": count,
        }))
    }
}
