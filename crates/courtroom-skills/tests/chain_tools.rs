use courtroom_core::{
    Address, AgentSkill, CaseIndex, CaseRecord, CourtError, CourtResult, CourtroomRegistrar,
    HttpPersonaSource, PersonaDiscovery, PersonaEvent, RegistrationReceipt, ToolContext, TxHash,
    U256,
};
use courtroom_skills::{GetAllPersonas, RegisterArgument, RegisterPersona};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONTRACT: &str = "0x00000000000000000000000000000000000000ff";

#[derive(Default)]
struct RecordingRegistrar {
    calls: Mutex<Vec<(String, Option<U256>, String)>>,
    fail_with: Option<String>,
}

impl RecordingRegistrar {
    fn outcome(&self) -> CourtResult<RegistrationReceipt> {
        match &self.fail_with {
            Some(reason) => Err(CourtError::Chain(reason.clone())),
            None => Ok(RegistrationReceipt {
                tx_hash: TxHash::from_low_u64_be(0xBEEF),
                block_number: Some(21_700_000),
            }),
        }
    }
}

#[async_trait::async_trait]
impl CourtroomRegistrar for RecordingRegistrar {
    async fn create_persona(
        &self,
        _contract: Address,
        persona_uri: &str,
    ) -> CourtResult<RegistrationReceipt> {
        self.calls
            .lock()
            .unwrap()
            .push(("createPersona".into(), None, persona_uri.into()));
        self.outcome()
    }

    async fn submit_argument(
        &self,
        _contract: Address,
        case_id: U256,
        argument_uri: &str,
    ) -> CourtResult<RegistrationReceipt> {
        self.calls
            .lock()
            .unwrap()
            .push(("submitArgument".into(), Some(case_id), argument_uri.into()));
        self.outcome()
    }
}

#[tokio::test]
async fn register_persona_reports_transaction_hash() {
    let registrar = Arc::new(RecordingRegistrar::default());
    let out = RegisterPersona::new(registrar.clone())
        .execute(
            &ToolContext::default(),
            Some(json!({"contract_address": CONTRACT, "personaUri": "https://gw/ipfs/bafyP"})),
        )
        .await
        .unwrap();

    let hash = format!("{:?}", TxHash::from_low_u64_be(0xBEEF));
    assert_eq!(out["status"], "ok");
    assert_eq!(
        out["message"],
        format!("Registered persona onchain with transaction hash: {}", hash)
    );
    assert_eq!(out["tx_hash"], hash);
    assert_eq!(
        registrar.calls.lock().unwrap()[0],
        ("createPersona".to_string(), None, "https://gw/ipfs/bafyP".to_string())
    );
}

#[tokio::test]
async fn register_persona_failure_keeps_message_prefix() {
    let registrar = Arc::new(RecordingRegistrar {
        fail_with: Some("insufficient funds".into()),
        ..Default::default()
    });
    let out = RegisterPersona::new(registrar)
        .execute(
            &ToolContext::default(),
            Some(json!({"contract_address": CONTRACT, "personaUri": "https://gw/ipfs/bafyP"})),
        )
        .await
        .unwrap();
    assert_eq!(out["status"], "error");
    assert!(out["message"]
        .as_str()
        .unwrap()
        .starts_with("Error registering persona onchain"));
    assert!(out["message"].as_str().unwrap().contains("insufficient funds"));
}

#[tokio::test]
async fn register_argument_parses_decimal_case_id() {
    let registrar = Arc::new(RecordingRegistrar::default());
    let out = RegisterArgument::new(registrar.clone())
        .execute(
            &ToolContext::default(),
            Some(json!({
                "contract_address": CONTRACT,
                "caseId": "7",
                "argumentUri": "https://gw/ipfs/bafyArg"
            })),
        )
        .await
        .unwrap();
    assert_eq!(out["status"], "ok");
    assert!(out["message"]
        .as_str()
        .unwrap()
        .starts_with("Registered argument onchain with transaction hash: 0x"));
    assert_eq!(registrar.calls.lock().unwrap()[0].1, Some(U256::from(7)));
}

#[tokio::test]
async fn register_argument_rejects_non_numeric_case_id_without_sending() {
    let registrar = Arc::new(RecordingRegistrar::default());
    let out = RegisterArgument::new(registrar.clone())
        .execute(
            &ToolContext::default(),
            Some(json!({
                "contract_address": CONTRACT,
                "caseId": "seven",
                "argumentUri": "https://gw/ipfs/bafyArg"
            })),
        )
        .await
        .unwrap();
    assert_eq!(out["status"], "error");
    assert!(out["message"]
        .as_str()
        .unwrap()
        .starts_with("Error registering argument onchain"));
    assert!(registrar.calls.lock().unwrap().is_empty());
}

struct StaticIndex {
    case: CaseRecord,
    events: Vec<PersonaEvent>,
}

#[async_trait::async_trait]
impl CaseIndex for StaticIndex {
    async fn current_case_id(&self, _contract: Address) -> CourtResult<U256> {
        Ok(self.case.case_id)
    }

    async fn find_case_by_id(
        &self,
        _contract: Address,
        case_id: U256,
    ) -> CourtResult<Option<CaseRecord>> {
        Ok((case_id == self.case.case_id).then(|| self.case.clone()))
    }

    async fn persona_events_for_addresses(
        &self,
        _contract: Address,
        users: &[Address],
    ) -> CourtResult<Vec<PersonaEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|e| users.contains(&e.user))
            .cloned()
            .collect())
    }
}

#[tokio::test]
async fn get_all_personas_keys_by_checksummed_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ipfs/a.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Alice",
            "age": 31,
            "occupation": "Cashier",
            "physical_description": "Five feet four inches",
            "image_url": "https://gw/ipfs/imgA",
            "personality": "Chatty"
        })))
        .mount(&server)
        .await;

    let plaintiff = Address::from_low_u64_be(0xA);
    let index = StaticIndex {
        case: CaseRecord {
            case_id: U256::from(7),
            title: "Fence dispute".into(),
            plaintiff,
            defendant: Address::from_low_u64_be(0xB),
            prize_pool: U256::zero(),
            nft_id: U256::zero(),
        },
        events: vec![
            PersonaEvent {
                user: plaintiff,
                persona_uri: format!("{}/ipfs/a.json", server.uri()),
            },
            PersonaEvent {
                user: Address::from_low_u64_be(0xC),
                persona_uri: format!("{}/ipfs/c.json", server.uri()),
            },
        ],
    };
    let discovery = Arc::new(PersonaDiscovery::new(
        Arc::new(index),
        Arc::new(HttpPersonaSource::new(Duration::from_secs(5)).unwrap()),
    ));

    let out = GetAllPersonas::new(discovery)
        .execute(&ToolContext::default(), Some(json!({"contract_address": CONTRACT})))
        .await
        .unwrap();

    assert_eq!(out["status"], "ok");
    assert_eq!(out["count"], 1);
    let personas = out["personas"].as_object().unwrap();
    let (key, persona) = personas.iter().next().unwrap();
    assert_eq!(key.to_lowercase(), format!("{:?}", plaintiff));
    assert_eq!(persona["COURTROOM_ROLE"], "plaintiff");
    assert_eq!(persona["WALLET_ADDRESS"], key.as_str());
    assert_eq!(persona["name"], "Alice");
}

#[tokio::test]
async fn get_all_personas_invalid_contract_is_an_error_result() {
    let index = StaticIndex {
        case: CaseRecord {
            case_id: U256::one(),
            title: String::new(),
            plaintiff: Address::zero(),
            defendant: Address::zero(),
            prize_pool: U256::zero(),
            nft_id: U256::zero(),
        },
        events: vec![],
    };
    let discovery = Arc::new(PersonaDiscovery::new(
        Arc::new(index),
        Arc::new(HttpPersonaSource::new(Duration::from_secs(5)).unwrap()),
    ));
    let out = GetAllPersonas::new(discovery)
        .execute(&ToolContext::default(), Some(json!({"contract_address": "0xnope"})))
        .await
        .unwrap();
    assert_eq!(out["status"], "error");
}
