//! Persona discovery for the current case.
//!
//! Reads the current case's plaintiff and defendant from the contract, keeps only the
//! `PersonaCreated` events those two addresses emitted, fetches each persona's JSON and
//! returns them keyed by address with their role attached. The fetched JSON is kept as it
//! is; a persona that cannot be fetched, or is not a JSON object, is logged and skipped,
//! so zero or one entry is a valid result.

use crate::chain::CaseIndex;
use crate::error::{CourtError, CourtResult};
use crate::persona::DiscoveredPersona;
use ethers::types::Address;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Where persona JSON is loaded from, given the URI recorded on-chain.
#[async_trait::async_trait]
pub trait PersonaSource: Send + Sync {
    /// The document must be a JSON object; its contents are not validated.
    async fn fetch_persona(&self, uri: &str) -> CourtResult<Map<String, Value>>;
}

/// Fetches persona JSON over plain HTTP(S), usually an IPFS gateway URL.
pub struct HttpPersonaSource {
    client: reqwest::Client,
}

impl HttpPersonaSource {
    pub fn new(timeout: Duration) -> CourtResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl PersonaSource for HttpPersonaSource {
    async fn fetch_persona(&self, uri: &str) -> CourtResult<Map<String, Value>> {
        let res = self.client.get(uri).send().await?.error_for_status()?;
        let bytes = res.bytes().await?;
        match serde_json::from_slice(&bytes)? {
            Value::Object(doc) => Ok(doc),
            other => Err(CourtError::InvalidInput(format!(
                "persona at {} is not a JSON object: {}",
                uri, other
            ))),
        }
    }
}

/// Current-case personas keyed by participant address.
pub type PersonaMap = BTreeMap<Address, DiscoveredPersona>;

pub struct PersonaDiscovery {
    index: Arc<dyn CaseIndex>,
    source: Arc<dyn PersonaSource>,
}

impl PersonaDiscovery {
    pub fn new(index: Arc<dyn CaseIndex>, source: Arc<dyn PersonaSource>) -> Self {
        Self { index, source }
    }

    /// Fails with [`CourtError::CaseNotFound`] before any fetch when the current case has
    /// no `CaseCreated` log. Later events for the same address overwrite earlier ones.
    pub async fn discover(&self, contract: Address) -> CourtResult<PersonaMap> {
        let case_id = self.index.current_case_id(contract).await?;
        let case = self
            .index
            .find_case_by_id(contract, case_id)
            .await?
            .ok_or(CourtError::CaseNotFound(case_id))?;
        tracing::info!(
            target: "courtroom::discovery",
            case_id = %case.case_id,
            plaintiff = ?case.plaintiff,
            defendant = ?case.defendant,
            "Resolved current case"
        );

        let events = self
            .index
            .persona_events_for_addresses(contract, &case.participants())
            .await?;

        let mut personas = PersonaMap::new();
        for event in events {
            // The index may hand back more than asked for; membership is checked here too.
            let Some(role) = case.role_of(event.user) else {
                continue;
            };
            match self.source.fetch_persona(&event.persona_uri).await {
                Ok(doc) => {
                    personas.insert(event.user, DiscoveredPersona::new(doc, role, event.user));
                }
                Err(e) => {
                    tracing::warn!(
                        target: "courtroom::discovery",
                        uri = %event.persona_uri,
                        error = %e,
                        "Skipping persona that could not be fetched"
                    );
                }
            }
        }
        tracing::info!(target: "courtroom::discovery", count = personas.len(), "Discovery finished");
        Ok(personas)
    }
}
