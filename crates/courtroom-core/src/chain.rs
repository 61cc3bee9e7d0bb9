//! People's Court contract access via ethers-rs.
//!
//! Reads go through [`CaseIndex`] (current case id, case logs, persona logs); writes go
//! through [`CourtroomRegistrar`]. The ethers implementations are [`EventLogIndex`] and
//! [`EthersCourtroom`].

use crate::config::CourtroomConfig;
use crate::error::{CourtError, CourtResult};
use crate::persona::{CaseRecord, PersonaEvent, RegistrationReceipt};
use ethers::prelude::*;
use ethers::providers::ProviderExt;
use std::sync::Arc;

abigen!(
    PeoplesCourt,
    r#"[
        function currentCaseId() external view returns (uint256)
        function createPersona(string personaUri) external
        function submitArgument(uint256 caseId, string argumentUri) external
        event CaseCreated(uint256 indexed caseId, string title, address plaintiff, address defendant, uint256 prizePool, uint256 nftId)
        event PersonaCreated(address indexed user, string personaUri)
    ]"#
);

/// Read side of the contract, as needed by persona discovery.
#[async_trait::async_trait]
pub trait CaseIndex: Send + Sync {
    async fn current_case_id(&self, contract: Address) -> CourtResult<U256>;

    /// The `CaseCreated` log for `case_id`, if one was emitted.
    async fn find_case_by_id(&self, contract: Address, case_id: U256)
        -> CourtResult<Option<CaseRecord>>;

    /// `PersonaCreated` logs emitted by any of `users`, in log order.
    async fn persona_events_for_addresses(
        &self,
        contract: Address,
        users: &[Address],
    ) -> CourtResult<Vec<PersonaEvent>>;
}

/// Write side of the contract. Both calls resolve once the transaction is mined.
#[async_trait::async_trait]
pub trait CourtroomRegistrar: Send + Sync {
    async fn create_persona(
        &self,
        contract: Address,
        persona_uri: &str,
    ) -> CourtResult<RegistrationReceipt>;

    async fn submit_argument(
        &self,
        contract: Address,
        case_id: U256,
        argument_uri: &str,
    ) -> CourtResult<RegistrationReceipt>;
}

/// Parses a `0x`-prefixed contract or wallet address.
pub fn parse_address(raw: &str) -> CourtResult<Address> {
    raw.trim()
        .parse::<Address>()
        .map_err(|e| CourtError::InvalidInput(format!("invalid address {:?}: {}", raw, e)))
}

/// Parses a decimal case id.
pub fn parse_case_id(raw: &str) -> CourtResult<U256> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CourtError::InvalidInput(format!(
            "case id must be a decimal number, got {:?}",
            raw
        )));
    }
    U256::from_dec_str(raw)
        .map_err(|e| CourtError::InvalidInput(format!("case id {:?} out of range: {}", raw, e)))
}

/// Scans contract logs over HTTP JSON-RPC, always from `start_block`.
pub struct EventLogIndex {
    provider: Arc<Provider<Http>>,
    start_block: u64,
}

impl EventLogIndex {
    pub fn new(provider: Provider<Http>, start_block: u64) -> Self {
        Self {
            provider: Arc::new(provider),
            start_block,
        }
    }

    pub fn from_config(cfg: &CourtroomConfig) -> CourtResult<Self> {
        let provider = Provider::<Http>::try_from(cfg.rpc_url()?).map_err(CourtError::chain)?;
        Ok(Self::new(provider, cfg.discovery_start_block))
    }

    fn contract(&self, address: Address) -> PeoplesCourt<Provider<Http>> {
        PeoplesCourt::new(address, self.provider.clone())
    }
}

#[async_trait::async_trait]
impl CaseIndex for EventLogIndex {
    async fn current_case_id(&self, contract: Address) -> CourtResult<U256> {
        self.contract(contract)
            .current_case_id()
            .call()
            .await
            .map_err(CourtError::chain)
    }

    async fn find_case_by_id(
        &self,
        contract: Address,
        case_id: U256,
    ) -> CourtResult<Option<CaseRecord>> {
        let logs = self
            .contract(contract)
            .case_created_filter()
            .from_block(self.start_block)
            .query()
            .await
            .map_err(CourtError::chain)?;
        tracing::debug!(target: "courtroom::chain", count = logs.len(), "Scanned CaseCreated logs");
        Ok(logs
            .into_iter()
            .find(|log| log.case_id == case_id)
            .map(|log| CaseRecord {
                case_id: log.case_id,
                title: log.title,
                plaintiff: log.plaintiff,
                defendant: log.defendant,
                prize_pool: log.prize_pool,
                nft_id: log.nft_id,
            }))
    }

    async fn persona_events_for_addresses(
        &self,
        contract: Address,
        users: &[Address],
    ) -> CourtResult<Vec<PersonaEvent>> {
        let logs = self
            .contract(contract)
            .persona_created_filter()
            .from_block(self.start_block)
            .query()
            .await
            .map_err(CourtError::chain)?;
        tracing::debug!(target: "courtroom::chain", count = logs.len(), "Scanned PersonaCreated logs");
        Ok(logs
            .into_iter()
            .filter(|log| users.contains(&log.user))
            .map(|log| PersonaEvent {
                user: log.user,
                persona_uri: log.persona_uri,
            })
            .collect())
    }
}

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Signs and sends registration transactions with a configured private key.
pub struct EthersCourtroom {
    client: Arc<SignerClient>,
}

impl EthersCourtroom {
    /// Connects to `rpc_url`, asks the node for its chain id and binds the wallet to it.
    /// Receipt polling follows the endpoint: fast for local nodes, half a block otherwise.
    pub async fn connect(rpc_url: &str, private_key: &str) -> CourtResult<Self> {
        let provider = Provider::<Http>::try_connect(rpc_url)
            .await
            .map_err(CourtError::chain)?;
        let chain_id = provider.get_chainid().await.map_err(CourtError::chain)?;
        let wallet = private_key
            .trim()
            .parse::<LocalWallet>()
            .map_err(|e| CourtError::Config(format!("invalid wallet private key: {}", e)))?
            .with_chain_id(chain_id.as_u64());
        tracing::info!(
            target: "courtroom::chain",
            chain_id = chain_id.as_u64(),
            signer = ?wallet.address(),
            "Registrar connected"
        );
        Ok(Self {
            client: Arc::new(SignerMiddleware::new(provider, wallet)),
        })
    }

    pub async fn from_config(cfg: &CourtroomConfig) -> CourtResult<Self> {
        Self::connect(cfg.rpc_url()?, cfg.wallet_private_key()?).await
    }

    fn contract(&self, address: Address) -> PeoplesCourt<SignerClient> {
        PeoplesCourt::new(address, self.client.clone())
    }
}

async fn send_and_confirm(
    call: ContractCall<SignerClient, ()>,
    what: &str,
) -> CourtResult<RegistrationReceipt> {
    let pending = call.send().await.map_err(CourtError::chain)?;
    let tx_hash = pending.tx_hash();
    tracing::info!(target: "courtroom::chain", tx = ?tx_hash, "{} transaction sent", what);

    let receipt = pending
        .await
        .map_err(CourtError::chain)?
        .ok_or(CourtError::Dropped)?;
    if receipt.status != Some(U64::from(1)) {
        return Err(CourtError::Reverted(format!("{:?}", tx_hash)));
    }
    tracing::info!(
        target: "courtroom::chain",
        tx = ?tx_hash,
        block = ?receipt.block_number,
        "{} transaction confirmed",
        what
    );
    Ok(RegistrationReceipt {
        tx_hash,
        block_number: receipt.block_number.map(|b| b.as_u64()),
    })
}

#[async_trait::async_trait]
impl CourtroomRegistrar for EthersCourtroom {
    async fn create_persona(
        &self,
        contract: Address,
        persona_uri: &str,
    ) -> CourtResult<RegistrationReceipt> {
        let call = self.contract(contract).create_persona(persona_uri.to_string());
        send_and_confirm(call, "createPersona").await
    }

    async fn submit_argument(
        &self,
        contract: Address,
        case_id: U256,
        argument_uri: &str,
    ) -> CourtResult<RegistrationReceipt> {
        let call = self
            .contract(contract)
            .submit_argument(case_id, argument_uri.to_string());
        send_and_confirm(call, "submitArgument").await
    }
}
