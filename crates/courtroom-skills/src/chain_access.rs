//! Chain handles that connect on first use, so the tool registry can be built without an
//! RPC endpoint or signer and report a missing one as an ordinary tool failure.

use courtroom_core::{
    Address, CaseIndex, CaseRecord, CourtResult, CourtroomConfig, CourtroomRegistrar,
    EthersCourtroom, EventLogIndex, PersonaEvent, RegistrationReceipt, U256,
};
use std::sync::Arc;
use tokio::sync::OnceCell;

pub struct LazyRegistrar {
    cfg: Arc<CourtroomConfig>,
    inner: OnceCell<EthersCourtroom>,
}

impl LazyRegistrar {
    pub fn new(cfg: Arc<CourtroomConfig>) -> Self {
        Self {
            cfg,
            inner: OnceCell::new(),
        }
    }

    async fn get(&self) -> CourtResult<&EthersCourtroom> {
        self.inner
            .get_or_try_init(|| EthersCourtroom::from_config(&self.cfg))
            .await
    }
}

#[async_trait::async_trait]
impl CourtroomRegistrar for LazyRegistrar {
    async fn create_persona(
        &self,
        contract: Address,
        persona_uri: &str,
    ) -> CourtResult<RegistrationReceipt> {
        self.get().await?.create_persona(contract, persona_uri).await
    }

    async fn submit_argument(
        &self,
        contract: Address,
        case_id: U256,
        argument_uri: &str,
    ) -> CourtResult<RegistrationReceipt> {
        self.get()
            .await?
            .submit_argument(contract, case_id, argument_uri)
            .await
    }
}

pub struct LazyIndex {
    cfg: Arc<CourtroomConfig>,
    inner: OnceCell<EventLogIndex>,
}

impl LazyIndex {
    pub fn new(cfg: Arc<CourtroomConfig>) -> Self {
        Self {
            cfg,
            inner: OnceCell::new(),
        }
    }

    async fn get(&self) -> CourtResult<&EventLogIndex> {
        self.inner
            .get_or_try_init(|| async { EventLogIndex::from_config(&self.cfg) })
            .await
    }
}

#[async_trait::async_trait]
impl CaseIndex for LazyIndex {
    async fn current_case_id(&self, contract: Address) -> CourtResult<U256> {
        self.get().await?.current_case_id(contract).await
    }

    async fn find_case_by_id(
        &self,
        contract: Address,
        case_id: U256,
    ) -> CourtResult<Option<CaseRecord>> {
        self.get().await?.find_case_by_id(contract, case_id).await
    }

    async fn persona_events_for_addresses(
        &self,
        contract: Address,
        users: &[Address],
    ) -> CourtResult<Vec<PersonaEvent>> {
        self.get()
            .await?
            .persona_events_for_addresses(contract, users)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtroom_core::CourtError;

    #[tokio::test]
    async fn unconfigured_chain_surfaces_config_error() {
        let cfg = Arc::new(CourtroomConfig::default());
        let registrar = LazyRegistrar::new(cfg.clone());
        let err = registrar
            .create_persona(Address::zero(), "http://x/p.json")
            .await
            .unwrap_err();
        assert!(matches!(err, CourtError::Config(_)));

        let index = LazyIndex::new(cfg);
        assert!(matches!(
            index.current_case_id(Address::zero()).await,
            Err(CourtError::Config(_))
        ));
    }
}
