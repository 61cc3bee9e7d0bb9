//! Courtroom core: data model, configuration, pinning, chain access, persona discovery,
//! hosted models and the agent skill trait.

pub mod chain;
pub mod config;
pub mod discovery;
pub mod error;
pub mod llm;
pub mod persona;
pub mod pinning;
pub mod prompts;
pub mod skills;

pub use chain::{
    parse_address, parse_case_id, CaseIndex, CourtroomRegistrar, EthersCourtroom, EventLogIndex,
};
pub use config::CourtroomConfig;
pub use discovery::{HttpPersonaSource, PersonaDiscovery, PersonaMap, PersonaSource};
pub use error::{CourtError, CourtResult};
pub use llm::HostedModelClient;
pub use persona::{
    CaseRecord, ContentKind, ContentRecord, DiscoveredPersona, Persona, PersonaEvent,
    RegistrationReceipt, Role,
};
pub use pinning::{PinataClient, PinningService};
pub use skills::{error_result, parse_payload, AgentSkill, SkillError, SkillRegistry, ToolContext};

/// Re-exported so dependents name addresses and ids with the same types.
pub use ethers::types::{Address, TxHash, U256};
