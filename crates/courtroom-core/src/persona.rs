//! Courtroom data model: personas, cases, content records and registration receipts.

use ethers::types::{Address, TxHash, U256};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Generated fictional profile of one courtroom participant, as accepted for pinning.
///
/// Pinned once as JSON and referenced on-chain by its gateway URL; never mutated afterwards.
/// `details` is whatever object the agent produced; only the top-level fields are typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub age: u32,
    pub occupation: String,
    pub physical_description: String,
    pub image_url: String,
    pub personality: String,
    pub details: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

fn lenient_u32<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
    use serde::de::Error;
    match NumberOrString::deserialize(de)? {
        NumberOrString::Number(n) => u32::try_from(n).map_err(D::Error::custom),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| D::Error::custom(format!("expected a number, got {:?}", s))),
    }
}

/// Side of the current case a participant is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Plaintiff,
    Defendant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Plaintiff => "plaintiff",
            Role::Defendant => "defendant",
        }
    }
}

/// One `CaseCreated` log. Title, prize pool and NFT id are carried but unused.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRecord {
    pub case_id: U256,
    pub title: String,
    pub plaintiff: Address,
    pub defendant: Address,
    pub prize_pool: U256,
    pub nft_id: U256,
}

impl CaseRecord {
    /// Plaintiff wins when both sides are the same address.
    pub fn role_of(&self, address: Address) -> Option<Role> {
        if address == self.plaintiff {
            Some(Role::Plaintiff)
        } else if address == self.defendant {
            Some(Role::Defendant)
        } else {
            None
        }
    }

    pub fn participants(&self) -> [Address; 2] {
        [self.plaintiff, self.defendant]
    }
}

/// One `PersonaCreated` log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaEvent {
    pub user: Address,
    pub persona_uri: String,
}

/// Argument, evidence or complaint as pinned: `{summary, content}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub summary: String,
    pub content: String,
}

impl ContentRecord {
    /// Label the record is pinned under.
    pub fn pin_label(&self) -> String {
        format!("{}.txt", self.summary)
    }
}

/// Narrative content kinds that share the `{summary, content}` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Argument,
    Evidence,
    Complaint,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [
        ContentKind::Argument,
        ContentKind::Evidence,
        ContentKind::Complaint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Argument => "argument",
            ContentKind::Evidence => "evidence",
            ContentKind::Complaint => "complaint",
        }
    }

    /// Backend route for this kind.
    pub fn path(&self) -> &'static str {
        match self {
            ContentKind::Argument => "/argument",
            ContentKind::Evidence => "/evidence",
            ContentKind::Complaint => "/complaint",
        }
    }
}

/// Returned once a registration transaction is mined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

impl RegistrationReceipt {
    /// `0x`-prefixed hex hash.
    pub fn tx_hash_hex(&self) -> String {
        format!("{:?}", self.tx_hash)
    }
}

/// Persona as returned by discovery: the pinned JSON object exactly as fetched, with
/// `COURTROOM_ROLE` and `WALLET_ADDRESS` added.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredPersona {
    pub role: Role,
    pub wallet_address: String,
    document: Map<String, Value>,
}

impl DiscoveredPersona {
    pub fn new(mut document: Map<String, Value>, role: Role, address: Address) -> Self {
        let wallet_address = ethers::utils::to_checksum(&address, None);
        document.insert("COURTROOM_ROLE".to_string(), Value::from(role.as_str()));
        document.insert("WALLET_ADDRESS".to_string(), Value::from(wallet_address.clone()));
        Self {
            role,
            wallet_address,
            document,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.document.get("name").and_then(Value::as_str)
    }

    pub fn into_document(self) -> Map<String, Value> {
        self.document
    }
}

impl Serialize for DiscoveredPersona {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "name": "Sarah Chen",
            "age": "34",
            "occupation": "Software engineer",
            "physical_description": "Short black hair, glasses",
            "image_url": "https://gateway.pinata.cloud/ipfs/bafyimg",
            "personality": "Methodical",
            "details": {
                "children": "2",
                "criminal_background": "None",
                "personalHistory": "Grew up in Seattle",
                "hobbies": "Climbing"
            }
        })
    }

    #[test]
    fn persona_accepts_numeric_string_age() {
        let p: Persona = serde_json::from_value(sample()).unwrap();
        assert_eq!(p.age, 34);
        assert_eq!(p.details["children"], "2");
    }

    #[test]
    fn details_are_taken_as_any_object() {
        let mut v = sample();
        v["details"] = json!({"children": "two", "criminal_background": false, "pets": ["cat"]});
        let p: Persona = serde_json::from_value(v).unwrap();
        assert_eq!(p.details["criminal_background"], false);
        assert_eq!(p.details["pets"][0], "cat");
    }

    #[test]
    fn details_must_be_an_object() {
        let mut v = sample();
        v["details"] = json!("none");
        assert!(serde_json::from_value::<Persona>(v.clone()).is_err());
        v.as_object_mut().unwrap().remove("details");
        assert!(serde_json::from_value::<Persona>(v).is_err());
    }

    #[test]
    fn persona_without_image_url_is_rejected() {
        let mut v = sample();
        v.as_object_mut().unwrap().remove("image_url");
        assert!(serde_json::from_value::<Persona>(v).is_err());
    }

    #[test]
    fn non_numeric_age_is_rejected() {
        let mut v = sample();
        v["age"] = json!("thirty");
        assert!(serde_json::from_value::<Persona>(v).is_err());
    }

    #[test]
    fn role_is_decided_by_address_equality() {
        let a = Address::from_low_u64_be(0xA);
        let b = Address::from_low_u64_be(0xB);
        let case = CaseRecord {
            case_id: U256::from(7),
            title: "t".into(),
            plaintiff: a,
            defendant: b,
            prize_pool: U256::zero(),
            nft_id: U256::zero(),
        };
        assert_eq!(case.role_of(a), Some(Role::Plaintiff));
        assert_eq!(case.role_of(b), Some(Role::Defendant));
        assert_eq!(case.role_of(Address::from_low_u64_be(0xC)), None);
    }

    #[test]
    fn discovered_persona_keeps_document_verbatim() {
        let mut doc = sample().as_object().unwrap().clone();
        doc.insert("gender".into(), json!("female"));
        let d = DiscoveredPersona::new(doc, Role::Defendant, Address::from_low_u64_be(0xB));
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["COURTROOM_ROLE"], "defendant");
        assert_eq!(v["name"], "Sarah Chen");
        assert_eq!(v["age"], "34");
        assert_eq!(v["gender"], "female");
        assert_eq!(v["details"]["hobbies"], "Climbing");
        assert_eq!(v["WALLET_ADDRESS"], d.wallet_address.as_str());
        assert!(d.wallet_address.starts_with("0x"));
    }

    #[test]
    fn content_label_uses_summary() {
        let r = ContentRecord {
            summary: "The lease was forged".into(),
            content: "...".into(),
        };
        assert_eq!(r.pin_label(), "The lease was forged.txt");
    }
}
