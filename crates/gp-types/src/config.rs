//! Static configuration: the interface-description document (IDL) and the
//! fixed base-account keypair file, both bundled with the page at build time.
//!
//! All remote-program addressing lives in [`ProgramConfig`], which callers
//! construct once at startup and pass into the list client. No module-level
//! globals.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::AccountId;

pub const INSTRUCTION_INITIALIZE: &str = "startStuffOff";
pub const INSTRUCTION_ADD_GIF: &str = "addGif";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("IDL is missing instruction `{0}`")]
    MissingInstruction(&'static str),
    #[error("keypair file must contain exactly 64 bytes, got {0}")]
    BadKeypairLength(usize),
    #[error("keypair byte index {0} out of range")]
    BadKeypairIndex(u64),
}

// ── Interface-description document ──

#[derive(Debug, Clone, Deserialize)]
pub struct IdlDocument {
    pub version: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub instructions: Vec<IdlInstruction>,
    pub metadata: IdlMetadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlMetadata {
    /// Deployed program address, base58.
    pub address: String,
}

impl IdlDocument {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn program_id(&self) -> AccountId {
        AccountId(self.metadata.address.clone())
    }

    pub fn has_instruction(&self, name: &str) -> bool {
        self.instructions.iter().any(|i| i.name == name)
    }
}

// ── Keypair file ──

/// The base-account keypair file. Two shapes are accepted: the flat 64-byte
/// array emitted by standard keygen tools, and the object-map form
/// (`{"_keypair":{"secretKey":{"0":...}}}`) produced by serialising the
/// web3 `Keypair` object directly.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum KeypairFile {
    Flat(Vec<u8>),
    Wrapped {
        #[serde(rename = "_keypair")]
        keypair: WrappedKeypair,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct WrappedKeypair {
    #[serde(rename = "secretKey")]
    pub secret_key: BTreeMap<u64, u8>,
}

impl KeypairFile {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Flatten to the 64-byte ed25519 keypair (secret || public).
    pub fn secret_bytes(&self) -> Result<[u8; 64], ConfigError> {
        match self {
            KeypairFile::Flat(bytes) => {
                if bytes.len() != 64 {
                    return Err(ConfigError::BadKeypairLength(bytes.len()));
                }
                let mut out = [0_u8; 64];
                out.copy_from_slice(bytes);
                Ok(out)
            }
            KeypairFile::Wrapped { keypair } => {
                if keypair.secret_key.len() != 64 {
                    return Err(ConfigError::BadKeypairLength(keypair.secret_key.len()));
                }
                let mut out = [0_u8; 64];
                for (&index, &byte) in &keypair.secret_key {
                    if index >= 64 {
                        return Err(ConfigError::BadKeypairIndex(index));
                    }
                    out[index as usize] = byte;
                }
                Ok(out)
            }
        }
    }
}

// ── Cluster / commitment ──

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cluster {
    Devnet,
    Testnet,
    MainnetBeta,
    Custom(String),
}

impl Cluster {
    pub fn endpoint(&self) -> String {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com".to_owned(),
            Cluster::Testnet => "https://api.testnet.solana.com".to_owned(),
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com".to_owned(),
            Cluster::Custom(url) => url.trim_end_matches('/').to_owned(),
        }
    }
}

impl FromStr for Cluster {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "devnet" => Cluster::Devnet,
            "testnet" => Cluster::Testnet,
            "mainnet-beta" => Cluster::MainnetBeta,
            other => Cluster::Custom(other.to_owned()),
        })
    }
}

/// How the gateway acknowledges that a transaction is "done".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    #[default]
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

// ── Assembled configuration ──

/// Explicit configuration handed to the list client at construction.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    pub endpoint: String,
    pub program_id: AccountId,
    pub base_account: AccountId,
    pub commitment: Commitment,
}

impl ProgramConfig {
    /// Assemble from the bundled IDL, a cluster, and the base-account
    /// address. Rejects an IDL that does not expose the two instructions
    /// this client calls.
    pub fn from_idl(
        idl: &IdlDocument,
        cluster: &Cluster,
        base_account: AccountId,
    ) -> Result<Self, ConfigError> {
        for required in [INSTRUCTION_INITIALIZE, INSTRUCTION_ADD_GIF] {
            if !idl.has_instruction(required) {
                return Err(ConfigError::MissingInstruction(required));
            }
        }

        Ok(Self {
            endpoint: cluster.endpoint(),
            program_id: idl.program_id(),
            base_account,
            commitment: Commitment::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_IDL: &str = r#"{
        "version": "0.0.0",
        "name": "gifport",
        "instructions": [
            { "name": "startStuffOff" },
            { "name": "addGif" }
        ],
        "metadata": { "address": "4zvF9zSmPnK8vXvBpuTwVGqbUCyu47QL4i6TJyY5rTpS" }
    }"#;

    #[test]
    fn idl_parse_extracts_program_address() {
        let idl = IdlDocument::parse(SAMPLE_IDL).unwrap();
        assert_eq!(
            idl.program_id(),
            AccountId("4zvF9zSmPnK8vXvBpuTwVGqbUCyu47QL4i6TJyY5rTpS".to_owned())
        );
        assert!(idl.has_instruction("addGif"));
        assert!(!idl.has_instruction("removeGif"));
    }

    #[test]
    fn config_rejects_idl_without_required_instructions() {
        let raw = r#"{
            "instructions": [{ "name": "startStuffOff" }],
            "metadata": { "address": "abc" }
        }"#;
        let idl = IdlDocument::parse(raw).unwrap();
        let err = ProgramConfig::from_idl(&idl, &Cluster::Devnet, AccountId("base".into()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingInstruction("addGif")));
    }

    #[test]
    fn keypair_file_flat_array() {
        let raw = serde_json::to_string(&(0..64).map(|i| i as u8).collect::<Vec<u8>>()).unwrap();
        let file = KeypairFile::parse(&raw).unwrap();
        let bytes = file.secret_bytes().unwrap();
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[63], 63);
    }

    #[test]
    fn keypair_file_object_map_orders_numerically() {
        // Indices serialised as string keys; "10" must land at byte 10,
        // not sort lexicographically before "2".
        let mut map = serde_json::Map::new();
        for i in 0..64_u64 {
            map.insert(i.to_string(), serde_json::Value::from(i as u8 + 100));
        }
        let raw = serde_json::json!({ "_keypair": { "secretKey": map } }).to_string();

        let file = KeypairFile::parse(&raw).unwrap();
        let bytes = file.secret_bytes().unwrap();
        assert_eq!(bytes[2], 102);
        assert_eq!(bytes[10], 110);
    }

    #[test]
    fn keypair_file_rejects_short_secret() {
        let file = KeypairFile::parse("[1, 2, 3]").unwrap();
        assert!(matches!(
            file.secret_bytes(),
            Err(ConfigError::BadKeypairLength(3))
        ));
    }

    #[test]
    fn cluster_endpoints() {
        assert_eq!(
            "devnet".parse::<Cluster>().unwrap().endpoint(),
            "https://api.devnet.solana.com"
        );
        assert_eq!(
            "http://localhost:8899/".parse::<Cluster>().unwrap().endpoint(),
            "http://localhost:8899"
        );
    }
}
