use serde::{Deserialize, Serialize};

pub mod config;

pub use config::{Cluster, Commitment, ConfigError, IdlDocument, KeypairFile, ProgramConfig};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WalletAddress(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AccountId(pub String);

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry in the shared list. Immutable once the program accepts it;
/// ordering is the remote append order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListItem {
    #[serde(rename = "gifLink")]
    pub link: String,
    #[serde(rename = "userAddress")]
    pub posted_by: WalletAddress,
}

/// Read-only snapshot of the program's base account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListAccount {
    #[serde(rename = "gifList")]
    pub items: Vec<ListItem>,
    #[serde(rename = "totalGifs", default)]
    pub total_items: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_account_uses_program_field_names() {
        let raw = r#"{
            "gifList": [
                { "gifLink": "https://media.giphy.com/a.gif", "userAddress": "7rx4Y" }
            ],
            "totalGifs": 1
        }"#;

        let account: ListAccount = serde_json::from_str(raw).unwrap();
        assert_eq!(account.items.len(), 1);
        assert_eq!(account.items[0].link, "https://media.giphy.com/a.gif");
        assert_eq!(account.items[0].posted_by, WalletAddress("7rx4Y".to_owned()));
        assert_eq!(account.total_items, 1);

        let round = serde_json::to_value(&account).unwrap();
        assert!(round.get("gifList").is_some());
        assert!(round["gifList"][0].get("userAddress").is_some());
    }

    #[test]
    fn total_items_defaults_to_zero() {
        let account: ListAccount = serde_json::from_str(r#"{ "gifList": [] }"#).unwrap();
        assert_eq!(account.total_items, 0);
    }
}
