//! HTTP adapter for the program's RPC gateway.
//!
//! Implements [`ListProgram`] over the gateway surface described by the
//! interface-description document: one readable account, two callable
//! instructions. Every write is a single round-trip that resolves only
//! after the gateway confirms the transaction at the configured commitment.
//! No retry, no backoff, no timeout.

use async_trait::async_trait;
use gp_client::{FetchError, ListProgram, ProgramError};
use gp_keys::InitAuthorization;
use gp_types::{
    AccountId, ListAccount, ProgramConfig, WalletAddress,
    config::{INSTRUCTION_ADD_GIF, INSTRUCTION_INITIALIZE},
};
use serde::Serialize;
use tracing::warn;

pub const SYSTEM_PROGRAM_ID: &str = "11111111111111111111111111111111";

pub struct RpcListProgram {
    config: ProgramConfig,
    http: reqwest::Client,
}

impl RpcListProgram {
    pub fn new(config: ProgramConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    fn account_url(&self, account: &AccountId) -> String {
        format!(
            "{}/program/{}/account/{}?commitment={}",
            self.config.endpoint,
            self.config.program_id,
            account,
            self.config.commitment.as_str(),
        )
    }

    fn instruction_url(&self, instruction: &str) -> String {
        format!(
            "{}/program/{}/instruction/{}",
            self.config.endpoint, self.config.program_id, instruction,
        )
    }

    async fn submit_instruction<B: Serialize>(
        &self,
        instruction: &str,
        body: &B,
    ) -> Result<(), ProgramError> {
        let url = self.instruction_url(instruction);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                warn!("{instruction} transport failure: {err}");
                ProgramError::Transport(err.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        warn!("{instruction} failed with HTTP {status}: {text}");
        Err(map_instruction_failure(status.as_u16(), &text))
    }
}

// ── Gateway wire types ──

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InstructionAccounts<'a> {
    base_account: &'a AccountId,
    user: &'a WalletAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_program: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddGifRequest<'a> {
    link: &'a str,
    accounts: InstructionAccounts<'a>,
    commitment: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeRequest<'a> {
    accounts: InstructionAccounts<'a>,
    authorization: &'a InitAuthorization,
    commitment: &'static str,
}

#[derive(Debug, serde::Deserialize)]
struct GatewayError {
    error: String,
}

fn map_instruction_failure(status: u16, body: &str) -> ProgramError {
    match serde_json::from_str::<GatewayError>(body) {
        Ok(_) if status == 409 => ProgramError::AlreadyInitialized,
        Ok(err) => ProgramError::Rejected(err.error),
        Err(_) => ProgramError::Transport(format!("HTTP {status}: {body}")),
    }
}

#[async_trait(?Send)]
impl ListProgram for RpcListProgram {
    async fn fetch_list(&self, account: &AccountId) -> Result<ListAccount, FetchError> {
        let url = self.account_url(account);
        let response = self.http.get(&url).send().await.map_err(|err| {
            warn!("account fetch transport failure: {err}");
            FetchError::Transient(err.to_string())
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // First-run state, not an error.
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("account fetch failed with HTTP {status}: {text}");
            return Err(FetchError::Transient(format!("HTTP {status}: {text}")));
        }

        response
            .json::<ListAccount>()
            .await
            .map_err(|err| FetchError::Transient(format!("account decode: {err}")))
    }

    async fn initialize(&self, auth: &InitAuthorization) -> Result<(), ProgramError> {
        let body = InitializeRequest {
            accounts: InstructionAccounts {
                base_account: &auth.account,
                user: &auth.authority,
                system_program: Some(SYSTEM_PROGRAM_ID),
            },
            authorization: auth,
            commitment: self.config.commitment.as_str(),
        };
        self.submit_instruction(INSTRUCTION_INITIALIZE, &body).await
    }

    async fn append(
        &self,
        account: &AccountId,
        link: &str,
        authority: &WalletAddress,
    ) -> Result<(), ProgramError> {
        let body = AddGifRequest {
            link,
            accounts: InstructionAccounts {
                base_account: account,
                user: authority,
                system_program: None,
            },
            commitment: self.config.commitment.as_str(),
        };
        self.submit_instruction(INSTRUCTION_ADD_GIF, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_keys::BaseAccountKeypair;
    use gp_types::config::{Cluster, IdlDocument};

    fn config() -> ProgramConfig {
        let idl = IdlDocument::parse(
            r#"{
                "instructions": [
                    { "name": "startStuffOff" },
                    { "name": "addGif" }
                ],
                "metadata": { "address": "ProgId1111111111111111111111111111111111111" }
            }"#,
        )
        .unwrap();
        ProgramConfig::from_idl(
            &idl,
            &Cluster::Custom("http://localhost:8899".to_owned()),
            AccountId("Base111".to_owned()),
        )
        .unwrap()
    }

    #[test]
    fn account_url_carries_commitment() {
        let rpc = RpcListProgram::new(config());
        assert_eq!(
            rpc.account_url(&AccountId("Base111".to_owned())),
            "http://localhost:8899/program/ProgId1111111111111111111111111111111111111/account/Base111?commitment=processed"
        );
    }

    #[test]
    fn add_gif_body_uses_gateway_field_names() {
        let account = AccountId("Base111".to_owned());
        let user = WalletAddress("User111".to_owned());
        let body = AddGifRequest {
            link: "https://media.giphy.com/a.gif",
            accounts: InstructionAccounts {
                base_account: &account,
                user: &user,
                system_program: None,
            },
            commitment: "processed",
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["link"], "https://media.giphy.com/a.gif");
        assert_eq!(value["accounts"]["baseAccount"], "Base111");
        assert_eq!(value["accounts"]["user"], "User111");
        assert!(value["accounts"].get("systemProgram").is_none());
    }

    #[test]
    fn initialize_body_includes_system_program_and_authorization() {
        let keypair = BaseAccountKeypair::generate();
        let auth = keypair.sign_initialize(&WalletAddress("User111".to_owned()));
        let body = InitializeRequest {
            accounts: InstructionAccounts {
                base_account: &auth.account,
                user: &auth.authority,
                system_program: Some(SYSTEM_PROGRAM_ID),
            },
            authorization: &auth,
            commitment: "processed",
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["accounts"]["systemProgram"], SYSTEM_PROGRAM_ID);
        assert_eq!(value["authorization"]["signature"], auth.signature);
    }

    #[test]
    fn instruction_failures_map_to_tagged_errors() {
        assert!(matches!(
            map_instruction_failure(409, r#"{"error":"already in use"}"#),
            ProgramError::AlreadyInitialized
        ));
        assert!(matches!(
            map_instruction_failure(422, r#"{"error":"link too long"}"#),
            ProgramError::Rejected(reason) if reason == "link too long"
        ));
        assert!(matches!(
            map_instruction_failure(502, "bad gateway"),
            ProgramError::Transport(_)
        ));
    }
}
