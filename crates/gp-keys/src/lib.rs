use anyhow::{Result, anyhow};
use ed25519_dalek::{Signature, Signer as DalekSigner, SigningKey, Verifier, VerifyingKey};
use gp_types::{AccountId, KeypairFile, WalletAddress};
use serde::{Deserialize, Serialize};

const INIT_DOMAIN_TAG: &str = "gifport:v1:init";

/// The dedicated keypair of the shared base account, loaded from the bundled
/// keypair file. Co-signs the one-time initialization so the gateway can
/// prove the caller holds the account key without the secret ever leaving
/// the client.
pub struct BaseAccountKeypair {
    signing_key: SigningKey,
}

/// Signed initialize request, verifiable against the account's public key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitAuthorization {
    pub account: AccountId,
    pub authority: WalletAddress,
    /// base58 ed25519 signature over the domain-tagged payload.
    pub signature: String,
}

impl BaseAccountKeypair {
    pub fn generate() -> Self {
        let mut rng = rand::rngs::OsRng;
        Self {
            signing_key: SigningKey::generate(&mut rng),
        }
    }

    /// 64-byte ed25519 keypair, secret half first.
    pub fn from_secret_bytes(bytes: &[u8; 64]) -> Result<Self> {
        let signing_key = SigningKey::from_keypair_bytes(bytes)
            .map_err(|err| anyhow!("invalid base-account keypair: {err}"))?;
        Ok(Self { signing_key })
    }

    pub fn from_keypair_file(file: &KeypairFile) -> Result<Self> {
        let bytes = file.secret_bytes()?;
        Self::from_secret_bytes(&bytes)
    }

    pub fn address(&self) -> AccountId {
        let public = self.signing_key.verifying_key().to_bytes();
        AccountId(bs58::encode(public).into_string())
    }

    pub fn sign_initialize(&self, authority: &WalletAddress) -> InitAuthorization {
        let account = self.address();
        let payload = init_payload(&account, authority);
        let signature: Signature = self.signing_key.sign(&payload);
        InitAuthorization {
            account,
            authority: authority.clone(),
            signature: bs58::encode(signature.to_bytes()).into_string(),
        }
    }
}

/// Check an [`InitAuthorization`] against the account address it names.
pub fn verify_initialize(auth: &InitAuthorization) -> Result<()> {
    let public_bytes = bs58::decode(&auth.account.0)
        .into_vec()
        .map_err(|_| anyhow!("account address is not valid base58"))?;
    let public_bytes: [u8; 32] = public_bytes
        .try_into()
        .map_err(|_| anyhow!("account address must decode to 32 bytes"))?;
    let verifying_key = VerifyingKey::from_bytes(&public_bytes)
        .map_err(|err| anyhow!("invalid account public key: {err}"))?;

    let signature_bytes = bs58::decode(&auth.signature)
        .into_vec()
        .map_err(|_| anyhow!("signature is not valid base58"))?;
    let signature_bytes: [u8; 64] = signature_bytes
        .try_into()
        .map_err(|_| anyhow!("signature must decode to 64 bytes"))?;
    let signature = Signature::from_bytes(&signature_bytes);

    let payload = init_payload(&auth.account, &auth.authority);
    verifying_key
        .verify(&payload, &signature)
        .map_err(|_| anyhow!("initialize authorization does not verify"))
}

fn init_payload(account: &AccountId, authority: &WalletAddress) -> Vec<u8> {
    let mut payload = Vec::with_capacity(INIT_DOMAIN_TAG.len() + account.0.len() + authority.0.len() + 2);
    payload.extend_from_slice(INIT_DOMAIN_TAG.as_bytes());
    payload.push(b':');
    payload.extend_from_slice(account.0.as_bytes());
    payload.push(b':');
    payload.extend_from_slice(authority.0.as_bytes());
    payload
}
