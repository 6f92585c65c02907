//! Client core: the capability traits the front-end is written against,
//! plus the wallet session manager, the remote-list synchroniser, and the
//! pure view function.
//!
//! Futures here run on the browser event loop, so the traits are
//! `async_trait(?Send)`.

use async_trait::async_trait;
use gp_keys::InitAuthorization;
use gp_types::{AccountId, ListAccount, WalletAddress};

pub mod mock;
pub mod session;
pub mod sync;
pub mod view;

pub use session::{SessionEvent, WalletSession};
pub use sync::{AppendOutcome, ListState, ListSync};
pub use view::{View, view};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Restrict the request to sessions the user has previously approved;
    /// the provider declines silently instead of prompting.
    pub only_if_trusted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("wallet provider not found")]
    ProviderMissing,
    #[error("connection declined: {0}")]
    Declined(String),
}

/// Tagged fetch result: a missing account is first-run state, everything
/// else is retry-worthy.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("account not initialized")]
    NotFound,
    #[error("transient failure: {0}")]
    Transient(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error("account already initialized")]
    AlreadyInitialized,
    #[error("transaction rejected: {0}")]
    Rejected(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Browser-injected wallet capability. The WASM front-end wraps the real
/// injected object; tests substitute [`mock::MockWallet`].
#[async_trait(?Send)]
pub trait WalletProvider {
    fn is_available(&self) -> bool;
    async fn connect(&self, options: ConnectOptions) -> Result<WalletAddress, WalletError>;
}

/// The remote program's callable surface, per its interface-description
/// document: fetch the base account, initialize it once, append an item.
#[async_trait(?Send)]
pub trait ListProgram {
    async fn fetch_list(&self, account: &AccountId) -> Result<ListAccount, FetchError>;

    /// One-time account creation. Idempotency is not guaranteed here;
    /// calling twice is backend-defined.
    async fn initialize(&self, auth: &InitAuthorization) -> Result<(), ProgramError>;

    async fn append(
        &self,
        account: &AccountId,
        link: &str,
        authority: &WalletAddress,
    ) -> Result<(), ProgramError>;
}
