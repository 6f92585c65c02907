//! Remote-list synchronisation.
//!
//! The local list is only ever a snapshot of the remote account. The single
//! mutation path is [`ListSync::append`], which re-fetches the whole account
//! on success; there is no optimistic local update. Fire-once throughout:
//! no retry, no backoff, no timeout.

use gp_keys::InitAuthorization;
use gp_types::{AccountId, ListItem, WalletAddress};

use crate::{FetchError, ListProgram, ProgramError};

/// Cached view of the remote account. `Uninitialized` (first-run state) and
/// `Unavailable` (transient failure, cache is stale) are deliberately kept
/// apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListState {
    /// No fetch has completed yet.
    #[default]
    Unknown,
    Uninitialized,
    Ready(Vec<ListItem>),
    Unavailable,
}

impl ListState {
    pub fn items(&self) -> Option<&[ListItem]> {
        match self {
            ListState::Ready(items) => Some(items),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum AppendOutcome {
    Appended,
    /// Rejected client-side; no network call was issued.
    EmptyLink,
    /// The program rejected or the transport failed; the cache is unchanged.
    Failed(ProgramError),
}

pub struct ListSync<C> {
    program: C,
    account: AccountId,
    state: ListState,
}

impl<C: ListProgram> ListSync<C> {
    pub fn new(program: C, account: AccountId) -> Self {
        Self {
            program,
            account,
            state: ListState::Unknown,
        }
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Replace the cache with a fresh snapshot. Never escapes an error:
    /// a missing account becomes `Uninitialized`, anything else
    /// `Unavailable`.
    pub async fn refresh(&mut self) -> &ListState {
        self.state = match self.program.fetch_list(&self.account).await {
            Ok(account) => ListState::Ready(account.items),
            Err(FetchError::NotFound) => ListState::Uninitialized,
            Err(FetchError::Transient(_)) => ListState::Unavailable,
        };
        &self.state
    }

    /// One-time account creation, followed by a full re-fetch on success.
    pub async fn initialize(&mut self, auth: &InitAuthorization) -> Result<(), ProgramError> {
        self.program.initialize(auth).await?;
        self.refresh().await;
        Ok(())
    }

    /// Append a link attributed to the connected wallet. The link is
    /// validated before anything touches the network; a failed submit
    /// leaves the snapshot untouched (stale read).
    pub async fn append(&mut self, link: &str, authority: &WalletAddress) -> AppendOutcome {
        let link = link.trim();
        if link.is_empty() {
            return AppendOutcome::EmptyLink;
        }

        match self.program.append(&self.account, link, authority).await {
            Ok(()) => {
                self.refresh().await;
                AppendOutcome::Appended
            }
            Err(err) => AppendOutcome::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::InMemoryListProgram;
    use gp_keys::BaseAccountKeypair;

    fn authority() -> WalletAddress {
        WalletAddress("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin".to_owned())
    }

    fn fresh() -> (ListSync<InMemoryListProgram>, BaseAccountKeypair) {
        let keypair = BaseAccountKeypair::generate();
        let account = keypair.address();
        let sync = ListSync::new(InMemoryListProgram::new(account.clone()), account);
        (sync, keypair)
    }

    #[tokio::test]
    async fn fetch_on_never_initialized_account_yields_uninitialized() {
        let (mut sync, _keypair) = fresh();
        assert_eq!(sync.refresh().await, &ListState::Uninitialized);
    }

    #[tokio::test]
    async fn empty_and_whitespace_links_issue_no_network_call() {
        let (mut sync, _keypair) = fresh();

        assert!(matches!(
            sync.append("", &authority()).await,
            AppendOutcome::EmptyLink
        ));
        assert!(matches!(
            sync.append("   ", &authority()).await,
            AppendOutcome::EmptyLink
        ));

        assert_eq!(sync.program.append_calls(), 0);
        assert_eq!(sync.state(), &ListState::Unknown);
    }

    #[tokio::test]
    async fn append_then_refresh_shows_link_last_with_attribution() {
        let (mut sync, keypair) = fresh();
        sync.initialize(&keypair.sign_initialize(&authority()))
            .await
            .unwrap();

        sync.append("https://media.giphy.com/first.gif", &authority())
            .await;
        let outcome = sync
            .append("https://media.giphy.com/second.gif", &authority())
            .await;
        assert!(matches!(outcome, AppendOutcome::Appended));

        let items = sync.state().items().expect("list should be ready");
        assert_eq!(items.len(), 2);
        let last = items.last().unwrap();
        assert_eq!(last.link, "https://media.giphy.com/second.gif");
        assert_eq!(last.posted_by, authority());
    }

    #[tokio::test]
    async fn second_initialize_is_already_initialized() {
        let (mut sync, keypair) = fresh();
        let auth = keypair.sign_initialize(&authority());

        sync.initialize(&auth).await.unwrap();
        let err = sync.initialize(&auth).await.unwrap_err();
        assert!(matches!(err, ProgramError::AlreadyInitialized));

        // The cache survives the failed second call.
        assert_eq!(sync.state(), &ListState::Ready(Vec::new()));
    }

    #[tokio::test]
    async fn initialize_with_wrong_keypair_is_rejected() {
        let keypair = BaseAccountKeypair::generate();
        let account = keypair.address();
        let mut sync = ListSync::new(InMemoryListProgram::new(account.clone()), account);

        let imposter = BaseAccountKeypair::generate();
        let err = sync
            .initialize(&imposter.sign_initialize(&authority()))
            .await
            .unwrap_err();
        assert!(matches!(err, ProgramError::Rejected(_)));
    }

    #[tokio::test]
    async fn transient_fetch_failure_maps_to_unavailable() {
        let (mut sync, keypair) = fresh();
        sync.initialize(&keypair.sign_initialize(&authority()))
            .await
            .unwrap();

        sync.program.fail_next_fetch();
        assert_eq!(sync.refresh().await, &ListState::Unavailable);
    }

    #[tokio::test]
    async fn failed_append_leaves_cache_unchanged() {
        let (mut sync, keypair) = fresh();
        sync.initialize(&keypair.sign_initialize(&authority()))
            .await
            .unwrap();
        sync.append("https://media.giphy.com/kept.gif", &authority())
            .await;
        let before = sync.state().clone();

        sync.program.fail_next_append();
        let outcome = sync
            .append("https://media.giphy.com/lost.gif", &authority())
            .await;

        assert!(matches!(outcome, AppendOutcome::Failed(_)));
        assert_eq!(sync.state(), &before);
    }
}
