//! In-memory trait implementations for tests and local development.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use gp_keys::InitAuthorization;
use gp_types::{AccountId, ListAccount, ListItem, WalletAddress};

use crate::{
    ConnectOptions, FetchError, ListProgram, ProgramError, WalletError, WalletProvider,
};

/// Scripted wallet provider.
pub struct MockWallet {
    available: bool,
    trusted: bool,
    address: Option<WalletAddress>,
    connect_calls: Cell<usize>,
}

impl MockWallet {
    /// No provider injected into the page at all.
    pub fn absent() -> Self {
        Self {
            available: false,
            trusted: false,
            address: None,
            connect_calls: Cell::new(0),
        }
    }

    /// Provider present and previously approved by the user.
    pub fn trusted(address: WalletAddress) -> Self {
        Self {
            available: true,
            trusted: true,
            address: Some(address),
            connect_calls: Cell::new(0),
        }
    }

    /// Provider present but the user has never approved this site;
    /// trusted-only requests decline without prompting.
    pub fn untrusted(address: WalletAddress) -> Self {
        Self {
            available: true,
            trusted: false,
            address: Some(address),
            connect_calls: Cell::new(0),
        }
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.get()
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockWallet {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn connect(&self, options: ConnectOptions) -> Result<WalletAddress, WalletError> {
        self.connect_calls.set(self.connect_calls.get() + 1);

        if !self.available {
            return Err(WalletError::ProviderMissing);
        }
        if options.only_if_trusted && !self.trusted {
            return Err(WalletError::Declined(
                "site not previously approved".to_owned(),
            ));
        }
        self.address
            .clone()
            .ok_or_else(|| WalletError::Declined("user rejected the request".to_owned()))
    }
}

/// In-memory stand-in for the remote program. Double-initialize is pinned
/// to [`ProgramError::AlreadyInitialized`]; the real gateway may differ.
pub struct InMemoryListProgram {
    account: AccountId,
    items: RefCell<Option<Vec<ListItem>>>,
    fetch_calls: Cell<usize>,
    append_calls: Cell<usize>,
    fail_next_fetch: Cell<bool>,
    fail_next_append: Cell<bool>,
}

impl InMemoryListProgram {
    pub fn new(account: AccountId) -> Self {
        Self {
            account,
            items: RefCell::new(None),
            fetch_calls: Cell::new(0),
            append_calls: Cell::new(0),
            fail_next_fetch: Cell::new(false),
            fail_next_append: Cell::new(false),
        }
    }

    pub fn initialized_with(account: AccountId, items: Vec<ListItem>) -> Self {
        let program = Self::new(account);
        *program.items.borrow_mut() = Some(items);
        program
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.get()
    }

    pub fn append_calls(&self) -> usize {
        self.append_calls.get()
    }

    pub fn fail_next_fetch(&self) {
        self.fail_next_fetch.set(true);
    }

    pub fn fail_next_append(&self) {
        self.fail_next_append.set(true);
    }
}

#[async_trait(?Send)]
impl ListProgram for InMemoryListProgram {
    async fn fetch_list(&self, account: &AccountId) -> Result<ListAccount, FetchError> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);

        if self.fail_next_fetch.replace(false) {
            return Err(FetchError::Transient("scripted fetch failure".to_owned()));
        }
        if account != &self.account {
            return Err(FetchError::NotFound);
        }

        match &*self.items.borrow() {
            Some(items) => Ok(ListAccount {
                items: items.clone(),
                total_items: items.len() as u64,
            }),
            None => Err(FetchError::NotFound),
        }
    }

    async fn initialize(&self, auth: &InitAuthorization) -> Result<(), ProgramError> {
        if auth.account != self.account {
            return Err(ProgramError::Rejected("unknown account".to_owned()));
        }
        if let Err(err) = gp_keys::verify_initialize(auth) {
            return Err(ProgramError::Rejected(err.to_string()));
        }

        let mut items = self.items.borrow_mut();
        if items.is_some() {
            return Err(ProgramError::AlreadyInitialized);
        }
        *items = Some(Vec::new());
        Ok(())
    }

    async fn append(
        &self,
        account: &AccountId,
        link: &str,
        authority: &WalletAddress,
    ) -> Result<(), ProgramError> {
        self.append_calls.set(self.append_calls.get() + 1);

        if self.fail_next_append.replace(false) {
            return Err(ProgramError::Transport("scripted append failure".to_owned()));
        }
        if account != &self.account {
            return Err(ProgramError::Rejected("unknown account".to_owned()));
        }

        match &mut *self.items.borrow_mut() {
            Some(items) => {
                items.push(ListItem {
                    link: link.to_owned(),
                    posted_by: authority.clone(),
                });
                Ok(())
            }
            None => Err(ProgramError::Rejected("account not initialized".to_owned())),
        }
    }
}
