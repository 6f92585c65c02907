//! Global application state.
//!
//! `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! Holds the session address, the cached list snapshot, and the static
//! configuration loaded at startup.

use std::cell::RefCell;
use std::rc::Rc;

use gp_client::ListState;
use gp_keys::BaseAccountKeypair;
use gp_types::{ProgramConfig, WalletAddress};

#[derive(Clone, Default)]
pub struct AppState {
    pub wallet_address: Option<WalletAddress>,
    pub list: ListState,
    pub config: Option<ProgramConfig>,
    pub base_keypair: Option<Rc<BaseAccountKeypair>>,
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&AppState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

// ── Convenience accessors ──

pub fn wallet_address() -> Option<WalletAddress> {
    with(|s| s.wallet_address.clone())
}

pub fn set_wallet_address(addr: WalletAddress) {
    with_mut(|s| s.wallet_address = Some(addr));
}

pub fn list() -> ListState {
    with(|s| s.list.clone())
}

pub fn set_list(list: ListState) {
    with_mut(|s| s.list = list);
}

pub fn config() -> Option<ProgramConfig> {
    with(|s| s.config.clone())
}

pub fn set_config(config: ProgramConfig) {
    with_mut(|s| s.config = Some(config));
}

pub fn base_keypair() -> Option<Rc<BaseAccountKeypair>> {
    with(|s| s.base_keypair.clone())
}

pub fn set_base_keypair(keypair: Rc<BaseAccountKeypair>) {
    with_mut(|s| s.base_keypair = Some(keypair));
}
