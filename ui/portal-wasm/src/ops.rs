//! Async operation handlers. Each function corresponds to one user-visible
//! action; failures are logged and folded into the rendered state, never
//! thrown past here.

use gloo_console::{error, log, warn};
use gp_client::{AppendOutcome, ListSync, SessionEvent, WalletSession};
use gp_program_rpc::RpcListProgram;
use gp_types::{ProgramConfig, WalletAddress};

use crate::dom::{self, Elements};
use crate::provider::InjectedWalletProvider;
use crate::render;
use crate::state;

fn list_sync(config: &ProgramConfig) -> ListSync<RpcListProgram> {
    let account = config.base_account.clone();
    ListSync::new(RpcListProgram::new(config.clone()), account)
}

/// On-load sequence: restore a previously-trusted session, then fetch.
pub async fn on_page_load(els: &Elements) {
    let mut session = WalletSession::new(InjectedWalletProvider::new());

    match session.try_auto_connect().await {
        SessionEvent::Connected(address) => {
            log!("connected with public key:", address.0.clone());
            state::set_wallet_address(address);
            refresh_list().await;
        }
        SessionEvent::ProviderMissing => {
            dom::alert("Wallet provider not found! Get a Phantom wallet to use this page.");
        }
        SessionEvent::Declined(reason) => {
            // Expected on first visit; the connect button is the next step.
            log!("auto-connect declined:", reason);
        }
    }

    render::apply(els);
}

/// Explicit connect button.
pub async fn on_connect_click(els: &Elements) {
    let mut session = WalletSession::new(InjectedWalletProvider::new());

    match session.connect().await {
        SessionEvent::Connected(address) => {
            log!("connected with public key:", address.0.clone());
            state::set_wallet_address(address);
            refresh_list().await;
        }
        SessionEvent::ProviderMissing => {
            dom::alert("Wallet provider not found! Get a Phantom wallet to use this page.");
        }
        SessionEvent::Declined(reason) => {
            warn!("connect declined:", reason);
        }
    }

    render::apply(els);
}

/// One-time base-account initialization.
pub async fn on_initialize(els: &Elements) {
    let Some(config) = state::config() else {
        error!("initialize clicked before configuration loaded");
        return;
    };
    let Some(authority) = state::wallet_address() else {
        return;
    };
    let Some(keypair) = state::base_keypair() else {
        error!("base-account keypair unavailable");
        return;
    };

    let mut sync = list_sync(&config);
    let auth = keypair.sign_initialize(&authority);
    match sync.initialize(&auth).await {
        Ok(()) => {
            log!("created base account:", auth.account.0.clone());
            state::set_list(sync.state().clone());
        }
        Err(err) => {
            error!("error creating base account:", err.to_string());
        }
    }

    render::apply(els);
}

/// Submit-form handler. The link is validated before the input is cleared
/// or any network call is issued.
pub async fn on_submit_gif(els: &Elements) {
    let Some(config) = state::config() else {
        return;
    };
    let Some(authority) = state::wallet_address() else {
        return;
    };

    let link = dom::get_input_value(&els.gif_input);
    let mut sync = list_sync(&config);

    match sync.append(&link, &authority).await {
        AppendOutcome::Appended => {
            log!("gif successfully sent to program:", link);
            dom::set_input_value(&els.gif_input, "");
            state::set_list(sync.state().clone());
        }
        AppendOutcome::EmptyLink => {
            log!("no gif link given");
        }
        AppendOutcome::Failed(err) => {
            // Stale read: the cached snapshot stays as-is.
            error!("error sending gif:", err.to_string());
        }
    }

    render::apply(els);
}

async fn refresh_list() {
    let Some(config) = state::config() else {
        return;
    };
    let authority: Option<WalletAddress> = state::wallet_address();
    if authority.is_none() {
        return;
    }

    log!("fetching gif list...");
    let mut sync = list_sync(&config);
    sync.refresh().await;
    state::set_list(sync.state().clone());
}
