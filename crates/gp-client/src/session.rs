//! Wallet session lifecycle: detect the provider, connect, hold the address.
//!
//! There is no disconnect and no multi-account handling; the session lives
//! as long as the page does.

use gp_types::WalletAddress;

use crate::{ConnectOptions, WalletError, WalletProvider};

/// What a connection attempt produced. Call sites log `Declined` and move
/// on; `ProviderMissing` is the one event worth a user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Connected(WalletAddress),
    ProviderMissing,
    Declined(String),
}

pub struct WalletSession<P> {
    provider: P,
    address: Option<WalletAddress>,
}

impl<P: WalletProvider> WalletSession<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            address: None,
        }
    }

    pub fn address(&self) -> Option<&WalletAddress> {
        self.address.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    /// On-load connection attempt, restricted to previously-trusted
    /// sessions so the user is never prompted unprompted.
    pub async fn try_auto_connect(&mut self) -> SessionEvent {
        if !self.provider.is_available() {
            return SessionEvent::ProviderMissing;
        }

        self.attempt(ConnectOptions {
            only_if_trusted: true,
        })
        .await
    }

    /// Explicit user-initiated connect; the provider may prompt.
    pub async fn connect(&mut self) -> SessionEvent {
        if !self.provider.is_available() {
            return SessionEvent::ProviderMissing;
        }

        self.attempt(ConnectOptions {
            only_if_trusted: false,
        })
        .await
    }

    async fn attempt(&mut self, options: ConnectOptions) -> SessionEvent {
        match self.provider.connect(options).await {
            Ok(address) => {
                self.address = Some(address.clone());
                SessionEvent::Connected(address)
            }
            Err(WalletError::ProviderMissing) => SessionEvent::ProviderMissing,
            Err(WalletError::Declined(reason)) => SessionEvent::Declined(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockWallet;

    fn addr() -> WalletAddress {
        WalletAddress("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin".to_owned())
    }

    #[tokio::test]
    async fn auto_connect_with_no_provider_yields_no_address_and_no_crash() {
        let mut session = WalletSession::new(MockWallet::absent());
        assert_eq!(session.try_auto_connect().await, SessionEvent::ProviderMissing);
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn auto_connect_restores_trusted_session() {
        let mut session = WalletSession::new(MockWallet::trusted(addr()));
        assert_eq!(
            session.try_auto_connect().await,
            SessionEvent::Connected(addr())
        );
        assert_eq!(session.address(), Some(&addr()));
    }

    #[tokio::test]
    async fn auto_connect_does_not_prompt_untrusted_provider() {
        let wallet = MockWallet::untrusted(addr());
        let mut session = WalletSession::new(wallet);

        let event = session.try_auto_connect().await;
        assert!(matches!(event, SessionEvent::Declined(_)));
        assert!(session.address().is_none());
    }

    #[tokio::test]
    async fn explicit_connect_succeeds_where_trusted_only_declined() {
        let mut session = WalletSession::new(MockWallet::untrusted(addr()));

        assert!(matches!(
            session.try_auto_connect().await,
            SessionEvent::Declined(_)
        ));
        assert_eq!(session.connect().await, SessionEvent::Connected(addr()));
        assert!(session.is_connected());
    }
}
