//! Pure view derivation. Rendering backends (the WASM front-end) apply a
//! [`View`] to their output; no business logic lives past this point.

use gp_types::{ListItem, WalletAddress};

use crate::sync::ListState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<'a> {
    /// Not connected: landing image plus the connect button.
    Landing,
    /// Connected, account never created: the one-time initialization button.
    OneTimeInit,
    /// Connected with a snapshot (possibly empty): submit form plus grid.
    Board(&'a [ListItem]),
    /// Connected but the last fetch failed; the snapshot is stale.
    Unavailable,
}

pub fn view<'a>(address: Option<&WalletAddress>, list: &'a ListState) -> View<'a> {
    if address.is_none() {
        return View::Landing;
    }

    match list {
        // First fetch still in flight: render the empty board rather than
        // inviting a spurious initialization.
        ListState::Unknown => View::Board(&[]),
        ListState::Uninitialized => View::OneTimeInit,
        ListState::Ready(items) => View::Board(items),
        ListState::Unavailable => View::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> WalletAddress {
        WalletAddress("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin".to_owned())
    }

    #[test]
    fn disconnected_always_lands() {
        for list in [
            ListState::Unknown,
            ListState::Uninitialized,
            ListState::Ready(vec![]),
            ListState::Unavailable,
        ] {
            assert_eq!(view(None, &list), View::Landing);
        }
    }

    #[test]
    fn connected_branches() {
        let a = addr();
        assert_eq!(view(Some(&a), &ListState::Unknown), View::Board(&[]));
        assert_eq!(view(Some(&a), &ListState::Uninitialized), View::OneTimeInit);
        assert_eq!(view(Some(&a), &ListState::Unavailable), View::Unavailable);

        let items = vec![ListItem {
            link: "https://media.giphy.com/a.gif".to_owned(),
            posted_by: a.clone(),
        }];
        let ready = ListState::Ready(items.clone());
        assert_eq!(view(Some(&a), &ready), View::Board(items.as_slice()));
    }
}
