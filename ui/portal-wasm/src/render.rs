//! Applies the pure view to the DOM. No business logic here: which branch
//! renders is decided by `gp_client::view`.

use gp_client::{View, view};
use gp_types::ListItem;

use crate::dom::{self, Elements};
use crate::state;

const HIDDEN: &str = "hidden";

/// Re-render the page from the current application state.
pub fn apply(els: &Elements) {
    let address = state::wallet_address();
    let list = state::list();

    match view(address.as_ref(), &list) {
        View::Landing => {
            dom::toggle_class(&els.app_root, "authed-container", false);
            show(els, [true, false, false, false]);
        }
        View::OneTimeInit => {
            dom::toggle_class(&els.app_root, "authed-container", true);
            show(els, [false, true, true, false]);
        }
        View::Board(items) => {
            dom::toggle_class(&els.app_root, "authed-container", true);
            show(els, [false, true, false, false]);
            render_grid(els, items);
        }
        View::Unavailable => {
            dom::toggle_class(&els.app_root, "authed-container", true);
            show(els, [false, true, false, true]);
            dom::set_text(
                &els.notice_bar,
                "The list is temporarily unavailable. Try again in a moment.",
            );
        }
    }
}

/// Visibility of [landing, connected, init, notice].
fn show(els: &Elements, visible: [bool; 4]) {
    dom::toggle_class(&els.landing_container, HIDDEN, !visible[0]);
    dom::toggle_class(&els.connected_container, HIDDEN, !visible[1]);
    dom::toggle_class(&els.init_container, HIDDEN, !visible[2]);
    dom::toggle_class(&els.notice_bar, HIDDEN, !visible[3]);

    // The board (form + grid) is the connected default; the init prompt
    // replaces it until the account exists.
    dom::toggle_class(&els.board_container, HIDDEN, !visible[1] || visible[2]);
}

fn render_grid(els: &Elements, items: &[ListItem]) {
    els.gif_grid.set_inner_html("");

    for item in items {
        let card = dom::create_element("div");
        let _ = card.set_attribute("class", "gif-item");

        let img = dom::create_element("img");
        let _ = img.set_attribute("src", &item.link);
        let _ = img.set_attribute("alt", "submitted gif");

        let posted_by = dom::create_element("p");
        let _ = posted_by.set_attribute("class", "posted-by-text");
        dom::set_text(&posted_by, &format!("Posted by: {}", item.posted_by));

        let _ = card.append_child(&img);
        let _ = card.append_child(&posted_by);
        let _ = els.gif_grid.append_child(&card);
    }
}
