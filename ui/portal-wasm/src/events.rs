//! Event wiring. Async handlers are spawned onto the browser event loop via
//! `wasm_bindgen_futures::spawn_local`; there is no queueing or
//! de-duplication, matching the fire-once design.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom::Elements;
use crate::ops;

/// Attach an async click handler to an HtmlElement.
macro_rules! on_click_async {
    ($el:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&els2).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) {
    on_click_async!(els.connect_btn, els, ops::on_connect_click);
    on_click_async!(els.init_btn, els, ops::on_initialize);

    // Form submit (enter key or button) drives the append path.
    {
        let els2 = els.clone();
        let cb = Closure::wrap(Box::new(move |event: web_sys::Event| {
            event.prevent_default();
            let els3 = els2.clone();
            wasm_bindgen_futures::spawn_local(async move {
                ops::on_submit_gif(&els3).await;
            });
        }) as Box<dyn FnMut(_)>);
        els.gif_form
            .add_event_listener_with_callback("submit", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
}
