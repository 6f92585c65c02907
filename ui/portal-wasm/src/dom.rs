//! DOM element bindings. All references are resolved once at startup; to
//! add new UI elements, add a field here and bind it in `Elements::bind()`.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn set_input_value(el: &HtmlInputElement, val: &str) {
    el.set_value(val);
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn create_element(tag: &str) -> Element {
    doc().create_element(tag).unwrap()
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

/// Fire-and-forget user notice; the only distinct error surface in the app.
pub fn alert(message: &str) {
    let _ = window().alert_with_message(message);
}

// ── Elements struct ──

/// All DOM references used by the portal page.
#[derive(Clone)]
pub struct Elements {
    pub app_root: Element,

    // Landing (not connected)
    pub landing_container: Element,
    pub connect_btn: HtmlElement,

    // Connected
    pub connected_container: Element,
    pub init_container: Element,
    pub init_btn: HtmlElement,
    pub board_container: Element,
    pub gif_form: Element,
    pub gif_input: HtmlInputElement,
    pub gif_grid: Element,

    // Stale / notice bar
    pub notice_bar: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after the document loads.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            app_root: get_el!("appRoot"),
            landing_container: get_el!("landingContainer"),
            connect_btn: get_html!("connectBtn"),
            connected_container: get_el!("connectedContainer"),
            init_container: get_el!("initContainer"),
            init_btn: get_html!("initBtn"),
            board_container: get_el!("boardContainer"),
            gif_form: get_el!("gifForm"),
            gif_input: get_input!("gifInput"),
            gif_grid: get_el!("gifGrid"),
            notice_bar: get_el!("noticeBar"),
        })
    }
}
