//! GifPort WASM front-end.
//!
//! Single-page app: connect a browser wallet, submit GIF links to the
//! shared program account, render the list. Each concern lives in its own
//! module; the heavy lifting is in the `gp-*` crates.

pub mod dom;
pub mod events;
pub mod ops;
pub mod provider;
pub mod render;
pub mod state;

use std::rc::Rc;

use gloo_console::error;
use gp_keys::BaseAccountKeypair;
use gp_types::{Cluster, IdlDocument, KeypairFile, ProgramConfig};
use wasm_bindgen::prelude::*;

/// Interface-description document for the remote program, bundled at build
/// time. Not user-configurable.
const IDL_JSON: &str = include_str!("../assets/idl.json");

/// The shared base account's keypair file. Every client targets this one
/// account; the keypair co-signs the one-time initialization.
const KEYPAIR_JSON: &str = include_str!("../assets/keypair.json");

const CLUSTER: Cluster = Cluster::Devnet;

/// WASM entry point, called when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    match load_config() {
        Ok((config, keypair)) => {
            state::set_config(config);
            state::set_base_keypair(Rc::new(keypair));
        }
        Err(message) => {
            error!("startup configuration failed:", message.clone());
            return Err(JsValue::from_str(&message));
        }
    }

    events::bind_events(&els);
    render::apply(&els);

    ops::on_page_load(&els).await;

    Ok(())
}

fn load_config() -> Result<(ProgramConfig, BaseAccountKeypair), String> {
    let idl = IdlDocument::parse(IDL_JSON).map_err(|err| format!("IDL: {err}"))?;

    let keypair_file = KeypairFile::parse(KEYPAIR_JSON).map_err(|err| format!("keypair: {err}"))?;
    let keypair =
        BaseAccountKeypair::from_keypair_file(&keypair_file).map_err(|err| err.to_string())?;

    let config = ProgramConfig::from_idl(&idl, &CLUSTER, keypair.address())
        .map_err(|err| err.to_string())?;

    Ok((config, keypair))
}
