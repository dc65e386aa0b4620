//! # lumastack-client
//!
//! Leptos frontend for the LumaStack repository dashboard.
//!
//! The crate holds the domain types and the API seam (`net`), the reactive
//! stores (`state`), the route table and navigation guards (`router`), form
//! validation (`schemas`), and the route-level pages. The `ssr` feature is
//! enabled by the server for rendering; `hydrate` builds the WASM bundle.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod router;
pub mod schemas;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// WASM entry point: wire logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
