//! Client core for the risk monitor frontend: session and credential
//! handling, the GraphQL call layer, scan polling, and CSV export.

pub mod api;
pub mod config;
pub mod poll;
pub mod session;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

/// One-time browser setup: panic hook, console logging, and the background
/// fetch of `config.json`.
#[cfg(target_arch = "wasm32")]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    wasm_bindgen_futures::spawn_local(async {
        config::init().await;
        log::info!("Runtime configuration loaded");
    });
}
