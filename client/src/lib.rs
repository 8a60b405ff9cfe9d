//! # client
//!
//! Leptos CSR frontend for the campus events platform.
//!
//! Pages and dashboard components live here together with the browser
//! bindings (`localStorage` store, `fetch` transport). Everything that is not
//! browser-specific (wire types, the HTTP wrapper, the session lifecycle)
//! comes from the `campus` crate.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Install browser logging and mount [`app::App`] on `<body>`.
#[cfg(feature = "csr")]
pub fn mount() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger already installed: {e}");
    }
    leptos::mount::mount_to_body(app::App);
}
