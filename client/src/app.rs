//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns the one [`AppSession`] for the page and hands it to every route
//! through context. The stored token is validated once at startup; until that
//! check finishes no route renders, so protected pages never flash their
//! unauthenticated state.

use campus::config::{ClientConfig, DEFAULT_BASE_URL};
use campus::{AuthState, ReadOverlay};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::net::transport::FetchTransport;
use crate::pages::{admin::AdminPage, dashboard::DashboardPage, login::LoginPage, register::RegisterPage};
use crate::state::auth::{AppSession, AuthSignal};
use crate::util::auth::home_path;
use crate::util::storage::BrowserStorage;

/// Backend origin baked in at build time via `CAMPUS_API_URL`.
pub fn api_config() -> ClientConfig {
    let raw = option_env!("CAMPUS_API_URL").unwrap_or(DEFAULT_BASE_URL);
    ClientConfig::new(raw).unwrap_or_else(|e| {
        log::error!("{e}; falling back to {DEFAULT_BASE_URL}");
        ClientConfig::default()
    })
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let session = AppSession::new(api_config(), FetchTransport, BrowserStorage, AuthSignal::new(auth));

    provide_context(auth);
    provide_context(session.clone());
    provide_context(ReadOverlay::new(BrowserStorage));

    leptos::task::spawn_local(async move { session.check_auth().await });

    view! {
        <Title text="Campus Events"/>

        <Router>
            <Show
                when=move || !auth.get().loading
                fallback=|| view! { <div class="app-loading"><p>"Loading..."</p></div> }
            >
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomeRedirect/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=(StaticSegment("admin"), StaticSegment("dashboard")) view=AdminPage/>
                </Routes>
            </Show>
        </Router>
    }
}

/// `/` sends the visitor to the page matching their auth state.
#[component]
fn HomeRedirect() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    move || view! { <Redirect path=home_path(&auth.get())/> }
}
