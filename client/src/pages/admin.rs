//! Admin landing page listing every published event.

use campus::session::ADMIN_DASHBOARD_PATH;
use campus::{AuthState, Event};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::event_card::EventCard;
use crate::state::auth::AppSession;
use crate::util::auth::install_route_guard;

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();
    install_route_guard(auth, true, ADMIN_DASHBOARD_PATH.to_owned(), use_navigate());

    let events = RwSignal::new(Vec::<Event>::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    if session.is_admin() {
        loading.set(true);
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.api().events().await {
                Ok(list) => events.set(list),
                Err(e) => error.set(Some(e.user_message("Failed to fetch events"))),
            }
            loading.set(false);
        });
    }

    let admin_name = move || auth.with(|a| a.user.as_ref().map_or("Admin", |u| u.display_name("Admin")).to_owned());

    view! {
        <Show
            when=move || auth.with(|a| a.user.is_some())
            fallback=|| view! { <div class="dashboard-page"><p>"Redirecting to login..."</p></div> }
        >
            <div class="admin-dashboard">
                <header class="admin-dashboard__header">
                    <h2>"Admin Dashboard"</h2>
                    <span class="admin-dashboard__user">{admin_name}</span>
                    <button class="menu-item menu-item--logout" on:click={
                        let session = session.clone();
                        move |_| session.logout()
                    }>
                        "Logout"
                    </button>
                </header>
                <Show when=move || error.get().is_some()>
                    <p class="dashboard-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show
                    when=move || !events.with(Vec::is_empty)
                    fallback=move || {
                        view! { <p class="empty-state">{move || if loading.get() { "Loading events..." } else { "No events yet." }}</p> }
                    }
                >
                    <div class="events-grid">
                        {move || events.get().into_iter().map(|event| view! { <EventCard event=event/> }).collect::<Vec<_>>()}
                    </div>
                </Show>
            </div>
        </Show>
    }
}
