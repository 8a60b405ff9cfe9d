//! Student dashboard with overview, registered events, notifications and
//! profile tabs.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route for students. The active tab lives
//! in [`DashboardState`] and is mirrored into the `?tab=` query parameter in
//! both directions, so reload and back/forward keep the tab. Fetches planned
//! by the state machine are run here, one task each, and their results are
//! written back into the same signal.

use campus::notifications::acknowledge_read;
use campus::{AuthState, ReadOverlay};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::notifications_panel::NotificationsPanel;
use crate::components::overview::Overview;
use crate::components::profile_settings::ProfileSettings;
use crate::components::registered_events::RegisteredEvents;
use crate::components::sidebar::Sidebar;
use crate::state::auth::AppSession;
use crate::state::dashboard::{DashboardFetch, DashboardState, DashboardTab};
use crate::util::auth::install_route_guard;
use crate::util::storage::BrowserStorage;

/// Spawn one task per planned fetch.
fn run_fetches(
    session: &AppSession,
    overlay: &ReadOverlay<BrowserStorage>,
    dashboard: RwSignal<DashboardState>,
    fetches: Vec<DashboardFetch>,
) {
    for fetch in fetches {
        let session = session.clone();
        let overlay = overlay.clone();
        leptos::task::spawn_local(async move {
            let api = session.api();
            match fetch {
                DashboardFetch::RegisteredEvents => {
                    let result = api.registered_events().await;
                    dashboard.update(|s| s.finish_registered_events(result));
                }
                DashboardFetch::Notifications => {
                    let result = api.notifications().await.map(|list| overlay.apply(list));
                    dashboard.update(|s| s.finish_notifications(result));
                }
                DashboardFetch::AvailableEvents => {
                    let result = api.events().await;
                    dashboard.update(|s| s.finish_available_events(result));
                }
            }
        });
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();
    let overlay = expect_context::<ReadOverlay<BrowserStorage>>();
    let navigate = use_navigate();
    let query = use_query_map();

    let initial = DashboardTab::from_query(query.get_untracked().get("tab").as_deref());
    install_route_guard(auth, false, initial.path(), navigate.clone());

    let mut state = DashboardState::default();
    let fetches = state.mount(initial);
    let dashboard = RwSignal::new(state);
    if auth.get_untracked().user.is_some() {
        run_fetches(&session, &overlay, dashboard, fetches);
    }

    let active = Memo::new(move |_| dashboard.with(|s| s.active));

    // URL -> state: back/forward or a hand-edited `?tab=`.
    {
        let session = session.clone();
        let overlay = overlay.clone();
        Effect::new(move || {
            let tab = DashboardTab::from_query(query.get().get("tab").as_deref());
            if tab != active.get_untracked() {
                let fetches = dashboard.try_update(|s| s.enter(tab)).unwrap_or_default();
                run_fetches(&session, &overlay, dashboard, fetches);
            }
        });
    }

    // State -> URL.
    Effect::new(move || {
        let tab = active.get();
        if DashboardTab::from_query(query.get_untracked().get("tab").as_deref()) != tab {
            navigate(&tab.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_select = {
        let session = session.clone();
        let overlay = overlay.clone();
        Callback::new(move |tab: DashboardTab| {
            let fetches = dashboard.try_update(|s| s.enter(tab)).unwrap_or_default();
            run_fetches(&session, &overlay, dashboard, fetches);
        })
    };

    let on_mark_read = {
        let session = session.clone();
        Callback::new(move |id: String| {
            overlay.mark(&id);
            dashboard.update(|s| {
                s.mark_read(&id);
            });
            let session = session.clone();
            leptos::task::spawn_local(async move { acknowledge_read(session.api(), &id).await });
        })
    };

    let on_logout = Callback::new(move |()| session.logout());

    view! {
        <Show
            when=move || auth.get().user.is_some()
            fallback=|| view! { <div class="dashboard-page"><p>"Redirecting to login..."</p></div> }
        >
            <div class="student-dashboard">
                <Sidebar
                    active=active
                    unread=Signal::derive(move || dashboard.with(DashboardState::unread_count))
                    on_select=on_select
                    on_logout=on_logout
                />
                <main class="main-content">
                    <Show when=move || dashboard.with(|s| s.error.is_some())>
                        <div class="dashboard-error" role="alert">
                            <span>{move || dashboard.with(|s| s.error.clone().unwrap_or_default())}</span>
                            <button class="dashboard-error__dismiss" on:click=move |_| dashboard.update(DashboardState::dismiss_error)>
                                "✕"
                            </button>
                        </div>
                    </Show>
                    {move || match active.get() {
                        DashboardTab::Overview => view! { <Overview dashboard=dashboard on_select=on_select/> }.into_any(),
                        DashboardTab::Events => view! { <RegisteredEvents dashboard=dashboard/> }.into_any(),
                        DashboardTab::Notifications => {
                            view! { <NotificationsPanel dashboard=dashboard on_mark_read=on_mark_read/> }.into_any()
                        }
                        DashboardTab::Profile => view! { <ProfileSettings/> }.into_any(),
                    }}
                </main>
            </div>
        </Show>
    }
}
