//! Dashboard sidebar with user summary, tab menu and logout.

use campus::AuthState;
use leptos::prelude::*;

use crate::state::dashboard::DashboardTab;

pub const AVATAR_FALLBACK: &str = "/assets/Profile.png";

/// Image source for an avatar; blank or missing images use the placeholder.
pub fn avatar_src(image: Option<&str>) -> String {
    image.filter(|src| !src.is_empty()).unwrap_or(AVATAR_FALLBACK).to_owned()
}

#[component]
pub fn Sidebar(
    #[prop(into)] active: Signal<DashboardTab>,
    #[prop(into)] unread: Signal<usize>,
    on_select: Callback<DashboardTab>,
    on_logout: Callback<()>,
) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let name = move || auth.with(|a| a.user.as_ref().map_or("Student", |u| u.display_name("Student")).to_owned());
    let department = move || auth.with(|a| a.user.as_ref().and_then(|u| u.department.clone()).unwrap_or_default());
    let avatar = move || auth.with(|a| avatar_src(a.user.as_ref().and_then(|u| u.profile_image.as_deref())));

    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <img src=avatar alt="User"/>
                <h3>{name}</h3>
                <p>{department}</p>
            </div>

            {DashboardTab::ALL
                .into_iter()
                .map(|tab| {
                    view! {
                        <button
                            class="menu-item"
                            class:active=move || active.get() == tab
                            on:click=move |_| on_select.run(tab)
                        >
                            {tab.label()}
                            <Show when=move || { tab == DashboardTab::Notifications && unread.get() > 0 }>
                                <span class="badge">{move || unread.get()}</span>
                            </Show>
                        </button>
                    }
                })
                .collect::<Vec<_>>()}

            <button class="menu-item menu-item--logout" on:click=move |_| on_logout.run(())>
                "Logout"
            </button>
        </nav>
    }
}
