//! Notifications tab with per-item "mark as read".

use leptos::prelude::*;

use crate::state::dashboard::DashboardState;

#[component]
pub fn NotificationsPanel(dashboard: RwSignal<DashboardState>, on_mark_read: Callback<String>) -> impl IntoView {
    let items = move || dashboard.with(|s| s.notifications.clone());

    view! {
        <section class="notifications">
            <h2>"Notifications"</h2>
            <Show
                when=move || dashboard.with(|s| !s.notifications.is_empty())
                fallback=move || {
                    view! {
                        <p class="empty-state">
                            {move || if dashboard.with(DashboardState::loading) { "Loading notifications..." } else { "No notifications." }}
                        </p>
                    }
                }
            >
                <ul class="notification-list">
                    {move || {
                        items()
                            .into_iter()
                            .map(|n| {
                                let id = n.id.clone();
                                view! {
                                    <li class="notification-item" class:unread=!n.read>
                                        {n.title.map(|t| view! { <h4>{t}</h4> })}
                                        <p>{n.message}</p>
                                        {n.created_at.map(|at| view! { <time>{at}</time> })}
                                        <Show when=move || !n.read>
                                            <button
                                                class="notification-item__mark"
                                                on:click={
                                                    let id = id.clone();
                                                    move |_| on_mark_read.run(id.clone())
                                                }
                                            >
                                                "Mark as read"
                                            </button>
                                        </Show>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </Show>
        </section>
    }
}
