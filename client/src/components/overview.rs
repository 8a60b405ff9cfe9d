//! Overview tab: headline counts, upcoming events and recent notifications.

use leptos::prelude::*;

use crate::components::event_card::EventCard;
use crate::state::dashboard::{DashboardState, DashboardTab};

const PREVIEW_LEN: usize = 3;

#[component]
pub fn Overview(dashboard: RwSignal<DashboardState>, on_select: Callback<DashboardTab>) -> impl IntoView {
    let registered = move || dashboard.with(|s| s.registered_events.len());
    let unread = move || dashboard.with(DashboardState::unread_count);
    let available = move || dashboard.with(|s| s.available_events.len());

    let upcoming = move || {
        dashboard.with(|s| s.available_events.iter().take(PREVIEW_LEN).cloned().collect::<Vec<_>>())
    };
    let recent = move || {
        dashboard.with(|s| s.notifications.iter().take(PREVIEW_LEN).cloned().collect::<Vec<_>>())
    };

    view! {
        <section class="dashboard-overview">
            <h2>"Dashboard Overview"</h2>

            <div class="stats-grid">
                <button class="stat-card" on:click=move |_| on_select.run(DashboardTab::Events)>
                    <span class="stat-card__value">{registered}</span>
                    <span class="stat-card__label">"Registered events"</span>
                </button>
                <button class="stat-card" on:click=move |_| on_select.run(DashboardTab::Notifications)>
                    <span class="stat-card__value">{unread}</span>
                    <span class="stat-card__label">"Unread notifications"</span>
                </button>
                <div class="stat-card">
                    <span class="stat-card__value">{available}</span>
                    <span class="stat-card__label">"Available events"</span>
                </div>
            </div>

            <div class="overview-columns">
                <div class="overview-panel">
                    <h3>"Upcoming events"</h3>
                    <Show
                        when=move || { available() > 0 }
                        fallback=move || {
                            view! {
                                <p class="empty-state">
                                    {move || if dashboard.with(DashboardState::loading) { "Loading events..." } else { "No upcoming events." }}
                                </p>
                            }
                        }
                    >
                        {move || {
                            upcoming()
                                .into_iter()
                                .map(|event| view! { <EventCard event=event compact=true/> })
                                .collect::<Vec<_>>()
                        }}
                    </Show>
                </div>

                <div class="overview-panel">
                    <h3>"Recent notifications"</h3>
                    <Show
                        when=move || dashboard.with(|s| !s.notifications.is_empty())
                        fallback=|| view! { <p class="empty-state">"No notifications yet."</p> }
                    >
                        <ul class="overview-notifications">
                            {move || {
                                recent()
                                    .into_iter()
                                    .map(|n| {
                                        view! {
                                            <li class:unread=!n.read>{n.title.unwrap_or(n.message)}</li>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </ul>
                    </Show>
                </div>
            </div>
        </section>
    }
}
