//! "My Registered Events" tab.

use leptos::prelude::*;

use crate::components::event_card::EventCard;
use crate::state::dashboard::DashboardState;

#[component]
pub fn RegisteredEvents(dashboard: RwSignal<DashboardState>) -> impl IntoView {
    let events = move || dashboard.with(|s| s.registered_events.clone());
    let is_empty = move || dashboard.with(|s| s.registered_events.is_empty());

    view! {
        <section class="my-registered-events">
            <h2>"My Registered Events"</h2>
            <Show
                when=move || !is_empty()
                fallback=move || {
                    view! {
                        <p class="empty-state">
                            {move || {
                                if dashboard.with(DashboardState::loading) {
                                    "Loading events..."
                                } else {
                                    "You haven't registered for any events yet."
                                }
                            }}
                        </p>
                    }
                }
            >
                <div class="events-grid">
                    {move || events().into_iter().map(|event| view! { <EventCard event=event/> }).collect::<Vec<_>>()}
                </div>
            </Show>
        </section>
    }
}
