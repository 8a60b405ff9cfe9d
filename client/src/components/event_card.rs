//! Card for a single event, shared by the overview and registered list.

#[cfg(test)]
#[path = "event_card_test.rs"]
mod event_card_test;

use campus::Event;
use leptos::prelude::*;

const DEFAULT_EVENT_IMAGE: &str = "/assets/Events.png";

/// Illustration chosen from keywords in the event title.
pub fn event_image(title: Option<&str>) -> &'static str {
    let title = title.unwrap_or_default().to_lowercase();
    let has = |words: [&str; 2]| words.iter().any(|w| title.contains(w));
    if has(["tech", "symposium"]) {
        "/assets/annual-tech.png"
    } else if has(["career", "workshop"]) {
        "/assets/career-dev.png"
    } else if has(["spring", "fest"]) {
        "/assets/spring-fest.png"
    } else if has(["inter", "college"]) {
        "/assets/inter-clg.png"
    } else {
        DEFAULT_EVENT_IMAGE
    }
}

/// "date · time" when either is known.
pub fn event_when(event: &Event) -> Option<String> {
    match (event.date.as_deref(), event.time.as_deref()) {
        (Some(date), Some(time)) => Some(format!("{date} · {time}")),
        (Some(one), None) | (None, Some(one)) => Some(one.to_owned()),
        (None, None) => None,
    }
}

#[component]
pub fn EventCard(event: Event, #[prop(optional)] compact: bool) -> impl IntoView {
    let image = event_image(event.title.as_deref());
    let title = event.title_or_untitled().to_owned();
    let when = event_when(&event);

    view! {
        <article class="event-card" class:event-card--compact=compact>
            <Show when=move || !compact>
                <img class="event-card__image" src=image alt=""/>
            </Show>
            <div class="event-card__body">
                <h4 class="event-card__title">{title}</h4>
                {when.map(|w| view! { <p class="event-card__when">{w}</p> })}
                {event.venue.map(|v| view! { <p class="event-card__venue">{v}</p> })}
                {event.category.map(|c| view! { <span class="event-card__tag">{c}</span> })}
                {event.status.map(|s| view! { <span class="event-card__status">{s}</span> })}
                {(!compact)
                    .then_some(event.description)
                    .flatten()
                    .map(|d| view! { <p class="event-card__description">{d}</p> })}
            </div>
        </article>
    }
}
