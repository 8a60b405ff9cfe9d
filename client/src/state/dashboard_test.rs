use super::*;
use campus::TransportError;

fn event(id: &str) -> Event {
    Event { id: id.to_owned(), ..Event::default() }
}

fn notification(id: &str, read: bool) -> Notification {
    Notification { id: id.to_owned(), title: None, message: String::new(), read, created_at: None }
}

fn offline() -> ApiError {
    ApiError::Transport(TransportError("offline".to_owned()))
}

// =============================================================
// Tabs
// =============================================================

#[test]
fn from_query_resolves_known_tabs_and_defaults_to_overview() {
    assert_eq!(DashboardTab::from_query(Some("events")), DashboardTab::Events);
    assert_eq!(DashboardTab::from_query(Some("notifications")), DashboardTab::Notifications);
    assert_eq!(DashboardTab::from_query(Some("profile")), DashboardTab::Profile);
    assert_eq!(DashboardTab::from_query(Some("overview")), DashboardTab::Overview);
    assert_eq!(DashboardTab::from_query(Some("bogus")), DashboardTab::Overview);
    assert_eq!(DashboardTab::from_query(None), DashboardTab::Overview);
}

#[test]
fn path_omits_query_for_overview() {
    assert_eq!(DashboardTab::Overview.path(), "/dashboard");
    assert_eq!(DashboardTab::Events.path(), "/dashboard?tab=events");
    assert_eq!(DashboardTab::Profile.path(), "/dashboard?tab=profile");
}

#[test]
fn path_round_trips_through_from_query() {
    for tab in DashboardTab::ALL {
        assert_eq!(DashboardTab::from_query(Some(tab.as_str())), tab);
    }
}

// =============================================================
// Fetch planning
// =============================================================

#[test]
fn mount_on_overview_loads_notifications_and_available_events() {
    let mut state = DashboardState::default();
    let fetches = state.mount(DashboardTab::Overview);
    assert_eq!(fetches, vec![DashboardFetch::Notifications, DashboardFetch::AvailableEvents]);
    assert!(state.loading());
}

#[test]
fn mount_on_events_also_loads_notifications_for_badge() {
    let mut state = DashboardState::default();
    let fetches = state.mount(DashboardTab::Events);
    assert_eq!(fetches, vec![DashboardFetch::RegisteredEvents, DashboardFetch::Notifications]);
    assert_eq!(state.active, DashboardTab::Events);
}

#[test]
fn events_tab_fetches_exactly_once_per_mount() {
    let mut state = DashboardState::default();
    state.mount(DashboardTab::Profile);

    assert_eq!(state.enter(DashboardTab::Events), vec![DashboardFetch::RegisteredEvents]);
    state.finish_registered_events(Ok(Vec::new()));
    assert!(state.enter(DashboardTab::Profile).is_empty());
    assert!(state.enter(DashboardTab::Events).is_empty());
}

#[test]
fn events_tab_does_not_refetch_while_first_request_is_in_flight() {
    let mut state = DashboardState::default();
    state.enter(DashboardTab::Events);
    state.enter(DashboardTab::Profile);
    assert!(state.enter(DashboardTab::Events).is_empty());
}

#[test]
fn failed_registered_events_fetch_is_retried_on_next_entry() {
    let mut state = DashboardState::default();
    state.enter(DashboardTab::Events);
    state.finish_registered_events(Err(offline()));

    assert_eq!(state.error.as_deref(), Some(REGISTERED_EVENTS_FAILED));
    state.enter(DashboardTab::Profile);
    assert_eq!(state.enter(DashboardTab::Events), vec![DashboardFetch::RegisteredEvents]);
}

#[test]
fn notifications_refetch_on_every_entry() {
    let mut state = DashboardState::default();
    assert_eq!(state.enter(DashboardTab::Notifications), vec![DashboardFetch::Notifications]);
    assert_eq!(state.enter(DashboardTab::Notifications), vec![DashboardFetch::Notifications]);
    assert_eq!(state.enter(DashboardTab::Overview), vec![DashboardFetch::Notifications, DashboardFetch::AvailableEvents]);
    assert_eq!(state.enter(DashboardTab::Overview), vec![DashboardFetch::Notifications]);
}

#[test]
fn profile_tab_needs_no_fetch() {
    let mut state = DashboardState::default();
    assert!(state.enter(DashboardTab::Profile).is_empty());
    assert!(!state.loading());
}

// =============================================================
// Responses
// =============================================================

#[test]
fn loading_clears_once_every_fetch_settles() {
    let mut state = DashboardState::default();
    state.mount(DashboardTab::Overview);

    state.finish_notifications(Ok(vec![notification("1", false)]));
    assert!(state.loading());
    state.finish_available_events(Ok(vec![event("e1")]));
    assert!(!state.loading());
    assert_eq!(state.available_events.len(), 1);
}

#[test]
fn notification_failure_sets_banner_and_success_clears_it() {
    let mut state = DashboardState::default();
    state.enter(DashboardTab::Notifications);
    state.finish_notifications(Err(offline()));
    assert_eq!(state.error.as_deref(), Some(NOTIFICATIONS_FAILED));

    state.enter(DashboardTab::Notifications);
    state.finish_notifications(Ok(Vec::new()));
    assert_eq!(state.error, None);
}

#[test]
fn available_events_failure_is_silent() {
    let mut state = DashboardState::default();
    state.enter(DashboardTab::Overview);
    state.finish_available_events(Err(offline()));
    assert_eq!(state.error, None);
}

#[test]
fn late_response_overwrites_earlier_one() {
    let mut state = DashboardState::default();
    state.enter(DashboardTab::Notifications);
    state.enter(DashboardTab::Notifications);

    state.finish_notifications(Ok(vec![notification("new", false)]));
    state.finish_notifications(Ok(vec![notification("old", false)]));

    assert_eq!(state.notifications[0].id, "old");
}

#[test]
fn mark_read_updates_unread_count() {
    let mut state = DashboardState::default();
    state.enter(DashboardTab::Notifications);
    state.finish_notifications(Ok(vec![notification("1", false), notification("2", true), notification("3", false)]));
    assert_eq!(state.unread_count(), 2);

    assert!(state.mark_read("1"));
    assert!(state.mark_read("1"));
    assert_eq!(state.unread_count(), 1);
}
