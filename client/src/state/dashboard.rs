//! Dashboard tab state machine and fetched data.
//!
//! DESIGN
//! ======
//! The active tab is resolved from the `tab` query parameter at mount and
//! written back to the URL on every switch. Entering a tab returns the
//! fetches it needs instead of performing them, so the page decides how to
//! run them and this model stays testable without a browser:
//!
//! - `events` fetches registered events once per mount (a loaded flag, not
//!   emptiness, decides; an empty result is still "loaded").
//! - `overview` and `notifications` refetch notifications on every entry.
//! - `overview` also loads the public event list once per mount.
//!
//! Responses are applied in arrival order; a slower earlier request may
//! overwrite a faster later one.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use campus::notifications::{mark_read_locally, unread_count};
use campus::{ApiError, Event, Notification};

pub const REGISTERED_EVENTS_FAILED: &str = "Failed to fetch registered events";
pub const NOTIFICATIONS_FAILED: &str = "Failed to fetch notifications";

const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DashboardTab {
    #[default]
    Overview,
    Events,
    Notifications,
    Profile,
}

impl DashboardTab {
    pub const ALL: [Self; 4] = [Self::Overview, Self::Events, Self::Notifications, Self::Profile];

    /// Tab named by the `tab` query value; unknown or missing means overview.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("events") => Self::Events,
            Some("notifications") => Self::Notifications,
            Some("profile") => Self::Profile,
            _ => Self::Overview,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Events => "events",
            Self::Notifications => "notifications",
            Self::Profile => "profile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Dashboard Overview",
            Self::Events => "My Registered Events",
            Self::Notifications => "Notifications",
            Self::Profile => "Profile Settings",
        }
    }

    /// URL that reopens the dashboard on this tab.
    pub fn path(self) -> String {
        match self {
            Self::Overview => DASHBOARD_PATH.to_owned(),
            tab => format!("{DASHBOARD_PATH}?tab={}", tab.as_str()),
        }
    }
}

/// A request the dashboard page must issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardFetch {
    RegisteredEvents,
    Notifications,
    AvailableEvents,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub active: DashboardTab,
    pub registered_events: Vec<Event>,
    pub available_events: Vec<Event>,
    pub notifications: Vec<Notification>,
    /// Banner text for the last failed fetch, cleared by the next success.
    pub error: Option<String>,
    pending: usize,
    registered_requested: bool,
    available_requested: bool,
}

impl DashboardState {
    /// Initial fetches for a fresh mount on `initial`. Notifications are
    /// always loaded so the sidebar badge is correct on every tab.
    pub fn mount(&mut self, initial: DashboardTab) -> Vec<DashboardFetch> {
        let mut fetches = self.enter(initial);
        if !fetches.contains(&DashboardFetch::Notifications) {
            self.pending += 1;
            fetches.push(DashboardFetch::Notifications);
        }
        fetches
    }

    /// Switch to `tab` and return the fetches entering it requires.
    pub fn enter(&mut self, tab: DashboardTab) -> Vec<DashboardFetch> {
        self.active = tab;
        let mut fetches = Vec::new();
        match tab {
            DashboardTab::Events => {
                if !self.registered_requested {
                    self.registered_requested = true;
                    fetches.push(DashboardFetch::RegisteredEvents);
                }
            }
            DashboardTab::Overview => {
                fetches.push(DashboardFetch::Notifications);
                if !self.available_requested {
                    self.available_requested = true;
                    fetches.push(DashboardFetch::AvailableEvents);
                }
            }
            DashboardTab::Notifications => fetches.push(DashboardFetch::Notifications),
            DashboardTab::Profile => {}
        }
        self.pending += fetches.len();
        fetches
    }

    pub fn loading(&self) -> bool {
        self.pending > 0
    }

    fn settle(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    /// Apply a registered-events response. A failure re-arms the fetch so the
    /// next visit to the tab retries.
    pub fn finish_registered_events(&mut self, result: Result<Vec<Event>, ApiError>) {
        self.settle();
        match result {
            Ok(events) => {
                self.registered_events = events;
                self.error = None;
            }
            Err(e) => {
                log::error!("{REGISTERED_EVENTS_FAILED}: {e}");
                self.registered_requested = false;
                self.error = Some(REGISTERED_EVENTS_FAILED.to_owned());
            }
        }
    }

    /// Apply a notifications response whose read flags are already merged.
    pub fn finish_notifications(&mut self, result: Result<Vec<Notification>, ApiError>) {
        self.settle();
        match result {
            Ok(notifications) => {
                self.notifications = notifications;
                self.error = None;
            }
            Err(e) => {
                log::error!("{NOTIFICATIONS_FAILED}: {e}");
                self.error = Some(NOTIFICATIONS_FAILED.to_owned());
            }
        }
    }

    /// Apply the public event list; failures are logged only.
    pub fn finish_available_events(&mut self, result: Result<Vec<Event>, ApiError>) {
        self.settle();
        match result {
            Ok(events) => self.available_events = events,
            Err(e) => {
                log::warn!("failed to fetch available events: {e}");
                self.available_requested = false;
            }
        }
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        mark_read_locally(&mut self.notifications, id)
    }

    pub fn unread_count(&self) -> usize {
        unread_count(&self.notifications)
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
