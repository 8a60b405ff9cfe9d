//! Local read-state overlay for notifications.
//!
//! DESIGN
//! ======
//! A notification is read if the server says so OR its id is in the locally
//! persisted read-set. The local set is a pure override layer: marking read
//! updates it immediately, the backend acknowledgement is best-effort, and
//! entries are never removed.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use crate::http::{ApiClient, Transport};
use crate::storage::{KeyValueStore, READ_NOTIFICATIONS_KEY};
use crate::types::Notification;

/// Persisted set of notification ids the user has read on this device.
#[derive(Clone, Debug)]
pub struct ReadOverlay<S> {
    store: S,
}

impl<S: KeyValueStore> ReadOverlay<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Ids in insertion order. A corrupt entry reads as an empty set.
    pub fn ids(&self) -> Vec<String> {
        let Some(raw) = self.store.get(READ_NOTIFICATIONS_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(values) => values.into_iter().filter_map(id_text).collect(),
            Err(e) => {
                log::warn!("ignoring unreadable {READ_NOTIFICATIONS_KEY}: {e}");
                Vec::new()
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids().iter().any(|known| known == id)
    }

    /// Add `id` to the persisted set. Returns `false` if it was already there.
    pub fn mark(&self, id: &str) -> bool {
        let mut ids = self.ids();
        if ids.iter().any(|known| known == id) {
            return false;
        }
        ids.push(id.to_owned());
        match serde_json::to_string(&ids) {
            Ok(raw) => self.store.set(READ_NOTIFICATIONS_KEY, &raw),
            Err(e) => log::warn!("failed to encode {READ_NOTIFICATIONS_KEY}: {e}"),
        }
        true
    }

    /// Merge the local set into a server snapshot; local read wins.
    pub fn apply(&self, notifications: Vec<Notification>) -> Vec<Notification> {
        let ids = self.ids();
        notifications
            .into_iter()
            .map(|mut notification| {
                notification.read = notification.read || ids.iter().any(|id| *id == notification.id);
                notification
            })
            .collect()
    }
}

fn id_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(id) => Some(id),
        serde_json::Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Flip `read` on the matching notification. Returns whether one matched.
pub fn mark_read_locally(notifications: &mut [Notification], id: &str) -> bool {
    let mut matched = false;
    for notification in notifications.iter_mut().filter(|n| n.id == id) {
        notification.read = true;
        matched = true;
    }
    matched
}

#[must_use]
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

/// Tell the backend `id` was read; failures are logged and absorbed.
pub async fn acknowledge_read<T: Transport>(api: &ApiClient<T>, id: &str) {
    if let Err(e) = api.mark_notification_read(id).await {
        log::warn!("failed to mark notification {id} read on server: {e}");
    }
}
