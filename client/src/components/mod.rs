//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the dashboard chrome and tab bodies. Data arrives as the
//! shared dashboard signal; mutations go back to the page through callbacks.

pub mod event_card;
pub mod notifications_panel;
pub mod overview;
pub mod profile_settings;
pub mod registered_events;
pub mod sidebar;
