//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use campus::session::{ADMIN_DASHBOARD_PATH, DASHBOARD_PATH};
use campus::{AuthState, Role};
use leptos::prelude::*;
use leptos_router::NavigateOptions;

pub const LOGIN_PATH: &str = "/login";

/// True once the startup check has finished without finding a user.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Landing page for `/`.
pub fn home_path(state: &AuthState) -> &'static str {
    match &state.user {
        None => LOGIN_PATH,
        Some(user) if user.role == Role::Admin => ADMIN_DASHBOARD_PATH,
        Some(_) => DASHBOARD_PATH,
    }
}

/// Login URL remembering the page the visitor was bounced from.
///
/// Only plain paths with at most one `key=value` query pair are carried;
/// anything that would need escaping, or that points back at the login page,
/// is dropped.
pub fn login_path(from: &str) -> String {
    let (path, query) = from.split_once('?').unwrap_or((from, ""));
    let plain = path.starts_with('/')
        && !path.starts_with("//")
        && path.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'))
        && query.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '='));
    if !plain || path == "/" || path == LOGIN_PATH {
        return LOGIN_PATH.to_owned();
    }
    format!("{LOGIN_PATH}?from={from}")
}

/// Where a protected route should send the visitor, if anywhere.
///
/// Unauthenticated visitors go to the login page; authenticated non-admins
/// on an admin route go to the student dashboard.
pub fn guard_redirect(state: &AuthState, requires_admin: bool, from: &str) -> Option<String> {
    if should_redirect_unauth(state) {
        return Some(login_path(from));
    }
    match &state.user {
        Some(user) if requires_admin && user.role != Role::Admin => Some(DASHBOARD_PATH.to_owned()),
        _ => None,
    }
}

/// Apply [`guard_redirect`] whenever auth state changes.
pub fn install_route_guard<F>(auth: RwSignal<AuthState>, requires_admin: bool, from: String, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(target) = guard_redirect(&auth.get(), requires_admin, &from) {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
