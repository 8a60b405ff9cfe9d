//! Session lifecycle: startup auth check, login, register, logout.
//!
//! DESIGN
//! ======
//! A [`Session`] is an explicit handle owned by the application root and
//! cloned into whatever needs it. It holds the API client (with
//! [`BearerAuth`] installed), the token store, and an [`AuthCell`] that keeps
//! the current user and loading flag. The browser app backs the cell with a
//! reactive signal; native code uses [`SharedAuth`].
//!
//! The token in storage and the user in the cell move together: login and
//! register write both, logout and a failed startup check clear both. The
//! `Authorization` header is never touched here; it follows the stored token
//! on every request.
//!
//! ERROR HANDLING
//! ==============
//! `check_auth` absorbs failures (logs and clears the token). `login` and
//! `register` convert every failure into [`AuthOutcome::Failure`] with a
//! message fit for display.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::config::ClientConfig;
use crate::http::{ApiClient, ApiError, BearerAuth, Transport};
use crate::storage::{KeyValueStore, TokenStore};
use crate::types::{AuthPayload, RegisterRequest, Role, User};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ADMIN_DASHBOARD_PATH: &str = "/admin/dashboard";

/// Authentication state visible to views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    /// `true` until the startup check has finished.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

/// Storage cell for [`AuthState`].
pub trait AuthCell {
    fn get(&self) -> AuthState;
    fn set(&self, state: AuthState);

    fn update(&self, f: impl FnOnce(&mut AuthState)) {
        let mut state = self.get();
        f(&mut state);
        self.set(state);
    }
}

/// Thread-safe [`AuthCell`] for native frontends and tests.
#[derive(Clone, Debug, Default)]
pub struct SharedAuth(Arc<Mutex<AuthState>>);

impl SharedAuth {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthCell for SharedAuth {
    fn get(&self) -> AuthState {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, state: AuthState) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    fn update(&self, f: impl FnOnce(&mut AuthState)) {
        f(&mut self.0.lock().unwrap_or_else(PoisonError::into_inner));
    }
}

/// Result of a login or register attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Success { user: User },
    Failure { message: String },
}

impl AuthOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Explicit session handle.
#[derive(Clone)]
pub struct Session<T, S, C> {
    api: ApiClient<T>,
    tokens: TokenStore<S>,
    state: C,
}

impl<T, S, C> Session<T, S, C>
where
    T: Transport,
    S: KeyValueStore + Clone + 'static,
    C: AuthCell,
{
    /// Build a session whose client attaches the token from `store`.
    pub fn new(config: ClientConfig, transport: T, store: S, state: C) -> Self {
        let api = ApiClient::new(config, transport).with_interceptor(BearerAuth::new(store.clone()));
        Self { api, tokens: TokenStore::new(store), state }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn user(&self) -> Option<User> {
        self.state.get().user
    }

    pub fn loading(&self) -> bool {
        self.state.get().loading
    }

    /// Validate a stored token against `/api/auth/me`.
    ///
    /// Without a token no request is made. Any failure removes the token.
    /// `loading` is `false` afterwards in every case.
    pub async fn check_auth(&self) {
        let user = match self.tokens.load() {
            None => None,
            Some(_) => match self.api.current_user().await {
                Ok(user) => Some(user),
                Err(e) => {
                    log::warn!("stored session rejected: {e}");
                    self.tokens.clear();
                    None
                }
            },
        };
        self.state.set(AuthState { user, loading: false });
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let result = self.api.login(email, password).await;
        self.finish_auth(result, LOGIN_FAILED)
    }

    /// Register and authenticate in one step.
    pub async fn register(&self, request: &RegisterRequest) -> AuthOutcome {
        let result = self.api.register(request).await;
        self.finish_auth(result, REGISTRATION_FAILED)
    }

    fn finish_auth(&self, result: Result<AuthPayload, ApiError>, fallback: &str) -> AuthOutcome {
        match result {
            Ok(AuthPayload { token, user }) => {
                self.tokens.save(&token);
                self.state.update(|state| state.user = Some(user.clone()));
                AuthOutcome::Success { user }
            }
            Err(e) => {
                log::debug!("authentication failed: {e}");
                AuthOutcome::Failure { message: e.user_message(fallback) }
            }
        }
    }

    pub fn logout(&self) {
        self.tokens.clear();
        self.state.update(|state| state.user = None);
    }

    /// Replace the in-memory user, e.g. with the result of a profile update.
    pub fn update_user(&self, user: User) {
        self.state.update(|state| state.user = Some(user));
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|user| user.role == Role::Admin)
    }

    pub fn is_student(&self) -> bool {
        self.user().is_some_and(|user| user.role == Role::Student)
    }
}

/// Where to send a user after login.
///
/// `from` is the page that bounced them to the login form; only same-origin
/// absolute paths are honoured.
#[must_use]
pub fn redirect_target(user: &User, from: Option<&str>) -> String {
    if let Some(from) = from.filter(|path| path.starts_with('/') && !path.starts_with("//")) {
        return from.to_owned();
    }
    match user.role {
        Role::Admin => ADMIN_DASHBOARD_PATH.to_owned(),
        _ => DASHBOARD_PATH.to_owned(),
    }
}
