//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. The session writes through [`AuthSignal`],
//! so any view reading the `RwSignal<AuthState>` context re-renders when the
//! user logs in, logs out, or edits their profile.

use campus::{AuthCell, AuthState, Session};
use leptos::prelude::*;

use crate::net::transport::FetchTransport;
use crate::util::storage::BrowserStorage;

/// The session type every page pulls from context.
pub type AppSession = Session<FetchTransport, BrowserStorage, AuthSignal>;

/// [`AuthCell`] backed by a reactive signal.
#[derive(Clone, Copy, Debug)]
pub struct AuthSignal(RwSignal<AuthState>);

impl AuthSignal {
    pub fn new(signal: RwSignal<AuthState>) -> Self {
        Self(signal)
    }
}

impl AuthCell for AuthSignal {
    fn get(&self) -> AuthState {
        self.0.get_untracked()
    }

    fn set(&self, state: AuthState) {
        self.0.set(state);
    }

    fn update(&self, f: impl FnOnce(&mut AuthState)) {
        self.0.update(f);
    }
}
