//! Platform-neutral core for the campus events client.
//!
//! This crate owns everything the browser app and the terminal client share:
//! the REST wire types, the HTTP client wrapper with its request interceptor,
//! the key/value storage abstraction, and the session lifecycle (startup auth
//! check, login, register, logout). It has no browser or runtime dependency;
//! each frontend plugs in its own [`Transport`] and [`KeyValueStore`].

pub mod api;
pub mod config;
pub mod http;
pub mod notifications;
pub mod session;
pub mod storage;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use config::{ClientConfig, ConfigError};
pub use http::{ApiClient, ApiError, ApiRequest, ApiResponse, BearerAuth, Interceptor, Method, Transport, TransportError};
pub use notifications::ReadOverlay;
pub use session::{AuthCell, AuthOutcome, AuthState, Session, SharedAuth};
pub use storage::{KeyValueStore, MemoryStore, TokenStore};
pub use types::{Event, Notification, ProfileUpdate, RegisterRequest, Role, User};
