//! Typed calls for every backend endpoint the client consumes.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::http::{ApiClient, ApiError, Transport};
use crate::types::{
    AuthPayload, Event, EventsEnvelope, LoginRequest, Notification, NotificationsEnvelope, ProfileUpdate,
    RegisterRequest, User, UserEnvelope,
};

pub const AUTH_ME: &str = "/api/auth/me";
pub const AUTH_LOGIN: &str = "/api/auth/login";
pub const AUTH_REGISTER: &str = "/api/auth/register";
pub const EVENTS: &str = "/api/events";
pub const REGISTERED_EVENTS: &str = "/api/users/registered-events";
pub const NOTIFICATIONS: &str = "/api/users/notifications";
pub const PROFILE: &str = "/api/users/profile";

fn notification_read_endpoint(id: &str) -> String {
    format!("{NOTIFICATIONS}/{id}/read")
}

impl<T: Transport> ApiClient<T> {
    /// `GET /api/auth/me`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a rejected token shows up as [`ApiError::Status`].
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.get_json(AUTH_ME).await?;
        Ok(envelope.user)
    }

    /// `POST /api/auth/login`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; bad credentials show up as [`ApiError::Status`].
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let body = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        self.post_json(AUTH_LOGIN, &body).await
    }

    /// `POST /api/auth/register`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        self.post_json(AUTH_REGISTER, request).await
    }

    /// `GET /api/events`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn events(&self) -> Result<Vec<Event>, ApiError> {
        let envelope: EventsEnvelope = self.get_json(EVENTS).await?;
        Ok(envelope.events)
    }

    /// `GET /api/users/registered-events`; a `null` body counts as no events.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn registered_events(&self) -> Result<Vec<Event>, ApiError> {
        let events: Option<Vec<Event>> = self.get_json(REGISTERED_EVENTS).await?;
        Ok(events.unwrap_or_default())
    }

    /// `GET /api/users/notifications` with server-reported read flags only.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let envelope: NotificationsEnvelope = self.get_json(NOTIFICATIONS).await?;
        Ok(envelope.notifications)
    }

    /// `PUT /api/users/notifications/{id}/read`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn mark_notification_read(&self, id: &str) -> Result<(), ApiError> {
        self.put_empty(&notification_read_endpoint(id)).await
    }

    /// `PUT /api/users/profile`, returning the canonical updated user.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.put_json(PROFILE, update).await?;
        Ok(envelope.user)
    }
}
