//! REST wire types for the campus events backend.
//!
//! DESIGN
//! ======
//! The backend is external and loosely typed: ids arrive as numbers or
//! strings, most user attributes are optional, and list envelopes may omit
//! their key. These types decode leniently so a missing attribute never turns
//! a valid session into a decode failure.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Account role reported by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
    /// Missing or unrecognised role; grants neither admin nor student views.
    #[default]
    #[serde(other)]
    Unknown,
}

/// The authenticated user as returned by `/api/auth/me`, login and register.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_role")]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text", skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl User {
    /// Name shown in headers, falling back to the email and then to `fallback`.
    #[must_use]
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or(fallback)
    }
}

/// A user notification. `read` is the server-reported flag; see
/// [`crate::notifications::ReadOverlay`] for the local override.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub message: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub read: bool,
    #[serde(default, deserialize_with = "deserialize_opt_text", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A campus event, either from the public list or the user's registrations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Event {
    #[must_use]
    pub fn title_or_untitled(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled event")
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Body of `PUT /api/users/profile`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub year: String,
    pub student_id: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl ProfileUpdate {
    /// Prefill the profile form from the current user; absent fields become empty.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            full_name: user.full_name.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            department: user.department.clone().unwrap_or_default(),
            year: user.year.clone().unwrap_or_default(),
            student_id: user.student_id.clone().unwrap_or_default(),
            phone_number: user.phone_number.clone().unwrap_or_default(),
            profile_image: user.profile_image.clone(),
        }
    }
}

/// `{ token, user }` returned by login and register.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// `{ user }` returned by `/api/auth/me` and profile updates.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

/// `{ events: [...] }` returned by `/api/events`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EventsEnvelope {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// `{ notifications: [...] }` returned by `/api/users/notifications`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NotificationsEnvelope {
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Accept an identifier encoded as either a JSON string or number; `null` is empty.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        other => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}

fn deserialize_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(text) => Ok(Some(text)),
        serde_json::Value::Number(number) => Ok(Some(number.to_string())),
        other => Err(D::Error::custom(format!("expected string or number, got {other}"))),
    }
}

/// Any role other than `"admin"` or `"student"`, including `null`, is unknown.
fn deserialize_role<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(role) if role == "admin" => Role::Admin,
        serde_json::Value::String(role) if role == "student" => Role::Student,
        _ => Role::Unknown,
    })
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_opt_text(deserializer)?.unwrap_or_default())
}

/// Only a JSON `true` counts as set.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(serde_json::Value::deserialize(deserializer)?, serde_json::Value::Bool(true)))
}
