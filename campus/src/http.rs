//! HTTP client wrapper with per-request interceptors.
//!
//! DESIGN
//! ======
//! [`ApiClient`] owns the backend origin and a [`Transport`]. Before every
//! send it runs its installed [`Interceptor`]s against the outgoing request.
//! [`BearerAuth`] is the only way an `Authorization` header is ever set: it
//! reads the token from storage at send time, so clearing the stored token
//! immediately stops it from being sent. There is no shared default-header
//! state to keep in sync.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-2xx statuses and undecodable bodies are all
//! surfaced as [`ApiError`]. The wrapper interprets no status codes; it only
//! extracts the backend's `message` field so callers can show it.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::storage::{KeyValueStore, TokenStore};

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// A fully resolved outgoing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON-encoded body, if any.
    pub body: Option<String>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, url: String) -> Self {
        Self { method, url, headers: Vec::new(), body: None }
    }

    /// Header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set a header, replacing any existing value with the same name.
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value));
    }
}

/// Raw response as seen by the wrapper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (network down, CORS, DNS, ...).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends a resolved request and returns the raw status and body.
///
/// Implementations must not retry, time out or cache; those are not part of
/// the client contract.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Hook run synchronously on every outgoing request just before it is sent.
pub trait Interceptor: Send + Sync {
    fn intercept(&self, request: &mut ApiRequest);
}

/// Attaches `Authorization: Bearer <token>` when a token is stored.
#[derive(Clone, Debug)]
pub struct BearerAuth<S> {
    tokens: TokenStore<S>,
}

impl<S: KeyValueStore> BearerAuth<S> {
    pub fn new(store: S) -> Self {
        Self { tokens: TokenStore::new(store) }
    }
}

impl<S: KeyValueStore> Interceptor for BearerAuth<S> {
    fn intercept(&self, request: &mut ApiRequest) {
        if let Some(token) = self.tokens.load() {
            request.set_header(AUTHORIZATION, format!("Bearer {token}"));
        }
    }
}

/// Errors produced by [`ApiClient`] calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),

    /// The backend answered with a non-2xx status.
    #[error("server responded with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid request body: {0}")]
    Encode(String),
}

impl ApiError {
    /// Human-readable message supplied by the backend, if it sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Backend message when present, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()?
        .message
        .filter(|message| !message.trim().is_empty())
}

/// Configured request issuer pointed at one backend origin.
#[derive(Clone)]
pub struct ApiClient<T> {
    config: ClientConfig,
    transport: T,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport, interceptors: Vec::new() }
    }

    /// Install an interceptor; interceptors run in installation order.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Send a request and return the raw response if it was a 2xx.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response arrived and
    /// [`ApiError::Status`] for any non-2xx status.
    pub async fn send(&self, method: Method, path: &str, body: Option<String>) -> Result<ApiResponse, ApiError> {
        let mut request = ApiRequest::new(method, self.config.url(path));
        request.set_header("Accept", JSON_CONTENT_TYPE.to_owned());
        if body.is_some() {
            request.set_header(CONTENT_TYPE, JSON_CONTENT_TYPE.to_owned());
        }
        request.body = body;
        for interceptor in &self.interceptors {
            interceptor.intercept(&mut request);
        }

        log::debug!("{}", self.config.describe(method, path));
        let response = self.transport.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status { status: response.status, message: error_message(&response.body) })
        }
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`]; also [`ApiError::Decode`] for an unexpected body.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.send(Method::Get, path, None).await?;
        decode(&response)
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`]; also [`ApiError::Decode`] for an unexpected body.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(Method::Post, path, Some(encode(body)?)).await?;
        decode(&response)
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`]; also [`ApiError::Decode`] for an unexpected body.
    pub async fn put_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(Method::Put, path, Some(encode(body)?)).await?;
        decode(&response)
    }

    /// `PUT` without a body, ignoring whatever the backend acknowledges with.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn put_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::Put, path, None).await.map(|_| ())
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<R: DeserializeOwned>(response: &ApiResponse) -> Result<R, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}
