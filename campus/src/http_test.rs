use super::*;
use crate::mock::MockTransport;
use crate::storage::{MemoryStore, TOKEN_KEY};
use serde_json::json;

fn client(transport: &MockTransport, store: &MemoryStore) -> ApiClient<MockTransport> {
    let config = ClientConfig::new("http://api.test").unwrap();
    ApiClient::new(config, transport.clone()).with_interceptor(BearerAuth::new(store.clone()))
}

// =============================================================
// Interceptor
// =============================================================

#[tokio::test]
async fn bearer_header_absent_without_token() {
    let transport = MockTransport::new();
    transport.reply(200, json!({ "events": [] }));
    let store = MemoryStore::new();

    let _: serde_json::Value = client(&transport, &store).get_json("/api/events").await.unwrap();

    let sent = transport.requests();
    assert_eq!(sent[0].header(AUTHORIZATION), None);
    assert_eq!(sent[0].url, "http://api.test/api/events");
}

#[tokio::test]
async fn bearer_header_reads_storage_at_send_time() {
    let transport = MockTransport::new();
    transport.reply(200, json!({})).reply(200, json!({})).reply(200, json!({}));
    let store = MemoryStore::new();
    let api = client(&transport, &store);

    store.set(TOKEN_KEY, "first");
    let _: serde_json::Value = api.get_json("/a").await.unwrap();
    store.set(TOKEN_KEY, "second");
    let _: serde_json::Value = api.get_json("/b").await.unwrap();
    store.remove(TOKEN_KEY);
    let _: serde_json::Value = api.get_json("/c").await.unwrap();

    let sent = transport.requests();
    assert_eq!(sent[0].header("authorization"), Some("Bearer first"));
    assert_eq!(sent[1].header("authorization"), Some("Bearer second"));
    assert_eq!(sent[2].header("authorization"), None);
}

#[test]
fn set_header_replaces_case_insensitively() {
    let mut request = ApiRequest::new(Method::Get, "/x".to_owned());
    request.set_header("authorization", "Bearer old".to_owned());
    request.set_header(AUTHORIZATION, "Bearer new".to_owned());
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.header("AUTHORIZATION"), Some("Bearer new"));
}

// =============================================================
// Bodies and statuses
// =============================================================

#[tokio::test]
async fn post_json_sends_encoded_body_with_content_type() {
    let transport = MockTransport::new();
    transport.reply(201, json!({ "ok": true }));
    let store = MemoryStore::new();

    let reply: serde_json::Value =
        client(&transport, &store).post_json("/api/auth/login", &json!({ "email": "a@b.com" })).await.unwrap();

    assert_eq!(reply, json!({ "ok": true }));
    let sent = transport.requests();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].header(CONTENT_TYPE), Some("application/json"));
    assert_eq!(sent[0].body.as_deref(), Some(r#"{"email":"a@b.com"}"#));
}

#[tokio::test]
async fn non_success_status_carries_backend_message() {
    let transport = MockTransport::new();
    transport.reply(401, json!({ "message": "Invalid credentials" }));
    let store = MemoryStore::new();

    let err = client(&transport, &store).get_json::<serde_json::Value>("/api/auth/me").await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.server_message(), Some("Invalid credentials"));
    assert_eq!(err.user_message("Login failed"), "Invalid credentials");
}

#[tokio::test]
async fn non_json_error_body_falls_back() {
    let transport = MockTransport::new();
    transport.reply_raw(502, "<html>Bad Gateway</html>");
    let store = MemoryStore::new();

    let err = client(&transport, &store).put_empty("/api/users/notifications/1/read").await.unwrap_err();

    assert_eq!(err, ApiError::Status { status: 502, message: None });
    assert_eq!(err.user_message("Login failed"), "Login failed");
}

#[tokio::test]
async fn transport_failure_maps_to_transport_error() {
    let transport = MockTransport::new();
    transport.fail("connection refused");
    let store = MemoryStore::new();

    let err = client(&transport, &store).put_empty("/x").await.unwrap_err();

    assert_eq!(err, ApiError::Transport(TransportError("connection refused".to_owned())));
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn undecodable_success_body_is_decode_error() {
    let transport = MockTransport::new();
    transport.reply_raw(200, "not json");
    let store = MemoryStore::new();

    let err = client(&transport, &store).get_json::<serde_json::Value>("/x").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn put_empty_sends_no_body() {
    let transport = MockTransport::new();
    transport.reply_raw(200, "");
    let store = MemoryStore::new();

    client(&transport, &store).put_empty("/api/users/notifications/9/read").await.unwrap();

    let sent = transport.requests();
    assert_eq!(sent[0].method, Method::Put);
    assert_eq!(sent[0].body, None);
    assert_eq!(sent[0].header(CONTENT_TYPE), None);
}
