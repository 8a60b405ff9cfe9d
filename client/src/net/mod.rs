//! Networking for the browser build.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` plugs `fetch` (via `gloo-net`) into the core API client. All
//! endpoint knowledge lives in `campus::api`.

pub mod transport;
