//! `fetch`-backed [`Transport`] for the browser.
//!
//! Browser build (`csr`): real HTTP calls via `gloo-net`.
//! Native builds: every send fails, since there is no `fetch` to call.
//!
//! ERROR HANDLING
//! ==============
//! Only failures to obtain a response become [`TransportError`]; a non-2xx
//! status is returned as a normal response for the API client to interpret.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use campus::{ApiRequest, ApiResponse, Transport, TransportError};

#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::{Method as HttpMethod, RequestBuilder};

            let method = match request.method {
                campus::Method::Get => HttpMethod::GET,
                campus::Method::Post => HttpMethod::POST,
                campus::Method::Put => HttpMethod::PUT,
            };
            let mut builder = RequestBuilder::new(&request.url).method(method);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let outgoing = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError(e.to_string()))?;

            let response = outgoing.send().await.map_err(|e| TransportError(e.to_string()))?;
            let status = response.status();
            let body = response.text().await.map_err(|e| TransportError(e.to_string()))?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(TransportError(format!("fetch unavailable outside the browser: {}", request.url)))
        }
    }
}
