//! One request, one response.
//!
//! [`Transport`] is the seam between the client and the wire: it takes a
//! fully built [`ApiRequest`] and hands back the status and body text,
//! nothing more. Turning that into a typed value or a [`RemoteError`] is
//! [`decode_response`]'s job, so every transport (the real
//! [`HttpTransport`] or a test double) shares the same error semantics.
//!
//! There are no retries. A timeout or connection failure surfaces once as
//! [`RemoteError::Transport`].

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use snai_api::ErrorResponse;

use crate::error::RemoteError;

/// Per-call timeout. Fixed; there is no per-call override.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client identifier sent as `User-Agent` on every call.
pub const CLIENT_ID: &str = concat!("SNAI-SDK-Rust/", env!("CARGO_PKG_VERSION"));

/// HTTP methods used by the network API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A request ready to go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL: normalized base URL followed by the endpoint path.
    pub url: String,
    /// Serialized JSON body, if any.
    pub body: Option<String>,
}

/// Status and body text of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single request/response cycle.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status, and `Err` only when no response arrived.
pub trait Transport: Send + Sync {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, RemoteError>;
}

/// [`Transport`] backed by a blocking `reqwest` client.
///
/// Every request carries `Content-Type: application/json` and
/// `User-Agent: `[`CLIENT_ID`], and is bounded by [`REQUEST_TIMEOUT`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(CLIENT_ID)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, RemoteError> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        let mut builder = builder.header(CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

/// Turn a raw response into `R` or a [`RemoteError`].
///
/// - 2xx: the body is decoded as `R`; failure is [`RemoteError::Decode`].
/// - otherwise: the body is tried as an [`ErrorResponse`] envelope
///   ([`RemoteError::Api`]); anything else, including an empty or non-JSON
///   body, becomes [`RemoteError::Status`] with the trimmed body text.
pub fn decode_response<R: DeserializeOwned>(response: RawResponse) -> Result<R, RemoteError> {
    if response.is_success() {
        return serde_json::from_str(&response.body)
            .map_err(|e| RemoteError::Decode(format!("{e}: {}", response.body)));
    }

    match serde_json::from_str::<ErrorResponse>(&response.body) {
        Ok(envelope) => Err(RemoteError::Api {
            status: response.status,
            message: envelope.error,
            hint: envelope.hint,
        }),
        Err(_) => Err(RemoteError::Status {
            status: response.status,
            body: response.body.trim().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn success_body_decodes() {
        let v: Value = decode_response(RawResponse::new(200, r#"{"posts":[]}"#)).unwrap();
        assert_eq!(v["posts"], Value::Array(vec![]));
    }

    #[test]
    fn malformed_success_body_is_decode_error() {
        let err = decode_response::<Value>(RawResponse::new(200, "<html>")).unwrap_err();
        assert!(matches!(err, RemoteError::Decode(ref msg) if msg.contains("<html>")));
    }

    #[test]
    fn error_envelope_yields_server_message() {
        let err = decode_response::<Value>(RawResponse::new(404, r#"{"error":"not found"}"#))
            .unwrap_err();
        assert_eq!(
            err,
            RemoteError::Api {
                status: 404,
                message: "not found".into(),
                hint: None,
            }
        );
        assert_eq!(err.to_string(), "not found");
    }

    #[test]
    fn error_hint_is_kept() {
        let body = r#"{"success":false,"error":"Invalid name","hint":"Name must be 2-32 characters"}"#;
        let err = decode_response::<Value>(RawResponse::new(400, body)).unwrap_err();
        match err {
            RemoteError::Api { hint, .. } => {
                assert_eq!(hint.as_deref(), Some("Name must be 2-32 characters"))
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_error_body_falls_back_to_status() {
        let err = decode_response::<Value>(RawResponse::new(500, "boom\n")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("500"), "{msg}");
        assert!(msg.contains("boom"), "{msg}");
    }

    #[test]
    fn json_error_body_without_error_field_falls_back_to_status() {
        let err =
            decode_response::<Value>(RawResponse::new(503, r#"{"success":false}"#)).unwrap_err();
        assert_eq!(
            err,
            RemoteError::Status {
                status: 503,
                body: r#"{"success":false}"#.into(),
            }
        );
    }

    #[test]
    fn empty_error_body() {
        let err = decode_response::<Value>(RawResponse::new(502, "")).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[test]
    fn client_id_names_the_sdk() {
        assert!(CLIENT_ID.starts_with("SNAI-SDK-Rust/"));
    }
}
