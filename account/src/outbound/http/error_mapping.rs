//! Shared reqwest failure mapping for the HTTP adapters.
//!
//! Both adapters speak the same error vocabulary (transport, timeout,
//! invalid request, upstream); the helpers here take the port-specific
//! constructors so each adapter maps into its own enum without repeating the
//! classification rules.

use reqwest::StatusCode;
use tracing::debug;

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Map a reqwest transport failure into a timeout or transport constructor.
pub(super) fn map_transport_error<E>(
    error: &reqwest::Error,
    timeout: impl FnOnce(String) -> E,
    transport: impl FnOnce(String) -> E,
) -> E {
    debug!(error = %error, "http request failed in transport");
    if error.is_timeout() {
        timeout(error.to_string())
    } else {
        transport(error.to_string())
    }
}

/// Map a non-success HTTP status into the matching port error constructor.
pub(super) fn map_status_error<E>(
    status: StatusCode,
    body: &[u8],
    timeout: impl FnOnce(String) -> E,
    invalid_request: impl FnOnce(String) -> E,
    upstream: impl FnOnce(String) -> E,
) -> E {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };
    debug!(status = status.as_u16(), "http request rejected");

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => timeout(message),
        _ if status.is_client_error() => invalid_request(message),
        _ => upstream(message),
    }
}

/// Collapse a response body into one bounded, whitespace-normalised line.
pub(super) fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
