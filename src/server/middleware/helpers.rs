//! Helper functions for middleware

use super::request_id::REQUEST_ID_HEADER;
use actix_web::http::header::HeaderMap;

/// Proxy headers consulted for the client address, in priority order
pub const CLIENT_IP_HEADERS: &[&str] = &[
    "x-forwarded-for",
    "x-real-ip",
    "x-client-ip",
    "cf-connecting-ip",
    "x-forwarded",
];

/// Identity used when no proxy header names the client
pub const FALLBACK_CLIENT_IP: &str = "127.0.0.1";

/// Extract the client address from proxy headers
///
/// Takes the first comma-separated item of the first header that has a
/// usable value. Headers are trusted as-is.
pub fn extract_client_ip(headers: &HeaderMap) -> String {
    for name in CLIENT_IP_HEADERS {
        let Some(value) = headers.get(*name).and_then(|v| v.to_str().ok()) else {
            continue;
        };
        let first = value.split(',').next().unwrap_or_default().trim();
        if !first.is_empty() && !first.eq_ignore_ascii_case("unknown") {
            return first.to_string();
        }
    }

    FALLBACK_CLIENT_IP.to_string()
}

/// Request ID stamped by [`super::RequestIdMiddleware`], if any
pub fn extract_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
