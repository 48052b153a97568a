//! HTTP middleware implementations
//!
//! - Request ID tracking
//! - Client identity extraction helpers

mod helpers;
mod request_id;


pub use helpers::{CLIENT_IP_HEADERS, FALLBACK_CLIENT_IP, extract_client_ip, extract_request_id};
pub use request_id::{REQUEST_ID_HEADER, RequestIdMiddleware, RequestIdMiddlewareService};
