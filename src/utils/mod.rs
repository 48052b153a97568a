//! Utility modules for the gateway
//!
//! - **error**: gateway error type and its HTTP rendering
//! - **logging**: tracing subscriber setup

pub mod error; // Error handling
pub mod logging; // Logging setup

use uuid::Uuid;

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
