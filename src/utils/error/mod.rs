//! Error handling for the gateway
//!
//! This module defines the gateway error type and its HTTP rendering.

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{GatewayError, Result};
