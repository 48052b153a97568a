//! Rate Limiting Implementation
//!
//! Fixed (tumbling) window counters keyed by client identity. A burst that
//! straddles a window boundary can be admitted up to twice the limit; that is
//! the accepted cost of keeping one counter per client.

mod limiter;
mod types;
mod utils;


pub use limiter::RateLimiter;
pub use types::RateLimitResult;
