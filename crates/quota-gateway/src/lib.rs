//! Quota gateway - HTTP service metering LLM access per address.
//!
//! The gateway sits in front of an OpenAI-compatible completions API to:
//! - Track per-address usage within a rolling 24-hour window
//! - Forward queries upstream only while the caller's reported balance
//!   covers the next deduction
//! - Serve the raw usage records for inspection

pub mod api;
pub mod config;
pub mod error;
pub mod quota;

pub use config::Config;
pub use error::GatewayError;
