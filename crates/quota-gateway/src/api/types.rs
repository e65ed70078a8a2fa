//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to submit a metered query.
#[derive(Debug, Deserialize)]
pub struct PostRequest {
    /// Caller-supplied address identifying the quota subject
    pub address: String,

    /// Caller-reported token balance, trusted as-is
    #[serde(rename = "pineappleAmt")]
    pub pineapple_amt: i64,

    /// Query forwarded to the upstream provider
    pub query: String,
}

/// Response to a metered query.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub holding: i64,
    pub usage: i64,
    pub message: String,
}

impl PostResponse {
    pub fn success(holding: i64, usage: i64, message: String) -> Self {
        Self {
            kind: "success".to_string(),
            holding,
            usage,
            message,
        }
    }

    pub fn limit_reached(holding: i64, usage: i64) -> Self {
        Self {
            kind: "limit reached".to_string(),
            holding,
            usage,
            message: String::new(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub record_count: usize,
}
