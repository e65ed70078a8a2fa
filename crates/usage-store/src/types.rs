//! Usage record types.

use serde::{Deserialize, Serialize};

/// Per-address usage record.
///
/// One record per address, created on first sight and mutated on every
/// accepted request afterwards. Records are never deleted. Field names
/// are the wire names: `GET /posts/` serves these records verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Opaque caller-supplied key (e.g. a wallet address).
    pub address: String,
    /// Last-reported token balance, overwritten on every accepted request.
    pub holding: i64,
    /// Quota consumed within the current 24-hour window.
    pub usage: i64,
    /// Epoch seconds when the current window began.
    pub timestamp: i64,
}

impl UsageRecord {
    pub fn new(address: impl Into<String>, holding: i64, usage: i64, timestamp: i64) -> Self {
        Self {
            address: address.into(),
            holding,
            usage,
            timestamp,
        }
    }
}

/// Partial update applied to an existing record.
///
/// `holding` and `usage` are always overwritten; `timestamp` only when
/// the usage window is being reset.
#[derive(Debug, Clone)]
pub struct UsageUpdate {
    pub holding: i64,
    pub usage: i64,
    pub timestamp: Option<i64>,
}
