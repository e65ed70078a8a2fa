//! Quota accounting decision logic.

use usage_store::UsageRecord;

/// Length of a usage window in seconds (24 hours).
pub const WINDOW_SECS: i64 = 24 * 60 * 60;

/// Outcome of the quota check for one request.
///
/// `reported_usage` is the value the caller sees in the response. For
/// reset and deduct it is the record's usage as read BEFORE the update
/// is applied. Callers depend on the pre-update value; changing it
/// would be a breaking API change.
#[derive(Debug, Clone, PartialEq)]
pub enum QuotaDecision {
    /// First request from an unseen address: create a record and forward.
    FirstSeen,
    /// The 24-hour window has elapsed: reset the record and forward.
    WindowReset { reported_usage: i64 },
    /// Enough headroom within the window: bump usage and forward.
    Deduct {
        reported_usage: i64,
        new_usage: i64,
    },
    /// Quota exhausted: no upstream call, no store write.
    LimitReached { usage: i64 },
}

/// Apply the quota rule to one request.
///
/// Branch order matters: the window check runs before the headroom
/// check, so an expired window always resets regardless of `holding`.
pub fn decide(
    record: Option<&UsageRecord>,
    holding: i64,
    now: i64,
    increment: i64,
) -> QuotaDecision {
    match record {
        None => QuotaDecision::FirstSeen,
        Some(record) if now - record.timestamp >= WINDOW_SECS => QuotaDecision::WindowReset {
            reported_usage: record.usage,
        },
        Some(record) if holding - record.usage >= increment => QuotaDecision::Deduct {
            reported_usage: record.usage,
            new_usage: record.usage + increment,
        },
        Some(record) => QuotaDecision::LimitReached {
            usage: record.usage,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;
    const INCREMENT: i64 = 10;

    fn record(holding: i64, usage: i64, timestamp: i64) -> UsageRecord {
        UsageRecord::new("0xA", holding, usage, timestamp)
    }

    #[test]
    fn test_unseen_address() {
        assert_eq!(decide(None, 100, NOW, INCREMENT), QuotaDecision::FirstSeen);
    }

    #[test]
    fn test_deduct_within_window() {
        let record = record(100, 10, NOW - 60);

        assert_eq!(
            decide(Some(&record), 100, NOW, INCREMENT),
            QuotaDecision::Deduct {
                reported_usage: 10,
                new_usage: 20,
            }
        );
    }

    #[test]
    fn test_limit_reached() {
        // 15 - 10 = 5 < 10
        let record = record(100, 10, NOW - 60);

        assert_eq!(
            decide(Some(&record), 15, NOW, INCREMENT),
            QuotaDecision::LimitReached { usage: 10 }
        );
    }

    #[test]
    fn test_exact_headroom_is_allowed() {
        // 20 - 10 = 10 >= 10
        let record = record(100, 10, NOW - 60);

        assert_eq!(
            decide(Some(&record), 20, NOW, INCREMENT),
            QuotaDecision::Deduct {
                reported_usage: 10,
                new_usage: 20,
            }
        );
    }

    #[test]
    fn test_window_reset_reports_prior_usage() {
        let record = record(100, 70, NOW - WINDOW_SECS);

        assert_eq!(
            decide(Some(&record), 100, NOW, INCREMENT),
            QuotaDecision::WindowReset { reported_usage: 70 }
        );
    }

    #[test]
    fn test_window_reset_ignores_holding() {
        // Expired window resets even when the balance could not cover a call
        let record = record(100, 70, NOW - WINDOW_SECS - 1);

        assert_eq!(
            decide(Some(&record), 0, NOW, INCREMENT),
            QuotaDecision::WindowReset { reported_usage: 70 }
        );
    }

    #[test]
    fn test_window_not_yet_expired() {
        let record = record(100, 70, NOW - WINDOW_SECS + 1);

        assert_eq!(
            decide(Some(&record), 100, NOW, INCREMENT),
            QuotaDecision::Deduct {
                reported_usage: 70,
                new_usage: 80,
            }
        );
    }
}
