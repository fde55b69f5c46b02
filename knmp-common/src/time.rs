//! Timestamp utilities

use chrono::{DateTime, Duration, Utc};

const MAX_CUTOFF_SECS: u64 = 100 * 365 * 24 * 3600;

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Timestamp `secs` seconds before now, used as a staleness cutoff
pub fn cutoff_secs_ago(secs: u64) -> DateTime<Utc> {
    // Clamp to a century so the subtraction cannot overflow
    let secs = secs.min(MAX_CUTOFF_SECS) as i64;
    Utc::now() - Duration::seconds(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // After 2000-01-01 and before 2100-01-01
        assert!(timestamp.timestamp() > 946_684_800);
        assert!(timestamp.timestamp() < 4_102_444_800);
    }

    #[test]
    fn test_cutoff_is_in_the_past() {
        let cutoff = cutoff_secs_ago(3600);
        let delta = now() - cutoff;
        assert!(delta.num_seconds() >= 3599);
        assert!(delta.num_seconds() <= 3601);
    }

    #[test]
    fn test_cutoff_zero_is_now() {
        let delta = now() - cutoff_secs_ago(0);
        assert!(delta.num_seconds() <= 1);
    }
}
