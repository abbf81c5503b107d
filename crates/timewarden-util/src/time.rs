//! Time utilities for timewarden
//!
//! Usage accounting runs against monotonic time so that wall-clock jumps
//! can never inflate or deflate a session's duration. Wall-clock time is
//! only consulted for the daily-reset day key.

use chrono::{DateTime, Local, NaiveDate};
use std::time::{Duration, Instant};

/// Get the current local time.
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// The day key used for daily usage resets.
pub fn today() -> NaiveDate {
    now().date_naive()
}

/// Format a day key the way it is persisted (ISO date, `YYYY-MM-DD`).
pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Parse a persisted day key. Returns None for anything malformed.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Represents a point in monotonic time for session duration accounting.
/// This is immune to wall-clock changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonotonicInstant(Instant);

impl MonotonicInstant {
    pub fn now() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }

    /// Duration since `earlier`, saturating to zero if `earlier` is ahead.
    pub fn duration_since(&self, earlier: MonotonicInstant) -> Duration {
        self.0.saturating_duration_since(earlier.0)
    }
}

impl std::ops::Add<Duration> for MonotonicInstant {
    type Output = MonotonicInstant;

    fn add(self, rhs: Duration) -> Self::Output {
        MonotonicInstant(self.0 + rhs)
    }
}

/// Helper to format durations in human-readable form
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_monotonic_instant() {
        let t1 = MonotonicInstant::now();
        std::thread::sleep(Duration::from_millis(10));
        let t2 = MonotonicInstant::now();

        assert!(t2 > t1);
        assert!(t2.duration_since(t1) >= Duration::from_millis(10));
    }

    #[test]
    fn test_duration_since_saturates() {
        let t1 = MonotonicInstant::now();
        let t2 = t1 + Duration::from_secs(5);

        assert_eq!(t1.duration_since(t2), Duration::ZERO);
        assert_eq!(t2.duration_since(t1), Duration::from_secs(5));
    }

    #[test]
    fn test_day_key_round_trip() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let s = format_day(day);
        assert_eq!(s, "2025-12-25");
        assert_eq!(parse_day(&s), Some(day));
    }

    #[test]
    fn test_parse_day_rejects_malformed() {
        assert_eq!(parse_day(""), None);
        assert_eq!(parse_day("25-12-2025"), None);
        assert_eq!(parse_day("not a date"), None);
        assert_eq!(parse_day("2025/12/25"), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m 1s");
    }

    #[test]
    fn test_now_returns_time() {
        let t = now();
        assert!(t.year() >= 2020);
        assert!(t.year() <= 2100);
    }
}
