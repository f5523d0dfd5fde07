//! Pure countdown math against a fixed target instant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_DAY: u64 = 86_400;

/// One sample of time remaining until the target instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub expired: bool,
}

impl CountdownState {
    /// The clamped all-zero state reported once the target has passed
    pub fn expired() -> Self {
        Self {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            expired: true,
        }
    }

    /// Total whole seconds this sample represents
    pub fn total_seconds(&self) -> u64 {
        self.days * SECS_PER_DAY
            + u64::from(self.hours) * SECS_PER_HOUR
            + u64::from(self.minutes) * SECS_PER_MINUTE
            + u64::from(self.seconds)
    }
}

/// Compute the time remaining from `now` until `target`.
///
/// The delta is taken in milliseconds, floored to whole seconds, and decomposed
/// days-first with calendar-agnostic units (1 day = 86,400 s). Once `now` has
/// reached the target the result clamps to all zeros with `expired` set;
/// elapsed overtime is never reported.
pub fn remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> CountdownState {
    let delta_ms = (target - now).num_milliseconds();
    if delta_ms <= 0 {
        return CountdownState::expired();
    }

    let total_secs = (delta_ms / 1_000) as u64;
    CountdownState {
        days: total_secs / SECS_PER_DAY,
        hours: ((total_secs % SECS_PER_DAY) / SECS_PER_HOUR) as u8,
        minutes: ((total_secs % SECS_PER_HOUR) / SECS_PER_MINUTE) as u8,
        seconds: (total_secs % SECS_PER_MINUTE) as u8,
        expired: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_one_of_each_unit() {
        let now = base_now();
        let target = now + Duration::milliseconds(90_061_000);
        let state = remaining(target, now);
        assert_eq!(
            state,
            CountdownState {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1,
                expired: false,
            }
        );
    }

    #[test]
    fn test_past_target_clamps_to_zero() {
        let now = base_now();
        let target = now - Duration::milliseconds(1_000);
        assert_eq!(remaining(target, now), CountdownState::expired());
    }

    #[test]
    fn test_exact_target_is_expired() {
        let now = base_now();
        assert_eq!(remaining(now, now), CountdownState::expired());
    }

    #[test]
    fn test_sub_second_remainder_truncates() {
        let now = base_now();
        // 999 ms left floors to zero whole seconds but is not yet expired
        let state = remaining(now + Duration::milliseconds(999), now);
        assert!(!state.expired);
        assert_eq!(state.total_seconds(), 0);

        let state = remaining(now + Duration::milliseconds(1_500), now);
        assert_eq!(state.seconds, 1);
        assert_eq!(state.total_seconds(), 1);
    }

    #[test]
    fn test_reconstruction_matches_floored_delta() {
        let now = base_now();
        for delta_ms in [1, 999, 1_000, 59_999, 86_399_999, 86_400_000, 987_654_321] {
            let target = now + Duration::milliseconds(delta_ms);
            let state = remaining(target, now);
            assert!(!state.expired);
            assert_eq!(
                state.total_seconds() as i64,
                delta_ms / 1_000,
                "delta {delta_ms} ms",
            );
        }
    }

    #[test]
    fn test_field_ranges() {
        let now = base_now();
        for delta_ms in (0..500_000_000i64).step_by(7_777_777) {
            let state = remaining(now + Duration::milliseconds(delta_ms), now);
            if state.expired {
                continue;
            }
            assert!(state.hours <= 23);
            assert!(state.minutes <= 59);
            assert!(state.seconds <= 59);
        }
    }

    #[test]
    fn test_days_are_unbounded() {
        let now = base_now();
        let target = now + Duration::days(123) + Duration::seconds(5);
        let state = remaining(target, now);
        assert_eq!(state.days, 123);
        assert_eq!(state.seconds, 5);
    }
}
