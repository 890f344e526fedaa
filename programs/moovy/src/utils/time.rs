//! Fixed-length month arithmetic for vesting clocks.
//! - a month is exactly `SECONDS_PER_MONTH` (30 days), never a calendar month
//! - months_elapsed = largest k such that now >= start + k months (inclusive)
//! - a clock reading before `start` counts as zero elapsed time

use crate::constants::SECONDS_PER_MONTH;

/// Seconds elapsed since `start_ts`, clamped at zero.
pub fn elapsed_seconds(now_ts: i64, start_ts: i64) -> u64 {
    now_ts.saturating_sub(start_ts).max(0) as u64
}

/// Whole 30-day months elapsed since `start_ts`.
pub fn months_elapsed(now_ts: i64, start_ts: i64) -> u64 {
    elapsed_seconds(now_ts, start_ts) / SECONDS_PER_MONTH as u64
}

/// Timestamp at which `months` whole months have elapsed since `start_ts`.
pub fn month_boundary(start_ts: i64, months: u64) -> Option<i64> {
    let months = i64::try_from(months).ok()?;
    start_ts.checked_add(months.checked_mul(SECONDS_PER_MONTH)?)
}
