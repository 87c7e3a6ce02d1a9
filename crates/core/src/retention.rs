//! Retention calculation
//!
//! A dump becomes eligible for deletion a fixed number of days after it was
//! created. The planned deletion date is computed once, either when the dump
//! is created or when an older record without a date is first read, and is
//! never recomputed after it has been stored.

use chrono::{DateTime, Duration, Utc};

/// Planned deletion date for a dump created at `created`
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use dumpstore_core::retention::planned_deletion;
///
/// let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let planned = planned_deletion(created, 30);
/// assert_eq!(planned, Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap());
/// ```
pub fn planned_deletion(created: DateTime<Utc>, retention_days: u32) -> DateTime<Utc> {
    created + Duration::days(i64::from(retention_days))
}
