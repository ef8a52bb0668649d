//! Fixtures shared by the test suites of the sortstamp crates.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::format::FLEXIBLE_NANOS;

/// Ten instants in chronological order, each encoded with the flexible
/// RFC 3339 format. Byte-wise, these strings do not sort chronologically.
pub const FLEXIBLE_SAMPLES: [&str; 10] = [
    "2019-12-09T06:50:02Z",
    "2019-12-09T06:50:02.5Z",
    "2019-12-09T06:50:02.53Z",
    "2019-12-09T06:50:02.533Z",
    "2019-12-09T06:50:02.5332Z",
    "2019-12-09T06:50:02.53323Z",
    "2019-12-09T06:50:02.533237Z",
    "2019-12-09T06:50:02.5332373Z",
    "2019-12-09T06:50:02.53323732Z",
    "2019-12-09T06:50:02.533237329Z",
];

/// The instants of [`FLEXIBLE_SAMPLES`], in the same order.
#[must_use]
pub fn sample_instants() -> Vec<DateTime<Utc>> {
    FLEXIBLE_SAMPLES
        .iter()
        .map(|sample| {
            FLEXIBLE_NANOS
                .parse(sample)
                .expect("invalid sample")
                .with_timezone(&Utc)
        })
        .collect()
}

/// Returns 2020-01-01T14:00:00Z offset by `nanos` nanoseconds.
#[must_use]
pub fn boundary_instant(nanos: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 14, 0, 0)
        .single()
        .expect("valid date")
        + Duration::nanoseconds(nanos)
}
