//! Timestamp types whose textual encoding sorts byte-wise in chronological
//! order.
//!
//! Key-value stores such as DynamoDB only order sort keys by comparing their
//! bytes. RFC 3339 timestamps produced by most formatters trim trailing zeros
//! from the fractional seconds, which means `…:02.5Z` sorts *after*
//! `…:02.53Z` even though it happened first. The types in [`time`] always
//! format with a fixed number of zero-padded fractional digits so that string
//! order and time order agree, while still accepting any precision when
//! parsing.
//!
//! ```rust
//! use sortstamp_core::time::{MillisTime, NanoTime};
//!
//! let parsed: NanoTime = "2019-12-09T06:50:02.5Z".parse().unwrap();
//! assert_eq!(parsed.to_string(), "2019-12-09T06:50:02.500000000Z");
//!
//! let truncated = MillisTime::from(parsed.instant());
//! assert_eq!(truncated.to_string(), "2019-12-09T06:50:02.500Z");
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::cargo,
    missing_docs,
    // clippy::missing_docs_in_private_items,
    clippy::nursery,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::missing_errors_doc, // TODO clippy::missing_errors_doc
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
)]

mod error;
/// Fixed-width and flexible timestamp formats.
pub mod format;
/// Inclusive and exclusive range checks.
pub mod range;
/// Sortable timestamp types.
pub mod time;

#[cfg(any(test, feature = "test-util"))]
#[allow(missing_docs, clippy::missing_panics_doc)]
pub mod test_util;

pub use chrono;

pub use self::{
    error::{Error, ParseError},
    range::{
        between_end_inclusive, between_exclusive, between_inclusive, between_start_inclusive,
        Bound, Range,
    },
    time::{Date, MillisTime, NanoTime, Precision, SecondsTime, SortableTime},
};
