use std::{
    fmt::{self, Debug, Display},
    marker::PhantomData,
    str::FromStr,
};

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use derive_where::derive_where;
use serde::{de::Visitor, Deserialize, Serialize};

#[cfg(feature = "json")]
use crate::Error;
use crate::{format::TimestampFormat, range, ParseError};

/// The precision a [`SortableTime`] is formatted with.
///
/// The precisions provided:
///
/// - [`precision::Days`]
/// - [`precision::Seconds`]
/// - [`precision::Milliseconds`]
/// - [`precision::Nanoseconds`]
///
/// Other precisions can be used by implementing this trait with any
/// fixed-width [`TimestampFormat`].
pub trait Precision: Debug + Send + Sync + 'static {
    /// The name of the timestamp type, used in error messages.
    const NAME: &'static str;

    /// The format used when serializing. To preserve sort order, this must
    /// produce the same number of bytes for every value.
    const FORMAT: TimestampFormat;

    /// The formats accepted when deserializing, tried in order. The first
    /// successful parse wins.
    const PARSERS: &'static [TimestampFormat];
}

/// [`Precision`] implementations.
pub mod precision {
    use super::Precision;
    use crate::format::{
        TimestampFormat, FLEXIBLE_NANOS, STRICT_DATE, STRICT_MILLIS, STRICT_NANOS, STRICT_SECONDS,
    };

    /// Formats as `YYYY-MM-DD`. Parses any RFC 3339 timestamp, falling back to
    /// a plain date.
    #[derive(Debug)]
    pub enum Days {}

    impl Precision for Days {
        const NAME: &'static str = "Date";
        const FORMAT: TimestampFormat = STRICT_DATE;
        const PARSERS: &'static [TimestampFormat] = &[FLEXIBLE_NANOS, STRICT_DATE];
    }

    /// Formats as `YYYY-MM-DDThh:mm:ssZ`.
    #[derive(Debug)]
    pub enum Seconds {}

    impl Precision for Seconds {
        const NAME: &'static str = "SecondsTime";
        const FORMAT: TimestampFormat = STRICT_SECONDS;
        const PARSERS: &'static [TimestampFormat] = &[FLEXIBLE_NANOS];
    }

    /// Formats as `YYYY-MM-DDThh:mm:ss.fffZ`.
    #[derive(Debug)]
    pub enum Milliseconds {}

    impl Precision for Milliseconds {
        const NAME: &'static str = "MillisTime";
        const FORMAT: TimestampFormat = STRICT_MILLIS;
        const PARSERS: &'static [TimestampFormat] = &[FLEXIBLE_NANOS];
    }

    /// Formats as `YYYY-MM-DDThh:mm:ss.fffffffffZ`.
    #[derive(Debug)]
    pub enum Nanoseconds {}

    impl Precision for Nanoseconds {
        const NAME: &'static str = "NanoTime";
        const FORMAT: TimestampFormat = STRICT_NANOS;
        const PARSERS: &'static [TimestampFormat] = &[FLEXIBLE_NANOS];
    }
}

/// A moment in time whose string form sorts in chronological order.
///
/// The wrapped instant keeps its full nanosecond precision and original
/// offset. `Precision` only controls how it is written: serializing converts
/// to UTC and truncates to a fixed number of zero-padded digits, so that two
/// values of the same type compare the same way as strings as they do as
/// instants (at that precision).
///
/// Deserializing is lenient: any RFC 3339 timestamp with zero to nine
/// fractional digits is accepted, regardless of `Precision`.
///
/// Equality, ordering and hashing compare the full precision instant, not its
/// formatted string.
#[derive_where(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortableTime<P: Precision> {
    instant: DateTime<FixedOffset>,
    _precision: PhantomData<P>,
}

/// A date formatted as `YYYY-MM-DD`.
pub type Date = SortableTime<precision::Days>;

/// A timestamp formatted as `YYYY-MM-DDThh:mm:ssZ`.
pub type SecondsTime = SortableTime<precision::Seconds>;

/// A timestamp formatted as `YYYY-MM-DDThh:mm:ss.fffZ`.
pub type MillisTime = SortableTime<precision::Milliseconds>;

/// A timestamp formatted as `YYYY-MM-DDThh:mm:ss.fffffffffZ`.
pub type NanoTime = SortableTime<precision::Nanoseconds>;

impl<P: Precision> SortableTime<P> {
    /// Returns the current time.
    #[must_use]
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// Parses `value` using each of `P::PARSERS` in turn.
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        let mut last_error = None;
        for format in P::PARSERS {
            match format.parse(value) {
                Ok(instant) => return Ok(Self::from(instant)),
                Err(err) => last_error = Some(err),
            }
        }

        Err(last_error.unwrap_or_else(|| ParseError::new(value, P::NAME)))
    }

    /// Returns the wrapped instant, with full precision and its original
    /// offset.
    #[must_use]
    pub const fn instant(&self) -> DateTime<FixedOffset> {
        self.instant
    }

    /// Returns the wrapped instant in UTC, with full precision.
    #[must_use]
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.instant.with_timezone(&Utc)
    }

    /// Returns the wrapped instant in UTC, truncated to `P`'s precision. This
    /// is the value that survives a serialization round trip.
    #[must_use]
    pub fn truncated(&self) -> DateTime<Utc> {
        P::FORMAT.truncate(&self.instant)
    }

    /// Returns true if `self` is at or after `start` and before `end`.
    #[must_use]
    pub fn between_start_inclusive(&self, start: &Self, end: &Self) -> bool {
        range::between_start_inclusive(self, start, end)
    }

    /// Returns true if `self` is after `start` and at or before `end`.
    #[must_use]
    pub fn between_end_inclusive(&self, start: &Self, end: &Self) -> bool {
        range::between_end_inclusive(self, start, end)
    }

    /// Returns true if `self` is after `start` and before `end`.
    #[must_use]
    pub fn between_exclusive(&self, start: &Self, end: &Self) -> bool {
        range::between_exclusive(self, start, end)
    }

    /// Returns true if `self` is at or after `start` and at or before `end`.
    #[must_use]
    pub fn between_inclusive(&self, start: &Self, end: &Self) -> bool {
        range::between_inclusive(self, start, end)
    }
}

#[cfg(feature = "json")]
impl<P: Precision> SortableTime<P> {
    /// Returns this timestamp as a quoted JSON string literal.
    ///
    /// ```rust
    /// use sortstamp_core::time::SecondsTime;
    ///
    /// let time: SecondsTime = "2020-01-01T14:00:00.123Z".parse().unwrap();
    /// assert_eq!(time.to_json(), r#""2020-01-01T14:00:00Z""#);
    /// ```
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::Value::String(self.to_string()).to_string()
    }

    /// Parses a quoted JSON string literal.
    ///
    /// `json` must begin and end with the quotes; surrounding whitespace is
    /// rejected. Escape sequences inside the literal, including `\uXXXX`, are
    /// decoded before parsing.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        if !(json.len() >= 2 && json.starts_with('"') && json.ends_with('"')) {
            return Err(Error::Unquote(format!("expected a quoted string, got {json}")));
        }
        let value = serde_json::from_str::<String>(json)
            .map_err(|err| Error::Unquote(err.to_string()))?;
        Self::parse(&value).map_err(Error::from)
    }
}

impl<P: Precision, Tz: TimeZone> From<DateTime<Tz>> for SortableTime<P> {
    fn from(instant: DateTime<Tz>) -> Self {
        let offset = instant.offset().fix();
        Self {
            instant: instant.with_timezone(&offset),
            _precision: PhantomData,
        }
    }
}

impl<P: Precision> From<SortableTime<P>> for DateTime<FixedOffset> {
    fn from(time: SortableTime<P>) -> Self {
        time.instant
    }
}

impl<P: Precision> From<SortableTime<P>> for DateTime<Utc> {
    fn from(time: SortableTime<P>) -> Self {
        time.to_utc()
    }
}

impl<P: Precision> Default for SortableTime<P> {
    fn default() -> Self {
        Self::from(DateTime::<Utc>::default())
    }
}

impl<P: Precision> FromStr for SortableTime<P> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<P: Precision> Display for SortableTime<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&P::FORMAT.display(&self.instant), f)
    }
}

impl<P: Precision> Debug for SortableTime<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({self})", P::NAME)
    }
}

impl<P: Precision> Serialize for SortableTime<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de, P: Precision> Deserialize<'de> for SortableTime<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(SortableTimeVisitor(PhantomData))
    }
}

struct SortableTimeVisitor<P>(PhantomData<P>);

impl<'de, P: Precision> Visitor<'de> for SortableTimeVisitor<P> {
    type Value = SortableTime<P>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an RFC 3339 timestamp string")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        SortableTime::parse(value).map_err(E::custom)
    }
}
