use std::{
    fmt::{self, Display},
    ops::RangeInclusive,
};

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat,
    SubsecRound, TimeZone, Utc,
};

use crate::ParseError;

const MAX_FRACTION_DIGITS: usize = 9;

/// The years whose four-digit encoding keeps every format fixed-width.
/// Parsing rejects instants whose UTC year falls outside this range.
pub const SORTABLE_YEARS: RangeInclusive<i32> = 0..=9999;

/// How a [`TimestampFormat`] treats fractional seconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Fraction {
    /// No fractional seconds. Parsing rejects a fraction.
    None,
    /// Exactly three fractional digits.
    Millis,
    /// Exactly six fractional digits.
    Micros,
    /// Exactly nine fractional digits.
    Nanos,
    /// Between 0 and 9 fractional digits. Formatting trims trailing zeros and
    /// omits the fraction when it is zero, which does **not** preserve sort
    /// order.
    Flexible,
}

impl Fraction {
    /// The number of fractional digits kept when formatting.
    #[must_use]
    pub const fn digits(self) -> u16 {
        match self {
            Self::None => 0,
            Self::Millis => 3,
            Self::Micros => 6,
            Self::Nanos | Self::Flexible => 9,
        }
    }

    const fn seconds_format(self) -> SecondsFormat {
        match self {
            Self::None => SecondsFormat::Secs,
            Self::Millis => SecondsFormat::Millis,
            Self::Micros => SecondsFormat::Micros,
            Self::Nanos | Self::Flexible => SecondsFormat::Nanos,
        }
    }

    fn accepts(self, digits: usize) -> bool {
        match self {
            Self::Flexible => digits <= MAX_FRACTION_DIGITS,
            fixed => digits == usize::from(fixed.digits()),
        }
    }
}

/// The overall shape of a [`TimestampFormat`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Layout {
    /// A calendar date: `YYYY-MM-DD`.
    Date,
    /// A date and time of day: `YYYY-MM-DDThh:mm:ss`, followed by the
    /// fractional seconds and the offset.
    DateTime(Fraction),
}

/// A named timestamp format.
///
/// All formats emit UTC. Instants in any other offset are converted before
/// being formatted, so that values written from different offsets still sort
/// together. Strict formats only produce the same number of bytes for
/// instants within [`SORTABLE_YEARS`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TimestampFormat {
    name: &'static str,
    template: &'static str,
    layout: Layout,
    offset_required: bool,
}

/// `YYYY-MM-DD`, with day precision.
pub const STRICT_DATE: TimestampFormat =
    TimestampFormat::new("strict date", "YYYY-MM-DD", Layout::Date, false);

/// `YYYY-MM-DDThh:mm:ssZ`, RFC 3339 with second precision.
pub const STRICT_SECONDS: TimestampFormat = TimestampFormat::new(
    "strict RFC3339 seconds",
    "YYYY-MM-DDThh:mm:ssZ",
    Layout::DateTime(Fraction::None),
    true,
);

/// `YYYY-MM-DDThh:mm:ss.fffZ`, RFC 3339 with exactly three fractional digits.
pub const STRICT_MILLIS: TimestampFormat = TimestampFormat::new(
    "strict RFC3339 milliseconds",
    "YYYY-MM-DDThh:mm:ss.fffZ",
    Layout::DateTime(Fraction::Millis),
    true,
);

/// `YYYY-MM-DDThh:mm:ss.fffffffffZ`, RFC 3339 with exactly nine fractional
/// digits.
pub const STRICT_NANOS: TimestampFormat = TimestampFormat::new(
    "strict RFC3339 nanoseconds",
    "YYYY-MM-DDThh:mm:ss.fffffffffZ",
    Layout::DateTime(Fraction::Nanos),
    true,
);

/// RFC 3339 with anywhere from zero to nine fractional digits.
///
/// This is the grammar every sortable type parses with. Formatting with it
/// strips trailing zeros, so the output is not safe to use as a sort key.
pub const FLEXIBLE_NANOS: TimestampFormat = TimestampFormat::new(
    "RFC3339 timestamp",
    "YYYY-MM-DDThh:mm:ss[.f{0,9}]Z",
    Layout::DateTime(Fraction::Flexible),
    true,
);

impl TimestampFormat {
    /// Returns a new format. An offset is only ever parsed for
    /// [`Layout::DateTime`]; when `offset_required` is false, a missing offset
    /// is read as UTC.
    #[must_use]
    pub const fn new(
        name: &'static str,
        template: &'static str,
        layout: Layout,
        offset_required: bool,
    ) -> Self {
        Self {
            name,
            template,
            layout,
            offset_required,
        }
    }

    /// The human readable name of this format.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// A template illustrating this format, such as `YYYY-MM-DDThh:mm:ssZ`.
    #[must_use]
    pub const fn template(&self) -> &'static str {
        self.template
    }

    /// The layout of this format.
    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Whether parsing requires an offset (`Z` or `±hh:mm`).
    #[must_use]
    pub const fn offset_required(&self) -> bool {
        self.offset_required
    }

    /// Returns an adapter that implements [`Display`] for `instant` in this
    /// format.
    pub fn display<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> Formatted {
        Formatted {
            format: *self,
            instant: instant.with_timezone(&Utc),
        }
    }

    /// Formats `instant` after converting it to UTC. Precision beyond what
    /// this format carries is truncated, never rounded, and missing precision
    /// is padded with zeros.
    pub fn format<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> String {
        self.display(instant).to_string()
    }

    /// Returns `instant` in UTC, truncated to the precision of this format.
    /// Date formats truncate to midnight of the UTC date.
    pub fn truncate<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> DateTime<Utc> {
        let utc = instant.with_timezone(&Utc);
        match self.layout {
            Layout::Date => utc.date_naive().and_time(NaiveTime::MIN).and_utc(),
            Layout::DateTime(fraction) => utc.trunc_subsecs(fraction.digits()),
        }
    }

    /// Parses `value`, requiring it to match this format exactly.
    ///
    /// Values whose UTC instant falls outside [`SORTABLE_YEARS`] are rejected,
    /// so everything this accepts formats back to the same width.
    pub fn parse(&self, value: &str) -> Result<DateTime<FixedOffset>, ParseError> {
        self.parse_checked(value)
            .filter(|parsed| SORTABLE_YEARS.contains(&parsed.naive_utc().year()))
            .ok_or_else(|| ParseError::new(value, self.name))
    }

    fn parse_checked(&self, value: &str) -> Option<DateTime<FixedOffset>> {
        match self.layout {
            Layout::Date => {
                if !matches_pattern(value.as_bytes(), b"dddd-dd-dd") {
                    return None;
                }
                let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
                Some(date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
            }
            Layout::DateTime(fraction) => {
                // chrono accepts short fields, any number of fractional digits
                // and a space or lowercase separator, so the shape is checked
                // first.
                if self.date_time_offset(value.as_bytes(), fraction)? {
                    DateTime::parse_from_rfc3339(value).ok()
                } else {
                    let naive =
                        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
                    Some(naive.and_utc().fixed_offset())
                }
            }
        }
    }

    /// Returns whether `value` carries an offset, or `None` if `value` is not
    /// shaped like this format.
    fn date_time_offset(&self, value: &[u8], fraction: Fraction) -> Option<bool> {
        if value.len() < 19 || !matches_pattern(&value[..19], b"dddd-dd-ddTdd:dd:dd") {
            return None;
        }

        let (digits, offset) = match value[19..].strip_prefix(b".") {
            Some(rest) => {
                let digits = rest.iter().take_while(|byte| byte.is_ascii_digit()).count();
                if digits == 0 {
                    return None;
                }
                (digits, &rest[digits..])
            }
            None => (0, &value[19..]),
        };
        if !fraction.accepts(digits) {
            return None;
        }

        match offset {
            [] if !self.offset_required => Some(false),
            b"Z" => Some(true),
            [b'+' | b'-', rest @ ..] if matches_pattern(rest, b"dd:dd") => Some(true),
            _ => None,
        }
    }
}

/// Returns true if `value` has a digit wherever `pattern` has `d` and the
/// same byte everywhere else.
fn matches_pattern(value: &[u8], pattern: &[u8]) -> bool {
    value.len() == pattern.len()
        && value
            .iter()
            .zip(pattern)
            .all(|(&byte, &expected)| match expected {
                b'd' => byte.is_ascii_digit(),
                expected => byte == expected,
            })
}

impl Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.template)
    }
}

/// A UTC instant paired with the [`TimestampFormat`] it displays in.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct Formatted {
    format: TimestampFormat,
    instant: DateTime<Utc>,
}

impl Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format.layout {
            Layout::Date => Display::fmt(&self.instant.format("%Y-%m-%d"), f),
            Layout::DateTime(Fraction::Flexible) => {
                let text = self.instant.to_rfc3339_opts(SecondsFormat::Nanos, true);
                let trimmed = text.trim_end_matches('Z').trim_end_matches('0');
                write!(f, "{}Z", trimmed.strip_suffix('.').unwrap_or(trimmed))
            }
            Layout::DateTime(fraction) => {
                f.write_str(&self.instant.to_rfc3339_opts(fraction.seconds_format(), true))
            }
        }
    }
}
