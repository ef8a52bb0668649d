use serde::{Deserialize, Serialize};

use crate::time::{Precision, SortableTime};

/// Returns true if `value` is at or after `start` and before `end`.
///
/// Values are compared directly, so for [`SortableTime`] the comparison uses
/// the full precision of the wrapped instant rather than its formatted string.
#[must_use]
pub fn between_start_inclusive<T: PartialOrd>(value: &T, start: &T, end: &T) -> bool {
    Range::default().start_at(start).before(end).contains(&value)
}

/// Returns true if `value` is after `start` and at or before `end`.
#[must_use]
pub fn between_end_inclusive<T: PartialOrd>(value: &T, start: &T, end: &T) -> bool {
    Range::default().after(start).end_at(end).contains(&value)
}

/// Returns true if `value` is after `start` and before `end`.
#[must_use]
pub fn between_exclusive<T: PartialOrd>(value: &T, start: &T, end: &T) -> bool {
    Range::default().after(start).before(end).contains(&value)
}

/// Returns true if `value` is at or after `start` and at or before `end`.
#[must_use]
pub fn between_inclusive<T: PartialOrd>(value: &T, start: &T, end: &T) -> bool {
    Range::default().start_at(start).end_at(end).contains(&value)
}

/// A range type that can represent all `std` range types and be serialized.
///
/// This type implements conversion operations from all range types defined in
/// `std`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct Range<T> {
    /// The start of the range.
    pub start: Bound<T>,
    /// The end of the range.
    pub end: Bound<T>,
}

/// A range bound that can be serialized.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
#[must_use]
pub enum Bound<T> {
    /// No bound.
    Unbounded,
    /// Bounded by the contained value (inclusive).
    Included(T),
    /// Bounded by the contained value (exclusive).
    Excluded(T),
}

impl<T> Default for Bound<T> {
    fn default() -> Self {
        Self::Unbounded
    }
}

impl<T> Default for Range<T> {
    fn default() -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Unbounded,
        }
    }
}

impl<T> Range<T> {
    /// Sets the start bound of this range to [`Bound::Excluded`] with
    /// `excluded_start`. The range will represent values that are
    /// [`Ordering::Greater`](std::cmp::Ordering::Greater) than, but not
    /// including, `excluded_start`.
    #[allow(clippy::missing_const_for_fn)]
    pub fn after(mut self, excluded_start: T) -> Self {
        self.start = Bound::Excluded(excluded_start);
        self
    }

    /// Sets the start bound of this range to [`Bound::Included`] with
    /// `included_start`. The range will represent values that are
    /// [`Ordering::Greater`](std::cmp::Ordering::Greater) than or
    /// [`Ordering::Equal`](std::cmp::Ordering::Equal) to `included_start`.
    #[allow(clippy::missing_const_for_fn)]
    pub fn start_at(mut self, included_start: T) -> Self {
        self.start = Bound::Included(included_start);
        self
    }

    /// Sets the end bound of this range to [`Bound::Excluded`] with
    /// `excluded_end`. The range will represent values that are
    /// [`Ordering::Less`](std::cmp::Ordering::Less) than, but not including,
    /// `excluded_end`.
    #[allow(clippy::missing_const_for_fn)]
    pub fn before(mut self, excluded_end: T) -> Self {
        self.end = Bound::Excluded(excluded_end);
        self
    }

    /// Sets the end bound of this range to [`Bound::Included`] with
    /// `included_end`. The range will represent values that are
    /// [`Ordering::Less`](std::cmp::Ordering::Less) than or
    /// [`Ordering::Equal`](std::cmp::Ordering::Equal) to `included_end`.
    #[allow(clippy::missing_const_for_fn)]
    pub fn end_at(mut self, included_end: T) -> Self {
        self.end = Bound::Included(included_end);
        self
    }

    /// Maps each contained value with the function provided.
    pub fn map<U, F: Fn(T) -> U>(self, map: F) -> Range<U> {
        Range {
            start: self.start.map(&map),
            end: self.end.map(&map),
        }
    }
}

impl<T: PartialOrd> Range<T> {
    /// Returns true if `value` falls within both bounds of this range.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        let after_start = match &self.start {
            Bound::Unbounded => true,
            Bound::Included(start) => value >= start,
            Bound::Excluded(start) => value > start,
        };
        let before_end = match &self.end {
            Bound::Unbounded => true,
            Bound::Included(end) => value <= end,
            Bound::Excluded(end) => value < end,
        };
        after_start && before_end
    }
}

impl<P: Precision> Range<SortableTime<P>> {
    /// Returns this range with each bound replaced by its formatted string,
    /// suitable for a key condition against string sort keys.
    ///
    /// The strings are truncated to `P`'s precision, so the resulting range
    /// can admit values that [`Range::contains()`] would reject when the
    /// bounds carry more precision than `P`.
    pub fn as_sort_keys(&self) -> Range<String> {
        (*self).map(|value| value.to_string())
    }
}

impl<T> Bound<T> {
    /// Maps the contained value, if any, and returns the resulting `Bound`.
    pub fn map<U, F: Fn(T) -> U>(self, map: F) -> Bound<U> {
        match self {
            Self::Unbounded => Bound::Unbounded,
            Self::Included(value) => Bound::Included(map(value)),
            Self::Excluded(value) => Bound::Excluded(map(value)),
        }
    }
}

impl<T> From<std::ops::Range<T>> for Range<T> {
    fn from(range: std::ops::Range<T>) -> Self {
        Self {
            start: Bound::Included(range.start),
            end: Bound::Excluded(range.end),
        }
    }
}

impl<T> From<std::ops::RangeFrom<T>> for Range<T> {
    fn from(range: std::ops::RangeFrom<T>) -> Self {
        Self {
            start: Bound::Included(range.start),
            end: Bound::Unbounded,
        }
    }
}

impl<T> From<std::ops::RangeTo<T>> for Range<T> {
    fn from(range: std::ops::RangeTo<T>) -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Excluded(range.end),
        }
    }
}

impl<T: Clone> From<std::ops::RangeInclusive<T>> for Range<T> {
    fn from(range: std::ops::RangeInclusive<T>) -> Self {
        Self {
            start: Bound::Included(range.start().clone()),
            end: Bound::Included(range.end().clone()),
        }
    }
}

impl<T> From<std::ops::RangeToInclusive<T>> for Range<T> {
    fn from(range: std::ops::RangeToInclusive<T>) -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Included(range.end),
        }
    }
}

impl<T> From<std::ops::RangeFull> for Range<T> {
    fn from(_: std::ops::RangeFull) -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;
    use crate::time::MillisTime;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 14, 0, 0).unwrap() + Duration::milliseconds(millis)
    }

    #[test]
    fn range_constructors() {
        assert_eq!(
            Range::default().after(1_u32),
            Range {
                start: Bound::Excluded(1),
                end: Bound::Unbounded
            }
        );
        assert_eq!(
            Range::default().start_at(1_u32),
            Range {
                start: Bound::Included(1),
                end: Bound::Unbounded
            }
        );
        assert_eq!(
            Range::default().before(1_u32),
            Range {
                start: Bound::Unbounded,
                end: Bound::Excluded(1),
            }
        );
        assert_eq!(
            Range::default().end_at(1_u32),
            Range {
                start: Bound::Unbounded,
                end: Bound::Included(1),
            }
        );
    }

    #[test]
    fn std_conversions() {
        assert_eq!(Range::from(1..3), Range::default().start_at(1).before(3));
        assert_eq!(Range::from(1..=3), Range::default().start_at(1).end_at(3));
        assert_eq!(Range::from(1..), Range::default().start_at(1));
        assert_eq!(Range::from(..3), Range::default().before(3));
        assert_eq!(Range::from(..=3), Range::default().end_at(3));
        assert_eq!(Range::<u8>::from(..), Range::default());
        assert_eq!(
            Range::from(1..3).map(|value| value * 2),
            Range::default().start_at(2).before(6)
        );
    }

    #[test]
    fn boundary_semantics() {
        let (lo, mid, hi) = (at(0), at(1), at(2));

        assert!(between_start_inclusive(&lo, &lo, &hi));
        assert!(between_start_inclusive(&mid, &lo, &hi));
        assert!(!between_start_inclusive(&hi, &lo, &hi));

        assert!(!between_end_inclusive(&lo, &lo, &hi));
        assert!(between_end_inclusive(&mid, &lo, &hi));
        assert!(between_end_inclusive(&hi, &lo, &hi));

        assert!(!between_exclusive(&lo, &lo, &hi));
        assert!(between_exclusive(&mid, &lo, &hi));
        assert!(!between_exclusive(&hi, &lo, &hi));

        assert!(between_inclusive(&lo, &lo, &hi));
        assert!(between_inclusive(&mid, &lo, &hi));
        assert!(between_inclusive(&hi, &lo, &hi));

        let outside = at(3);
        assert!(!between_inclusive(&outside, &lo, &hi));
        assert!(!between_end_inclusive(&outside, &lo, &hi));
    }

    #[test]
    fn contains_uses_full_precision() {
        let lo = MillisTime::from(at(0));
        let hi = MillisTime::from(at(0) + Duration::nanoseconds(10));
        let value = MillisTime::from(at(0) + Duration::nanoseconds(9));

        // All three format identically at millisecond precision.
        assert_eq!(lo.to_string(), hi.to_string());
        assert!(value.between_start_inclusive(&lo, &hi));
        assert!(value.between_exclusive(&lo, &hi));
        assert!(!hi.between_start_inclusive(&lo, &hi));
        assert!(hi.between_end_inclusive(&lo, &hi));
        assert!(lo.between_inclusive(&lo, &hi));
    }

    #[test]
    fn sort_key_ranges() {
        let range = Range::default()
            .after(MillisTime::from(at(1)))
            .end_at(MillisTime::from(at(2)));
        assert_eq!(
            range.as_sort_keys(),
            Range::default()
                .after(String::from("2020-01-01T14:00:00.001Z"))
                .end_at(String::from("2020-01-01T14:00:00.002Z"))
        );

        let unbounded = Range::<MillisTime>::default().before(MillisTime::from(at(5)));
        assert_eq!(unbounded.as_sort_keys().start, Bound::Unbounded);
    }
}
