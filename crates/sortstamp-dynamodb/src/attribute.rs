use aws_sdk_dynamodb::types::AttributeValue;
use sortstamp_core::{ParseError, Precision, SortableTime};

/// An error decoding a value from an [`AttributeValue`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// The attribute was not of the type the value is stored as.
    #[error("expected attribute of type {expected}, got {actual}")]
    UnexpectedType {
        /// The DynamoDB type descriptor that was expected.
        expected: &'static str,
        /// The DynamoDB type descriptor of the attribute received.
        actual: &'static str,
    },
    /// The attribute held a string that could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A value that is stored in DynamoDB as a single attribute.
pub trait AttributeEncoding: Sized {
    /// Encodes `self` as an attribute.
    fn to_attribute_value(&self) -> AttributeValue;

    /// Decodes an attribute previously produced by
    /// [`to_attribute_value()`](Self::to_attribute_value) or written by
    /// another client.
    fn from_attribute_value(value: &AttributeValue) -> Result<Self, AttributeError>;
}

/// Timestamps are stored as `S` attributes holding their fixed-width string,
/// which allows them to be used as sort keys. Any RFC 3339 string is accepted
/// when decoding.
impl<P: Precision> AttributeEncoding for SortableTime<P> {
    fn to_attribute_value(&self) -> AttributeValue {
        AttributeValue::S(self.to_string())
    }

    fn from_attribute_value(value: &AttributeValue) -> Result<Self, AttributeError> {
        match value {
            AttributeValue::S(value) => Ok(Self::parse(value)?),
            other => Err(AttributeError::UnexpectedType {
                expected: "S",
                actual: attribute_type_name(other),
            }),
        }
    }
}

/// Returns the DynamoDB type descriptor of `value`, such as `S` or `BOOL`.
#[must_use]
pub fn attribute_type_name(value: &AttributeValue) -> &'static str {
    match value {
        AttributeValue::S(_) => "S",
        AttributeValue::N(_) => "N",
        AttributeValue::B(_) => "B",
        AttributeValue::Bool(_) => "BOOL",
        AttributeValue::Null(_) => "NULL",
        AttributeValue::L(_) => "L",
        AttributeValue::M(_) => "M",
        AttributeValue::Ss(_) => "SS",
        AttributeValue::Ns(_) => "NS",
        AttributeValue::Bs(_) => "BS",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::primitives::Blob;
    use sortstamp_core::{Date, MillisTime, NanoTime, SecondsTime};

    use super::*;

    #[test]
    fn encodes_strict_strings() {
        let time: NanoTime = "2019-12-09T06:50:02.53Z".parse().unwrap();
        assert_eq!(
            time.to_attribute_value(),
            AttributeValue::S(String::from("2019-12-09T06:50:02.530000000Z"))
        );
        assert_eq!(
            MillisTime::from(time.instant()).to_attribute_value(),
            AttributeValue::S(String::from("2019-12-09T06:50:02.530Z"))
        );
        assert_eq!(
            SecondsTime::from(time.instant()).to_attribute_value(),
            AttributeValue::S(String::from("2019-12-09T06:50:02Z"))
        );
        assert_eq!(
            Date::from(time.instant()).to_attribute_value(),
            AttributeValue::S(String::from("2019-12-09"))
        );
    }

    #[test]
    fn decodes_any_precision() {
        let value = AttributeValue::S(String::from("2019-12-09T06:50:02.533237329Z"));
        let millis = MillisTime::from_attribute_value(&value).unwrap();
        assert_eq!(millis.to_string(), "2019-12-09T06:50:02.533Z");

        let value = AttributeValue::S(String::from("2019-12-09T06:50:02Z"));
        let nanos = NanoTime::from_attribute_value(&value).unwrap();
        assert_eq!(nanos.to_string(), "2019-12-09T06:50:02.000000000Z");

        let value = AttributeValue::S(String::from("2019-12-09"));
        let date = Date::from_attribute_value(&value).unwrap();
        assert_eq!(date.to_string(), "2019-12-09");
    }

    #[test]
    fn rejects_other_types() {
        let cases = [
            (AttributeValue::N(String::from("1575874202")), "N"),
            (AttributeValue::B(Blob::new(b"2019".to_vec())), "B"),
            (AttributeValue::Bool(true), "BOOL"),
            (AttributeValue::Null(true), "NULL"),
            (AttributeValue::L(Vec::new()), "L"),
            (AttributeValue::M(Default::default()), "M"),
            (AttributeValue::Ss(vec![String::from("2019-12-09")]), "SS"),
            (AttributeValue::Ns(Vec::new()), "NS"),
            (AttributeValue::Bs(Vec::new()), "BS"),
        ];
        for (value, actual) in cases {
            assert_eq!(attribute_type_name(&value), actual);
            assert_eq!(
                MillisTime::from_attribute_value(&value),
                Err(AttributeError::UnexpectedType {
                    expected: "S",
                    actual
                })
            );
        }
    }

    #[test]
    fn reports_unparseable_strings() {
        let value = AttributeValue::S(String::from("2019-12-09 06:50:02"));
        match NanoTime::from_attribute_value(&value) {
            Err(AttributeError::Parse(err)) => {
                assert_eq!(err.value, "2019-12-09 06:50:02");
                assert!(err.to_string().contains("2019-12-09 06:50:02"));
            }
            other => unreachable!("expected parse error, got {other:?}"),
        }
    }
}
