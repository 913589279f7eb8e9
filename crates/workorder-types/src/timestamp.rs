//! Stored timestamp representation.

use bson::Bson;
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A timestamp field of a stored TracOS work order.
///
/// Records written by this pipeline always hold a BSON datetime. Other
/// TracOS writers are known to store ISO-8601 strings instead; those are
/// kept verbatim so they can be echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    At(DateTime<Utc>),
    Text(String),
}

impl Timestamp {
    pub fn now() -> Self {
        Timestamp::At(Utc::now())
    }

    /// The parsed instant, if this timestamp holds one.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Timestamp::At(dt) => Some(dt),
            Timestamp::Text(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::At(dt)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Timestamp::At(dt) => bson::DateTime::from_chrono(*dt).serialize(serializer),
            Timestamp::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Bson::deserialize(deserializer)? {
            Bson::DateTime(dt) => Ok(Timestamp::At(dt.to_chrono())),
            Bson::String(s) => Ok(Timestamp::Text(s)),
            other => Err(D::Error::custom(format!(
                "expected a datetime or string, found {:?}",
                other.element_type()
            ))),
        }
    }
}
