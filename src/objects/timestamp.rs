//! Serde helpers for OnvoPay timestamps.
//!
//! The API exchanges timestamps as ISO-8601 strings in UTC with millisecond
//! precision and a literal `Z` suffix (`2022-06-12T21:21:10.587Z`), never as
//! numeric epoch values. Parsing accepts any RFC 3339 offset and converts to
//! UTC.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

static ISO_MILLIS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

pub mod iso_millis {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    use super::ISO_MILLIS;

    pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = value
            .to_offset(time::UtcOffset::UTC)
            .format(ISO_MILLIS)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        OffsetDateTime::parse(&value, &Rfc3339).map_err(de::Error::custom)
    }
}

pub mod iso_millis_option {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => super::iso_millis::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|value| OffsetDateTime::parse(&value, &Rfc3339).map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use time::OffsetDateTime;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "super::iso_millis")]
        at: OffsetDateTime,
    }

    #[test]
    fn round_trips_millisecond_timestamps() {
        let json = r#"{"at":"2022-06-12T21:21:10.587Z"}"#;
        let stamped: Stamped = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&stamped).unwrap(), json);
    }

    #[test]
    fn always_writes_three_subsecond_digits() {
        let stamped: Stamped =
            serde_json::from_str(r#"{"at":"2022-06-12T21:21:10Z"}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&stamped).unwrap(),
            r#"{"at":"2022-06-12T21:21:10.000Z"}"#
        );
    }

    #[test]
    fn converts_offsets_to_utc() {
        let stamped: Stamped =
            serde_json::from_str(r#"{"at":"2022-06-12T23:21:10.587+02:00"}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&stamped).unwrap(),
            r#"{"at":"2022-06-12T21:21:10.587Z"}"#
        );
    }

    #[test]
    fn rejects_numeric_epochs() {
        assert!(serde_json::from_str::<Stamped>(r#"{"at":1655068870}"#).is_err());
    }
}
