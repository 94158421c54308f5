use crate::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

/// The one calendar-date shape the backend understands. Date-only, no
/// time-of-day, no timezone.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire encoding for date-typed fields, applied field-by-field through
/// `#[serde_as(as = "Option<Ymd>")]`. Non-date fields pass through untouched.
pub struct Ymd;

impl SerializeAs<NaiveDate> for Ymd {
    fn serialize_as<S>(source: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        source.format(DATE_FORMAT).to_string().serialize(serializer)
    }
}

impl<'de> DeserializeAs<'de, NaiveDate> for Ymd {
    fn deserialize_as<D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

pub fn encode(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(DATE_FORMAT).to_string())
}

/// A malformed non-null wire string is a `DateParse` error, never coerced.
pub fn decode(wire: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match wire {
        None => Ok(None),
        Some(s) => Ok(Some(NaiveDate::parse_from_str(s, DATE_FORMAT)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_with::serde_as;

    #[test]
    fn encodes_a_date_to_the_fixed_format() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 25).unwrap();
        assert_eq!(encode(Some(d)), Some("2025-01-25".to_string()));
    }

    #[test]
    fn absent_dates_stay_absent_in_both_directions() {
        assert_eq!(encode(None), None);
        assert_eq!(decode(None).unwrap(), None);
    }

    #[test]
    fn decodes_the_fixed_format() {
        let d = decode(Some("2025-01-25")).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 1, 25));
    }

    #[test]
    fn round_trips_every_representable_date() {
        for d in [
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2000, 2, 29).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        ] {
            assert_eq!(decode(encode(Some(d)).as_deref()).unwrap(), Some(d));
        }
    }

    #[test]
    fn rejects_a_malformed_wire_string() {
        let err = decode(Some("25/01/2025")).unwrap_err();
        assert!(matches!(err, AppError::DateParse(_)));
        assert!(decode(Some("not-a-date")).is_err());
    }

    #[serde_as]
    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Stamped {
        #[serde(default)]
        #[serde_as(as = "Option<Ymd>")]
        due: Option<NaiveDate>,
    }

    #[test]
    fn ymd_drives_the_serde_boundary() {
        let due = NaiveDate::from_ymd_opt(2025, 1, 25);
        let json = serde_json::to_string(&Stamped { due }).unwrap();
        assert_eq!(json, r#"{"due":"2025-01-25"}"#);
        let back: Stamped = serde_json::from_str(&json).unwrap();
        assert_eq!(back.due, due);
    }

    #[test]
    fn ymd_serializes_absent_as_null() {
        let json = serde_json::to_string(&Stamped { due: None }).unwrap();
        assert_eq!(json, r#"{"due":null}"#);
        let back: Stamped = serde_json::from_str(r#"{"due":null}"#).unwrap();
        assert_eq!(back.due, None);
    }
}
