//! Field-level serde helpers for report records.
//!
//! The API is loose about scalar types: integers sometimes arrive as strings,
//! identifiers sometimes as numbers, and timestamps in several layouts. These
//! helpers accept each of those spellings and always produce one Rust type.

use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{
    Deserializer,
    de::{Error, Unexpected, Visitor},
};

/// Layout used when re-serializing timestamps. Fractional seconds are only
/// written when present.
const WIRE_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S%.f";

const ISO_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses the timestamp layouts the reporting API emits.
pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, WIRE_TIMESTAMP)
        .or_else(|_| NaiveDateTime::parse_from_str(value, ISO_TIMESTAMP))
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.naive_utc()))
        .ok()
}

#[derive(Clone, Copy)]
struct IntegerVisitor;

impl Visitor<'_> for IntegerVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a string holding one")
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        reason = "only whole values inside the i64 range reach the cast"
    )]
    fn visit_f64<E: Error>(self, v: f64) -> Result<i64, E> {
        if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
            Ok(v as i64)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<i64, E> {
        v.trim().parse().map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

#[derive(Clone, Copy)]
struct TextVisitor;

impl Visitor<'_> for TextVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or a number")
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_owned())
    }

    fn visit_string<E: Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }
}

#[derive(Clone, Copy)]
struct TimestampVisitor;

impl TimestampVisitor {
    fn from_unix<E: Error>(self, seconds: i64) -> Result<NaiveDateTime, E> {
        DateTime::from_timestamp(seconds, 0)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| E::invalid_value(Unexpected::Signed(seconds), &self))
    }
}

impl Visitor<'_> for TimestampVisitor {
    type Value = NaiveDateTime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a `YYYY-MM-DD HH:MM:SS` timestamp, an RFC 3339 timestamp or unix seconds")
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<NaiveDateTime, E> {
        self.from_unix(v)
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<NaiveDateTime, E> {
        let seconds =
            i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))?;
        self.from_unix(seconds)
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<NaiveDateTime, E> {
        parse_timestamp(v).ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
    }
}

/// Lifts a scalar visitor over `null`.
struct Nullable<V>(V);

impl<'de, V> Visitor<'de> for Nullable<V>
where
    V: Visitor<'de>,
{
    type Value = Option<V::Value>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.expecting(f)?;
        f.write_str(" or null")
    }

    fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self.0).map(Some)
    }
}

/// Integer from a number or numeric string.
pub(crate) fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    d.deserialize_any(IntegerVisitor)
}

/// Optional variant of [`integer`].
pub(crate) fn option_integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    d.deserialize_option(Nullable(IntegerVisitor))
}

/// String from a string or a number.
pub(crate) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    d.deserialize_any(TextVisitor)
}

/// Optional variant of [`text`].
pub(crate) fn option_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    d.deserialize_option(Nullable(TextVisitor))
}

pub(crate) mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserializer, Serializer};

    use super::{TimestampVisitor, WIRE_TIMESTAMP};

    pub(crate) fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&value.format(WIRE_TIMESTAMP))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        d.deserialize_any(TimestampVisitor)
    }
}

pub(crate) mod option_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserializer, Serializer};

    use super::{Nullable, TimestampVisitor, WIRE_TIMESTAMP};

    #[allow(clippy::ref_option, reason = "signature required by `#[serde(with)]`")]
    pub(crate) fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => s.collect_str(&value.format(WIRE_TIMESTAMP)),
            None => s.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        d.deserialize_option(Nullable(TimestampVisitor))
    }
}

/// `trial_period`: a whole number of minutes on the wire.
pub(crate) mod option_minutes {
    use chrono::TimeDelta;
    use serde::{
        Deserializer, Serializer,
        de::{Error, Unexpected},
    };

    use super::{IntegerVisitor, Nullable};

    #[allow(clippy::ref_option, reason = "signature required by `#[serde(with)]`")]
    pub(crate) fn serialize<S: Serializer>(value: &Option<TimeDelta>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(period) => s.serialize_some(&period.num_minutes()),
            None => s.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<TimeDelta>, D::Error> {
        let Some(minutes) = d.deserialize_option(Nullable(IntegerVisitor))? else {
            return Ok(None);
        };
        TimeDelta::try_minutes(minutes).map(Some).ok_or_else(|| {
            D::Error::invalid_value(Unexpected::Signed(minutes), &"a representable number of minutes")
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeDelta};
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "integer")]
        amount: i64,
        #[serde(default, deserialize_with = "option_integer")]
        fee: Option<i64>,
        #[serde(deserialize_with = "text")]
        bin: String,
        #[serde(default, deserialize_with = "option_text")]
        retry: Option<String>,
        #[serde(with = "timestamp")]
        at: NaiveDateTime,
        #[serde(default, with = "option_timestamp")]
        until: Option<NaiveDateTime>,
        #[serde(default, with = "option_minutes")]
        trial: Option<TimeDelta>,
    }

    fn probe(overrides: serde_json::Value) -> Result<Probe, serde_json::Error> {
        let mut base = json!({"amount": 100, "bin": "411111", "at": "2022-04-01 10:20:30"});
        if let (Some(base), Some(overrides)) = (base.as_object_mut(), overrides.as_object()) {
            base.extend(overrides.clone());
        }
        serde_json::from_value(base)
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 4, 1).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_absent_and_null_optionals_are_none() {
        let absent = probe(json!({})).unwrap();
        assert_eq!(absent.fee, None);
        assert_eq!(absent.retry, None);
        assert_eq!(absent.until, None);
        assert_eq!(absent.trial, None);

        let null = probe(json!({"fee": null, "retry": null, "until": null, "trial": null})).unwrap();
        assert_eq!(null.fee, None);
        assert_eq!(null.until, None);
        assert_eq!(null.trial, None);
    }

    #[test]
    fn test_integer_accepts_numeric_strings() {
        let parsed = probe(json!({"amount": "2500", "fee": " 15 "})).unwrap();
        assert_eq!(parsed.amount, 2500);
        assert_eq!(parsed.fee, Some(15));
    }

    #[test]
    fn test_integer_accepts_whole_floats_only() {
        assert_eq!(probe(json!({"amount": 12.0})).unwrap().amount, 12);
        assert!(probe(json!({"amount": 12.5})).is_err());
    }

    #[test]
    fn test_integer_rejects_words() {
        let err = probe(json!({"amount": "lots"})).unwrap_err();
        assert!(err.to_string().contains("an integer or a string holding one"));
    }

    #[test]
    fn test_text_accepts_numbers() {
        let parsed = probe(json!({"bin": 411_111, "retry": 2})).unwrap();
        assert_eq!(parsed.bin, "411111");
        assert_eq!(parsed.retry.as_deref(), Some("2"));
    }

    #[test]
    fn test_text_rejects_objects() {
        assert!(probe(json!({"bin": {"first6": "411111"}})).is_err());
    }

    #[test]
    fn test_timestamp_layouts() {
        assert_eq!(parse_timestamp("2022-04-01 10:20:30"), Some(at(10, 20, 30)));
        assert_eq!(parse_timestamp("2022-04-01T10:20:30"), Some(at(10, 20, 30)));
        assert_eq!(parse_timestamp("2022-04-01T12:20:30+02:00"), Some(at(10, 20, 30)));
        assert_eq!(parse_timestamp("2022-04-01T10:20:30Z"), Some(at(10, 20, 30)));
        assert_eq!(
            parse_timestamp("2022-04-01 10:20:30.250"),
            Some(at(10, 20, 30) + TimeDelta::milliseconds(250))
        );
        assert_eq!(parse_timestamp("01/04/2022"), None);
    }

    #[test]
    fn test_timestamp_from_unix_seconds() {
        let parsed = probe(json!({"at": 1_648_808_430})).unwrap();
        assert_eq!(parsed.at, at(10, 20, 30));
    }

    #[test]
    fn test_trial_period_is_minutes() {
        let parsed = probe(json!({"trial": 45})).unwrap();
        assert_eq!(parsed.trial, Some(TimeDelta::minutes(45)));

        let from_string = probe(json!({"trial": "4320"})).unwrap();
        assert_eq!(from_string.trial, Some(TimeDelta::days(3)));
    }

    #[test]
    fn test_trial_period_rejects_fractions() {
        assert!(probe(json!({"trial": 1.5})).is_err());
    }

    #[test]
    fn test_serialize_timestamp_and_minutes() {
        #[derive(serde::Serialize)]
        struct Out {
            #[serde(with = "timestamp")]
            at: NaiveDateTime,
            #[serde(with = "option_timestamp")]
            until: Option<NaiveDateTime>,
            #[serde(with = "option_minutes")]
            trial: Option<TimeDelta>,
        }

        let out = Out { at: at(10, 20, 30), until: None, trial: Some(TimeDelta::minutes(45)) };
        assert_eq!(
            serde_json::to_value(out).unwrap(),
            json!({"at": "2022-04-01 10:20:30", "until": null, "trial": 45})
        );
    }
}
