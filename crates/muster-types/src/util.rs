//! Calendar-date helpers for roster records.
//!
//! Roster dates are stored as `MM/DD/YY`. A member whose rank never changed
//! carries `"N/A"` instead of a date.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

/// Storage format for roster dates.
pub const DATE_FORMAT: &str = "%m/%d/%y";

/// Placeholder stored when a date is absent.
pub const NO_DATE: &str = "N/A";

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date in roster storage form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format an optional date, using `N/A` when absent.
pub fn format_opt_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| NO_DATE.to_string())
}

/// Parse a roster date (`MM/DD/YY`).
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339, an ISO datetime without offset (taken as UTC), or a bare
/// `MM/DD/YY` date (midnight UTC). Older roster files use the last two forms.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
    }
    parse_date(s)
        .ok()
        .map(|date| DateTime::from_naive_utc_and_offset(date.and_time(NaiveTime::MIN), Utc))
}

/// Serde adapter for timestamps: writes RFC 3339, reads any form
/// [`parse_timestamp`] accepts.
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(super::SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
    }
}

/// Serde adapter for `NaiveDate` fields in `MM/DD/YY` form.
pub mod mdy {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Option<NaiveDate>` fields, with `N/A` as `None`.
pub mod mdy_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_opt_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) if s.eq_ignore_ascii_case(super::NO_DATE) => Ok(None),
            Some(s) => super::parse_date(s).map(Some).map_err(serde::de::Error::custom),
        }
    }
}
