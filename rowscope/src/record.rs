use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RecordError, UnknownStatus};

/// Registration age (in years) above which a user is considered active.
pub const ACTIVE_AGE_THRESHOLD: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawName {
    pub first: String,
    pub last: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRegistration {
    pub age: u32,
    pub date: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLocation {
    pub city: String,
    pub state: String,
    pub country: String,
}

/// A user as delivered by the remote API.
///
/// Only the fields the table needs are modeled; everything else in the payload (pictures,
/// phone numbers, street addresses, ...) is ignored during deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUserRecord {
    pub name: RawName,
    pub registered: RawRegistration,
    pub email: String,
    pub location: RawLocation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub fn from_age(age: u32) -> Self {
        if age > ACTIVE_AGE_THRESHOLD {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(UnknownStatus(other.into())),
        }
    }
}

/// The display-ready shape of a user, derived once from a [`RawUserRecord`].
///
/// Records are immutable after creation. `email` doubles as the row key: it is assumed unique
/// within a dataset (the upstream API guarantees it; this crate does not deduplicate).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    pub name: String,
    pub status: Status,
    /// Registration date, verbatim from the source. Parsed lazily.
    pub created_at: String,
    pub email: String,
    pub location: String,
}

impl DisplayRecord {
    pub fn from_raw(raw: &RawUserRecord) -> Self {
        Self {
            name: format!("{} {}", raw.name.first, raw.name.last),
            status: Status::from_age(raw.registered.age),
            created_at: raw.registered.date.clone(),
            email: raw.email.clone(),
            location: format!(
                "{}, {}, {}",
                raw.location.city,
                raw.location.state,
                raw.location.country
            ),
        }
    }

    /// The row identity used by renderers to keep DOM/widget nodes stable across re-sorts.
    pub fn key(&self) -> &str {
        &self.email
    }

    /// Milliseconds since the Unix epoch, or `None` if `created_at` cannot be parsed.
    pub fn timestamp_ms(&self) -> Option<i64> {
        parse_timestamp_ms(&self.created_at)
    }

    /// The calendar date (UTC) of `created_at`, or `None` if it cannot be parsed.
    pub fn created_date(&self) -> Option<NaiveDate> {
        parse_datetime(&self.created_at).map(|dt| dt.date_naive())
    }
}

impl AsRef<DisplayRecord> for DisplayRecord {
    fn as_ref(&self) -> &DisplayRecord {
        self
    }
}

/// Borrows the record behind any of the handle types the engines accept (`DisplayRecord`,
/// `&DisplayRecord`, `Arc<DisplayRecord>`, ...).
pub(crate) fn record_of<R: AsRef<DisplayRecord>>(r: &R) -> &DisplayRecord {
    r.as_ref()
}

/// Parses a registration date into epoch milliseconds.
///
/// Accepts RFC 3339 (`2012-05-21T17:54:29.612Z`), a date-time without offset (read as UTC) and
/// a bare `YYYY-MM-DD` date (UTC midnight).
pub fn parse_timestamp_ms(value: &str) -> Option<i64> {
    parse_datetime(value).map(|dt| dt.timestamp_millis())
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Maps raw records to display records, preserving order.
pub fn transform(raw: &[RawUserRecord]) -> Vec<DisplayRecord> {
    raw.iter().map(DisplayRecord::from_raw).collect()
}

/// A payload entry that could not be turned into a record.
#[derive(Debug)]
pub struct SkippedRecord {
    /// Position of the entry in the original `results` array.
    pub index: usize,
    pub error: RecordError,
}

/// Output of [`transform_values`].
#[derive(Debug, Default)]
pub struct Transformed {
    pub records: Vec<DisplayRecord>,
    pub skipped: Vec<SkippedRecord>,
}

/// Deserializes and transforms each payload entry independently.
///
/// Malformed entries are skipped (and logged) instead of failing the whole batch, so one bad
/// record never blanks the table. Surviving records keep their relative order.
pub fn transform_values(values: Vec<serde_json::Value>) -> Transformed {
    let mut out = Transformed {
        records: Vec::with_capacity(values.len()),
        skipped: Vec::new(),
    };

    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RawUserRecord>(value) {
            Ok(raw) => out.records.push(DisplayRecord::from_raw(&raw)),
            Err(err) => {
                vwarn!(index, error = %err, "skipping malformed user record");
                out.skipped.push(SkippedRecord {
                    index,
                    error: RecordError::from(err),
                });
            }
        }
    }

    vdebug!(
        records = out.records.len(),
        skipped = out.skipped.len(),
        "transform_values"
    );
    out
}
