use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::DisplayRecord;
use crate::record::record_of;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Name,
    CreatedAt,
    Email,
    Location,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Name,
        SortKey::CreatedAt,
        SortKey::Email,
        SortKey::Location,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "createdAt",
            Self::Email => "email",
            Self::Location => "location",
        }
    }

    /// Looks up the comparison function for this key.
    pub fn comparator(self) -> Comparator {
        match self {
            Self::Name => Comparator::Text(name_of),
            Self::CreatedAt => Comparator::Timestamp(DisplayRecord::timestamp_ms),
            Self::Email => Comparator::Text(email_of),
            Self::Location => Comparator::Text(location_of),
        }
    }
}

fn name_of(r: &DisplayRecord) -> &str {
    &r.name
}

fn email_of(r: &DisplayRecord) -> &str {
    &r.email
}

fn location_of(r: &DisplayRecord) -> &str {
    &r.location
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Applies the direction to an ascending comparison result.
    ///
    /// `Desc` is the exact reverse of `Asc`, never a separate comparator.
    pub fn apply(self, ascending: Ordering) -> Ordering {
        match self {
            Self::Asc => ascending,
            Self::Desc => ascending.reverse(),
        }
    }

    /// Header arrow shown next to the active column.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// The value type a sort key compares on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortValueKind {
    Text,
    Timestamp,
}

/// A field extractor tagged with how its values compare.
#[derive(Clone, Copy, Debug)]
pub enum Comparator {
    /// Case-sensitive, byte-wise string comparison.
    Text(fn(&DisplayRecord) -> &str),
    /// Epoch-millisecond comparison. `None` (unparseable) sorts after every valid timestamp.
    Timestamp(fn(&DisplayRecord) -> Option<i64>),
}

impl Comparator {
    pub fn kind(&self) -> SortValueKind {
        match self {
            Self::Text(_) => SortValueKind::Text,
            Self::Timestamp(_) => SortValueKind::Timestamp,
        }
    }

    /// Ascending comparison of two records.
    pub fn compare(&self, a: &DisplayRecord, b: &DisplayRecord) -> Ordering {
        match self {
            Self::Text(field) => field(a).cmp(field(b)),
            Self::Timestamp(field) => compare_timestamps(field(a), field(b)),
        }
    }
}

/// Orders parsed timestamps, placing unparseable values last (and equal to each other).
///
/// Keeping this a total order matters: `slice::sort_by` may panic on inconsistent comparators.
pub fn compare_timestamps(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// What a header click does when it targets a different column than the current sort key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderClickPolicy {
    /// Switching columns starts ascending; clicking the same column toggles.
    #[default]
    ResetToAscending,
    /// Every click toggles the order, even when switching columns.
    ToggleAlways,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Returns the state after the user clicks the header for `key`.
    pub fn on_header_click(self, key: SortKey, policy: HeaderClickPolicy) -> Self {
        let order = if key == self.key {
            self.order.toggled()
        } else {
            match policy {
                HeaderClickPolicy::ResetToAscending => SortOrder::Asc,
                HeaderClickPolicy::ToggleAlways => self.order.toggled(),
            }
        };
        Self { key, order }
    }
}

/// Returns a sorted copy of `records`; the input is left untouched.
///
/// The sort is stable, though callers should not rely on the relative order of equal keys.
pub fn sort_by<R>(records: &[R], key: SortKey, order: SortOrder) -> Vec<R>
where
    R: AsRef<DisplayRecord> + Clone,
{
    match key.comparator() {
        Comparator::Text(field) => {
            let mut sorted = records.to_vec();
            sorted.sort_by(|a, b| order.apply(field(record_of(a)).cmp(field(record_of(b)))));
            sorted
        }
        Comparator::Timestamp(field) => {
            // Parse each date once rather than on every comparison.
            let mut keyed: Vec<(Option<i64>, &R)> =
                records.iter().map(|r| (field(record_of(r)), r)).collect();
            keyed.sort_by(|a, b| order.apply(compare_timestamps(a.0, b.0)));
            keyed.into_iter().map(|(_, r)| r.clone()).collect()
        }
    }
}
