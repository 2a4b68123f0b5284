use std::borrow::Cow;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::{DisplayRecord, SortKey, SortState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellAlign {
    Left,
    Center,
    Right,
}

/// The table's columns, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Name,
    Status,
    CreatedAt,
    Email,
    Location,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Name,
        Column::Status,
        Column::CreatedAt,
        Column::Email,
        Column::Location,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Status => "Status",
            Self::CreatedAt => "Created At",
            Self::Email => "Email",
            Self::Location => "Location",
        }
    }

    /// The sort key behind a clickable header. `Status` is not sortable.
    pub fn sort_key(self) -> Option<SortKey> {
        match self {
            Self::Name => Some(SortKey::Name),
            Self::Status => None,
            Self::CreatedAt => Some(SortKey::CreatedAt),
            Self::Email => Some(SortKey::Email),
            Self::Location => Some(SortKey::Location),
        }
    }

    /// Preferred column width in pixels.
    pub fn width(self) -> u32 {
        match self {
            Self::Name => 160,
            Self::Status => 120,
            Self::CreatedAt => 140,
            Self::Email | Self::Location => 220,
        }
    }

    pub fn align(self) -> CellAlign {
        match self {
            Self::Status => CellAlign::Center,
            Self::CreatedAt => CellAlign::Right,
            Self::Name | Self::Email | Self::Location => CellAlign::Left,
        }
    }

    /// Header label, with an arrow when this column drives the current sort.
    pub fn header_text(self, sort: SortState) -> Cow<'static, str> {
        match self.sort_key() {
            Some(key) if key == sort.key => {
                Cow::Owned(format!("{} {}", self.label(), sort.order.indicator()))
            }
            _ => Cow::Borrowed(self.label()),
        }
    }

    pub fn cell_text(self, record: &DisplayRecord) -> Cow<'_, str> {
        match self {
            Self::Name => Cow::Borrowed(&record.name),
            Self::Status => Cow::Borrowed(record.status.as_str()),
            Self::CreatedAt => Cow::Owned(display_date(record)),
            Self::Email => Cow::Borrowed(&record.email),
            Self::Location => Cow::Borrowed(&record.location),
        }
    }
}

/// `M/D/YYYY`, or `Invalid Date` when the source string does not parse.
fn display_date(record: &DisplayRecord) -> String {
    match record.created_date() {
        Some(d) => format!("{}/{}/{}", d.month(), d.day(), d.year()),
        None => String::from("Invalid Date"),
    }
}
