//! Headless building blocks for a filterable, sortable, virtualized user table.
//!
//! For the table controller, debounce timer and HTTP data source, see the `rowscope-adapter`
//! crate.
//!
//! The pipeline is:
//! raw records → [`transform`] → [`filter_by_name`] → [`sort_by`] → [`compute_window`].
//! Only the handful of rows in the resulting window are handed to the UI, so render cost stays
//! flat regardless of how many records are loaded.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport size (height)
//! - scroll offset
//! - a place to paint rows at absolute offsets
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod column;
mod error;
mod filter;
mod options;
mod record;
mod sort;
mod state;
mod types;
mod virtualizer;
pub mod window;

#[cfg(test)]
mod tests;

pub use column::{CellAlign, Column};
pub use error::{RecordError, UnknownStatus};
pub use filter::{filter_by_name, filter_by_status};
pub use options::{OnChangeCallback, VirtualizerOptions};
pub use record::{
    ACTIVE_AGE_THRESHOLD, DisplayRecord, RawLocation, RawName, RawRegistration, RawUserRecord,
    SkippedRecord, Status, Transformed, parse_timestamp_ms, transform, transform_values,
};
pub use sort::{
    Comparator, HeaderClickPolicy, SortKey, SortOrder, SortState, SortValueKind,
    compare_timestamps, sort_by,
};
pub use state::{FrameState, ScrollState, ViewportState};
pub use types::{VirtualItem, VirtualItemKeyed, VirtualRange};
pub use virtualizer::Virtualizer;
pub use window::{Window, compute_window};
