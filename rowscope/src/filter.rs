//! Pure predicates that narrow a record collection.
//!
//! Both filters borrow their input unchanged when the predicate is empty, so callers can skip
//! reallocation (and tests can assert pointer identity) in the common "no filter" case.

use std::borrow::Cow;

use crate::DisplayRecord;
use crate::record::record_of;

/// Keeps records whose status string equals `status` exactly.
///
/// An empty `status` returns `records` as-is. A value that is not a known status
/// (e.g. `"archived"`) matches nothing.
pub fn filter_by_status<'a, R>(records: &'a [R], status: &str) -> Cow<'a, [R]>
where
    R: AsRef<DisplayRecord> + Clone,
{
    if status.is_empty() {
        return Cow::Borrowed(records);
    }
    let kept: Vec<R> = records
        .iter()
        .filter(|r| record_of(*r).status.as_str() == status)
        .cloned()
        .collect();
    Cow::Owned(kept)
}

/// Keeps records whose name contains `query`, ignoring case.
///
/// The query is used literally: no trimming, tokenizing or fuzzy matching. A whitespace-only
/// query only matches names that contain that whitespace.
pub fn filter_by_name<'a, R>(records: &'a [R], query: &str) -> Cow<'a, [R]>
where
    R: AsRef<DisplayRecord> + Clone,
{
    if query.is_empty() {
        return Cow::Borrowed(records);
    }
    let needle = query.to_lowercase();
    let kept: Vec<R> = records
        .iter()
        .filter(|r| name_matches(&record_of(*r).name, &needle))
        .cloned()
        .collect();
    Cow::Owned(kept)
}

fn name_matches(name: &str, lowered_query: &str) -> bool {
    let lowered: String = name.to_lowercase();
    lowered.contains(lowered_query)
}
