/// Errors produced while turning one raw payload entry into a [`crate::DisplayRecord`].
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The entry is missing a nested field or has a field of the wrong type.
    #[error("malformed user record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Returned when a status string is neither `"active"` nor `"inactive"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {0:?}")]
pub struct UnknownStatus(pub String);
