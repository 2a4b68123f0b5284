use serde::{Deserialize, Serialize};

/// A lightweight, serializable snapshot of the scroll container's size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Size along the scroll axis (the container height for a vertical table).
    pub size: u32,
}

/// A lightweight, serializable snapshot of the current scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollState {
    pub offset: u64,
}

/// A combined snapshot of viewport + scroll state.
///
/// Controllers keep one of these per render instead of mutating scroll fields in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameState {
    pub viewport: ViewportState,
    pub scroll: ScrollState,
}
