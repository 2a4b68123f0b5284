use std::fmt;
use std::sync::Arc;

use crate::virtualizer::Virtualizer;

/// A callback fired after a virtualizer state update.
pub type OnChangeCallback = Arc<dyn Fn(&Virtualizer) + Send + Sync>;

/// Configuration for [`crate::Virtualizer`].
///
/// Cheap to clone: the callback is stored in an `Arc`.
pub struct VirtualizerOptions {
    pub count: usize,
    /// Estimated (and assumed uniform) row size along the scroll axis.
    pub estimate_size: u32,
    /// Rows rendered beyond each edge of the viewport.
    pub overscan: usize,
    /// Viewport size before the UI layer reports a measurement.
    pub initial_viewport_size: u32,
    pub initial_offset: u64,
    /// Optional callback fired when the virtualizer's state changes.
    pub on_change: Option<OnChangeCallback>,
}

impl Clone for VirtualizerOptions {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            estimate_size: self.estimate_size,
            overscan: self.overscan,
            initial_viewport_size: self.initial_viewport_size,
            initial_offset: self.initial_offset,
            on_change: self.on_change.clone(),
        }
    }
}

impl VirtualizerOptions {
    pub fn new(count: usize, estimate_size: u32) -> Self {
        Self {
            count,
            estimate_size,
            overscan: 1,
            initial_viewport_size: 0,
            initial_offset: 0,
            on_change: None,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_viewport_size(mut self, size: u32) -> Self {
        self.initial_viewport_size = size;
        self
    }

    pub fn with_initial_offset(mut self, offset: u64) -> Self {
        self.initial_offset = offset;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Virtualizer) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl fmt::Debug for VirtualizerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualizerOptions")
            .field("count", &self.count)
            .field("estimate_size", &self.estimate_size)
            .field("overscan", &self.overscan)
            .field("initial_viewport_size", &self.initial_viewport_size)
            .field("initial_offset", &self.initial_offset)
            .finish_non_exhaustive()
    }
}
