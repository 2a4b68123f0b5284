use std::cell::Cell;

use crate::window::{self, Window, compute_window};
use crate::{FrameState, ScrollState, ViewportState};
use crate::{VirtualItem, VirtualItemKeyed, VirtualRange, VirtualizerOptions};

/// A headless windowing model over a list of uniformly sized rows.
///
/// It holds no UI objects: the adapter feeds it the viewport size, the scroll offset and the
/// current row count, and reads back the window of rows to materialize.
#[derive(Clone, Debug)]
pub struct Virtualizer {
    options: VirtualizerOptions,
    viewport_size: u32,
    scroll_offset: u64,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Virtualizer {
    pub fn new(options: VirtualizerOptions) -> Self {
        vdebug!(
            count = options.count,
            estimate_size = options.estimate_size,
            overscan = options.overscan,
            "Virtualizer::new"
        );
        Self {
            viewport_size: options.initial_viewport_size,
            scroll_offset: options.initial_offset,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// A data change typically updates the row count and re-clamps the scroll offset together;
    /// without batching each setter would fire `on_change` separately.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.notify();
    }

    pub fn row_size(&self) -> u32 {
        self.options.estimate_size
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: u32) {
        if self.viewport_size == size {
            return;
        }
        self.viewport_size = size;
        self.notify();
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        self.scroll_offset = offset;
        self.notify();
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    pub fn set_viewport_and_scroll_clamped(&mut self, viewport_size: u32, scroll_offset: u64) {
        self.batch_update(|v| {
            v.set_viewport_size(viewport_size);
            v.set_scroll_offset_clamped(scroll_offset);
        });
    }

    /// Replaces the row count (e.g. after filtering) and re-clamps the scroll offset.
    pub fn set_count_clamped(&mut self, count: usize) {
        self.batch_update(|v| {
            v.set_count(count);
            let offset = v.scroll_offset;
            v.set_scroll_offset_clamped(offset);
        });
    }

    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            size: self.viewport_size,
        }
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_offset,
        }
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores viewport + scroll state from a previously captured snapshot.
    pub fn restore_frame_state(&mut self, frame: FrameState) {
        self.set_viewport_and_scroll_clamped(frame.viewport.size, frame.scroll.offset);
    }

    pub fn total_size(&self) -> u64 {
        window::total_size(self.options.count, self.options.estimate_size)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        window::max_scroll_offset(
            self.options.count,
            self.options.estimate_size,
            self.viewport_size,
        )
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    pub fn window(&self) -> Window {
        self.window_for(self.scroll_offset, self.viewport_size)
    }

    pub fn window_for(&self, scroll_offset: u64, viewport_size: u32) -> Window {
        compute_window(
            self.options.count,
            viewport_size,
            self.options.estimate_size,
            scroll_offset,
            self.options.overscan,
        )
    }

    /// Rows intersecting the viewport (no overscan).
    pub fn visible_range(&self) -> VirtualRange {
        self.window().visible
    }

    /// Rows to materialize (visible range plus overscan).
    pub fn virtual_range(&self) -> VirtualRange {
        self.window().range
    }

    pub fn for_each_virtual_item(&self, f: impl FnMut(VirtualItem)) {
        self.window().for_each_item(f);
    }

    pub fn for_each_virtual_item_keyed<K>(
        &self,
        mut key_for: impl FnMut(usize) -> K,
        mut f: impl FnMut(VirtualItemKeyed<K>),
    ) {
        self.window().for_each_item(|item| {
            f(VirtualItemKeyed {
                key: key_for(item.index),
                index: item.index,
                start: item.start,
                size: item.size,
            })
        });
    }

    pub fn item_start(&self, index: usize) -> Option<u64> {
        (index < self.options.count)
            .then(|| index as u64 * self.options.estimate_size as u64)
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let count = self.options.count;
        let row = self.options.estimate_size as u64;
        if count == 0 || row == 0 {
            return None;
        }
        Some(((offset / row) as usize).min(count - 1))
    }
}
