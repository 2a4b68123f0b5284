use std::cmp;

use crate::{VirtualItem, VirtualRange};

/// The result of one window computation.
///
/// Row sizes are uniform (`row_size`), so every row's offset is `index * row_size` and the
/// scrollable extent is `count * row_size`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Window {
    pub count: usize,
    pub row_size: u32,
    pub total_size: u64,
    /// The clamped scroll offset the ranges were computed for.
    pub scroll_offset: u64,
    /// Rows intersecting the viewport (no overscan).
    pub visible: VirtualRange,
    /// Rows to materialize: `visible` widened by `overscan` on both sides.
    pub range: VirtualRange,
}

impl Window {
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn item(&self, index: usize) -> VirtualItem {
        VirtualItem {
            index,
            start: index as u64 * self.row_size as u64,
            size: self.row_size,
        }
    }

    pub fn for_each_item(&self, mut f: impl FnMut(VirtualItem)) {
        for i in self.range.start_index..self.range.end_index {
            f(self.item(i));
        }
    }

    pub fn items(&self) -> impl Iterator<Item = VirtualItem> + '_ {
        (self.range.start_index..self.range.end_index).map(|i| self.item(i))
    }
}

/// Largest meaningful scroll offset for a list of `count` uniform rows.
pub fn max_scroll_offset(count: usize, row_size: u32, viewport_size: u32) -> u64 {
    total_size(count, row_size).saturating_sub(viewport_size as u64)
}

/// Height of the whole list. Saturates at `u64::MAX`; rows starting past that are unreachable by
/// scrolling.
pub fn total_size(count: usize, row_size: u32) -> u64 {
    (count as u64).saturating_mul(row_size as u64)
}

/// Computes which rows must be materialized for a scroll position.
///
/// `scroll_offset` is clamped to `[0, total_size - viewport_size]` first, like a native scroll
/// container would. The visible range covers the row under the first visible pixel through the
/// row under the last one; the render range widens that by `overscan` rows on each side.
/// An empty list, an unmeasured (zero-size) viewport or a zero row size yield empty ranges.
///
/// The scroll extent saturates at `u64::MAX` (see [`total_size`]). The visible range stays a
/// handful of rows even then, and the render range never exceeds it by more than `2 * overscan`.
pub fn compute_window(
    count: usize,
    viewport_size: u32,
    row_size: u32,
    scroll_offset: u64,
    overscan: usize,
) -> Window {
    let total = total_size(count, row_size);
    let mut window = Window {
        count,
        row_size,
        total_size: total,
        scroll_offset: 0,
        visible: VirtualRange::EMPTY,
        range: VirtualRange::EMPTY,
    };
    if count == 0 || viewport_size == 0 || row_size == 0 {
        return window;
    }

    let row = row_size as u64;
    let view = viewport_size as u64;
    let offset = scroll_offset.min(max_scroll_offset(count, row_size, viewport_size));
    window.scroll_offset = offset;

    let last_index = count - 1;
    let first = cmp::min((offset / row) as usize, last_index);
    let last_pixel = offset.saturating_add(view).saturating_sub(1);
    let last = cmp::min((last_pixel / row) as usize, last_index).max(first);

    window.visible = VirtualRange {
        start_index: first,
        end_index: last + 1,
    };
    window.range = VirtualRange {
        start_index: first.saturating_sub(overscan),
        end_index: cmp::min(count, last.saturating_add(1).saturating_add(overscan)),
    };
    window
}
