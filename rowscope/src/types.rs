use serde::{Deserialize, Serialize};

/// A half-open index range `[start_index, end_index)` into the filtered and sorted rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VirtualRange {
    pub const EMPTY: VirtualRange = VirtualRange {
        start_index: 0,
        end_index: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    /// First index in the range (inclusive).
    pub fn first(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.start_index)
    }

    /// Last index in the range (inclusive).
    pub fn last(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end_index - 1)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualItem {
    pub index: usize,
    /// Absolute offset of the row's top edge inside the scroll container.
    pub start: u64,
    pub size: u32,
}

impl VirtualItem {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualItemKeyed<K> {
    pub key: K,
    pub index: usize,
    /// Absolute offset of the row's top edge inside the scroll container.
    pub start: u64,
    pub size: u32,
}

impl<K> VirtualItemKeyed<K> {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}
