use std::time::Duration;

use rowscope::HeaderClickPolicy;
use serde::{Deserialize, Serialize};

/// The endpoint the reference dashboard loads its users from.
pub const DEFAULT_ENDPOINT: &str = "https://randomuser.me/api/?results=1000&nat=us";

/// Tunables for a [`crate::TableController`] and its [`crate::UserSource`].
///
/// Every field has a default, so a partial JSON/TOML document deserializes cleanly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub endpoint: String,
    /// Visible height of the scroll container.
    pub viewport_size: u32,
    /// Fixed height of every row.
    pub row_size: u32,
    /// Extra rows materialized above and below the visible range.
    pub overscan: usize,
    /// Quiet period before typed filter text is applied.
    pub debounce_ms: u64,
    pub header_click_policy: HeaderClickPolicy,
    /// Whole-request timeout for the fetch. `None` waits indefinitely.
    pub request_timeout_ms: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            viewport_size: 600,
            row_size: 56,
            overscan: 10,
            debounce_ms: 300,
            header_click_policy: HeaderClickPolicy::default(),
            request_timeout_ms: None,
        }
    }
}

impl TableConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_viewport_size(mut self, viewport_size: u32) -> Self {
        self.viewport_size = viewport_size;
        self
    }

    pub fn with_row_size(mut self, row_size: u32) -> Self {
        self.row_size = row_size;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn with_header_click_policy(mut self, policy: HeaderClickPolicy) -> Self {
        self.header_click_policy = policy;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = Some(timeout.as_millis().min(u64::MAX as u128) as u64);
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
