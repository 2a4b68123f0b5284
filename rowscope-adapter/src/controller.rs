use std::borrow::Cow;
use std::sync::Arc;

use rowscope::{
    Column, DisplayRecord, FrameState, ScrollState, SortKey, SortState, Virtualizer,
    VirtualizerOptions, ViewportState, Window, filter_by_name, sort_by, transform_values,
};
use serde_json::Value;

use crate::{ControllerError, Debouncer, FetchError, PhaseKind, TableConfig, TimerToken};

/// Everything the user can change about the table, captured as one value.
///
/// Each event produces a new snapshot that replaces the old one wholesale, so a renderer never
/// observes a half-applied update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Text as typed; echoed to the input box immediately.
    pub raw_query: String,
    /// Text the rows are currently filtered by; trails `raw_query` by the debounce delay.
    pub active_query: String,
    pub sort: SortState,
    pub frame: FrameState,
}

#[derive(Debug)]
enum Phase {
    Loading,
    Ready(Dataset),
    Failed { message: String },
}

impl Phase {
    fn kind(&self) -> PhaseKind {
        match self {
            Self::Loading => PhaseKind::Loading,
            Self::Ready(_) => PhaseKind::Ready,
            Self::Failed { .. } => PhaseKind::Failed,
        }
    }
}

/// Loaded records plus the filtered and sorted view derived from them.
#[derive(Debug)]
struct Dataset {
    records: Vec<Arc<DisplayRecord>>,
    view: Vec<Arc<DisplayRecord>>,
    skipped: usize,
}

impl Dataset {
    fn rebuild(&mut self, query: &str, sort: SortState) {
        let filtered = filter_by_name(&self.records, query);
        self.view = sort_by(&filtered, sort.key, sort.order);
        vtrace!(query, rows = self.view.len(), "rebuilt table view");
    }
}

/// One header cell of a rendered frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCell {
    pub column: Column,
    pub text: Cow<'static, str>,
    pub sortable: bool,
    pub active: bool,
}

/// One materialized row, positioned at an absolute offset inside the scroll extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Row<'a> {
    /// Position within the filtered and sorted view.
    pub index: usize,
    /// Stable identity for widget reuse across re-sorts.
    pub key: &'a str,
    pub offset: u64,
    pub size: u32,
    pub record: &'a DisplayRecord,
}

/// Everything needed to paint one frame of the table.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    /// Height of the scroll spacer.
    pub total_size: u64,
    pub window: Window,
    /// Number of rows matching the active filter.
    pub row_count: usize,
    pub raw_query: &'a str,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Row<'a>>,
}

#[derive(Clone, Debug)]
pub enum Screen<'a> {
    Loading,
    Failed { message: &'a str },
    Table(Frame<'a>),
}

/// A framework-neutral controller for the user table.
///
/// It holds no UI objects and no timers. Adapters drive it by calling:
/// - [`TableController::finish_loading`] once the fetch completes
/// - `on_filter_input` / `on_header_click` / `on_scroll` / `on_viewport_resize` for UI events
/// - [`TableController::tick`] from a timer, at least by [`TableController::next_deadline_ms`]
///
/// and repaint from [`TableController::render`] whenever [`TableController::revision`] moves.
#[derive(Debug)]
pub struct TableController {
    config: TableConfig,
    phase: Phase,
    view: ViewState,
    debounce: Debouncer<String>,
    v: Virtualizer,
    revision: u64,
}

impl TableController {
    pub fn new(config: TableConfig) -> Self {
        let v = Virtualizer::new(
            VirtualizerOptions::new(0, config.row_size)
                .with_overscan(config.overscan)
                .with_initial_viewport_size(config.viewport_size),
        );
        Self {
            debounce: Debouncer::new(config.debounce_ms),
            view: ViewState {
                frame: v.frame_state(),
                ..ViewState::default()
            },
            phase: Phase::Loading,
            config,
            v,
            revision: 0,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn phase(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn virtualizer(&self) -> &Virtualizer {
        &self.v
    }

    /// Bumped on every observable change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All loaded records, in source order. Empty unless ready.
    pub fn records(&self) -> &[Arc<DisplayRecord>] {
        match &self.phase {
            Phase::Ready(data) => &data.records,
            _ => &[],
        }
    }

    /// Records matching the active filter, in sort order. Empty unless ready.
    pub fn rows(&self) -> &[Arc<DisplayRecord>] {
        match &self.phase {
            Phase::Ready(data) => &data.view,
            _ => &[],
        }
    }

    /// Number of payload entries dropped as malformed during loading.
    pub fn skipped_records(&self) -> usize {
        match &self.phase {
            Phase::Ready(data) => data.skipped,
            _ => 0,
        }
    }

    /// When the pending filter commit is due, if any.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.debounce.deadline_ms()
    }

    /// Leaves the loading phase with the outcome of the fetch.
    pub fn finish_loading(
        &mut self,
        outcome: Result<Vec<Value>, FetchError>,
    ) -> Result<(), ControllerError> {
        if !matches!(self.phase, Phase::Loading) {
            return Err(ControllerError::AlreadyLoaded);
        }

        self.phase = match outcome {
            Ok(values) => {
                let transformed = transform_values(values);
                let records: Vec<Arc<DisplayRecord>> =
                    transformed.records.into_iter().map(Arc::new).collect();
                let mut data = Dataset {
                    view: Vec::new(),
                    skipped: transformed.skipped.len(),
                    records,
                };
                data.rebuild(&self.view.active_query, self.view.sort);
                vdebug!(
                    records = data.records.len(),
                    skipped = data.skipped,
                    "table ready"
                );
                self.v.set_count_clamped(data.view.len());
                Phase::Ready(data)
            }
            Err(err) => {
                vwarn!(error = %err, "user fetch failed");
                Phase::Failed {
                    message: format!("Failed to load users: {err}"),
                }
            }
        };
        self.view.frame = self.v.frame_state();
        self.revision += 1;
        Ok(())
    }

    /// Records new filter text.
    ///
    /// The text is echoed right away (`raw_query`), while the rows only follow once the input has
    /// been quiet for `debounce_ms`. Each call cancels the previously scheduled commit.
    pub fn on_filter_input(
        &mut self,
        text: impl Into<String>,
        now_ms: u64,
    ) -> Result<TimerToken, ControllerError> {
        self.ensure_ready()?;
        let text = text.into();
        let token = self.debounce.schedule(text.clone(), now_ms);
        let next = ViewState {
            raw_query: text,
            ..self.view.clone()
        };
        self.commit(next);
        Ok(token)
    }

    /// Applies the pending filter text if its debounce deadline has passed.
    ///
    /// Returns `true` if the view changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(query) = self.debounce.poll(now_ms) else {
            return false;
        };
        vdebug!(query = %query, "filter committed");
        let next = ViewState {
            active_query: query,
            ..self.view.clone()
        };
        self.commit(next)
    }

    /// Re-sorts after a click on the header of `key`, following the configured policy.
    pub fn on_header_click(&mut self, key: SortKey) -> Result<SortState, ControllerError> {
        self.ensure_ready()?;
        let sort = self
            .view
            .sort
            .on_header_click(key, self.config.header_click_policy);
        vdebug!(key = key.as_str(), order = ?sort.order, "sort changed");
        let next = ViewState {
            sort,
            ..self.view.clone()
        };
        self.commit(next);
        Ok(sort)
    }

    /// Like [`TableController::on_header_click`], for clicks that land on a column cell.
    ///
    /// Clicks on columns that are not sortable are ignored and return `Ok(None)`.
    pub fn on_column_click(&mut self, column: Column) -> Result<Option<SortState>, ControllerError> {
        match column.sort_key() {
            Some(key) => self.on_header_click(key).map(Some),
            None => {
                self.ensure_ready()?;
                Ok(None)
            }
        }
    }

    /// Records a scroll position reported by the UI. The stored offset is clamped to the extent.
    ///
    /// Returns the clamped offset.
    pub fn on_scroll(&mut self, offset: u64) -> Result<u64, ControllerError> {
        self.ensure_ready()?;
        let next = ViewState {
            frame: FrameState {
                scroll: ScrollState { offset },
                ..self.view.frame
            },
            ..self.view.clone()
        };
        self.commit(next);
        Ok(self.view.frame.scroll.offset)
    }

    /// Records a new viewport height. Accepted in every phase.
    pub fn on_viewport_resize(&mut self, size: u32) {
        let next = ViewState {
            frame: FrameState {
                viewport: ViewportState { size },
                ..self.view.frame
            },
            ..self.view.clone()
        };
        self.commit(next);
    }

    /// Calls `f` for each materialized row, without allocating.
    pub fn for_each_row<'a>(&'a self, mut f: impl FnMut(Row<'a>)) {
        let rows = self.rows();
        self.v.for_each_virtual_item_keyed(
            |index| rows.get(index).map(|r| r.key()),
            |item| {
                let (Some(key), Some(record)) = (item.key, rows.get(item.index)) else {
                    return;
                };
                f(Row {
                    index: item.index,
                    key,
                    offset: item.start,
                    size: item.size,
                    record: record.as_ref(),
                });
            },
        );
    }

    /// Produces what the UI should show right now.
    pub fn render(&self) -> Screen<'_> {
        match &self.phase {
            Phase::Loading => Screen::Loading,
            Phase::Failed { message } => Screen::Failed { message },
            Phase::Ready(_) => {
                let window = self.v.window();
                let mut rows = Vec::with_capacity(window.len());
                self.for_each_row(|row| rows.push(row));
                Screen::Table(Frame {
                    total_size: window.total_size,
                    window,
                    row_count: self.rows().len(),
                    raw_query: &self.view.raw_query,
                    headers: self.headers(),
                    rows,
                })
            }
        }
    }

    fn headers(&self) -> Vec<HeaderCell> {
        Column::ALL
            .iter()
            .map(|&column| HeaderCell {
                column,
                text: column.header_text(self.view.sort),
                sortable: column.sort_key().is_some(),
                active: column.sort_key() == Some(self.view.sort.key),
            })
            .collect()
    }

    fn ensure_ready(&self) -> Result<(), ControllerError> {
        match self.phase.kind() {
            PhaseKind::Ready => Ok(()),
            phase => Err(ControllerError::NotReady { phase }),
        }
    }

    /// Replaces the current snapshot with `next`, rebuilding the cached view only when the filter
    /// or sort changed. Returns `true` if anything observable changed.
    fn commit(&mut self, mut next: ViewState) -> bool {
        let rebuild = next.active_query != self.view.active_query || next.sort != self.view.sort;
        if rebuild {
            if let Phase::Ready(data) = &mut self.phase {
                data.rebuild(&next.active_query, next.sort);
            }
        }

        let count = self.rows().len();
        self.v.batch_update(|v| {
            v.set_count(count);
            v.restore_frame_state(next.frame);
        });
        next.frame = self.v.frame_state();

        if next == self.view {
            return false;
        }
        self.view = next;
        self.revision += 1;
        true
    }
}
