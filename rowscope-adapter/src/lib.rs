//! Framework-neutral glue for driving a `rowscope` user table from a UI.
//!
//! This crate adds what the core engines leave out:
//! - [`UserSource`]: fetches the user list over HTTP (`reqwest`)
//! - [`Debouncer`]: a tick-driven debounce timer for filter input
//! - [`TableController`]: the loading/ready/failed state machine that owns the data, the view
//!   snapshot and a [`rowscope::Virtualizer`], and renders [`Screen`]s
//!
//! Nothing here holds UI objects or spawns timers. Callers pass `now_ms` explicitly.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod config;
mod controller;
mod debounce;
mod error;
mod source;


pub use config::{DEFAULT_ENDPOINT, TableConfig};
pub use controller::{Frame, HeaderCell, Row, Screen, TableController, ViewState};
pub use debounce::{Debouncer, Scheduled, TimerToken};
pub use error::{ControllerError, FetchError, PhaseKind};
pub use source::{UserSource, decode_payload};
