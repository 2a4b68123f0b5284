use std::fmt;

/// Coarse controller phase, used in diagnostics and error values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        })
    }
}

/// Errors that can occur while fetching the user list.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The body is not valid JSON, or `results` is not an array.
    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The body is a JSON object without a `results` field.
    #[error("response has no `results` array")]
    MissingResults,
}

/// Errors returned by [`crate::TableController`] when an event is not valid in its phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("interaction rejected while the table is {phase}")]
    NotReady { phase: PhaseKind },

    #[error("the table has already left the loading phase")]
    AlreadyLoaded,
}
