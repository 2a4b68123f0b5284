//! A tick-driven single-slot debounce timer.
//!
//! There are no threads or runtime timers here: the owner passes `now_ms` on every call, and a
//! scheduled value is released by the first [`Debouncer::poll`] at or after its deadline.

/// Identifies one scheduled value. Tokens are never reused by the same debouncer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scheduled<T> {
    pub token: TimerToken,
    pub value: T,
    pub due_ms: u64,
}

/// Holds at most one pending value; scheduling a new one cancels the previous.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    delay_ms: u64,
    next_token: u64,
    pending: Option<Scheduled<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            next_token: 0,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Schedules `value` to be released at `now_ms + delay_ms`, replacing any pending value.
    pub fn schedule(&mut self, value: T, now_ms: u64) -> TimerToken {
        #[cfg(feature = "tracing")]
        if let Some(prev) = &self.pending {
            vtrace!(token = prev.token.0, "debounce superseded");
        }
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(Scheduled {
            token,
            value,
            due_ms: now_ms.saturating_add(self.delay_ms),
        });
        token
    }

    /// Cancels the pending value if it was scheduled under `token`.
    ///
    /// Returns `false` for stale tokens (already fired or superseded).
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        match &self.pending {
            Some(p) if p.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Drops whatever is pending and returns it.
    pub fn cancel_pending(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&Scheduled<T>> {
        self.pending.as_ref()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.due_ms)
    }

    /// Releases the pending value if its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some(p) if now_ms >= p.due_ms => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }
}
