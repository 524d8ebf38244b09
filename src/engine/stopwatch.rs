use std::time::Instant;

/// Elapsed-time source for the stats bar.
///
/// Starts on the first progress that leaves index 0, resets whenever the
/// index returns to 0, and freezes once the session completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl Stopwatch {
    pub fn observe(&mut self, index: usize, completed: bool, now: Instant) {
        if index == 0 {
            self.reset();
            return;
        }
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        if completed && self.stopped_at.is_none() {
            self.stopped_at = Some(now);
        }
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.stopped_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    /// Whole seconds, like a one-second ticking counter.
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        match (self.started_at, self.stopped_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start).as_secs(),
            (Some(start), None) => now.saturating_duration_since(start).as_secs(),
            _ => 0,
        }
    }
}
