use std::time::Instant;

use crate::engine::stopwatch::Stopwatch;
use crate::session::drill::TypingSession;

/// Live numbers shown under the typing area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub elapsed_secs: u64,
    pub wpm: u32,
    pub accuracy: u32,
}

impl SessionStats {
    pub fn compute(elapsed_secs: u64, index: usize, error_count: usize) -> Self {
        Self {
            elapsed_secs,
            wpm: wpm(index, elapsed_secs),
            accuracy: accuracy(index, error_count),
        }
    }

    pub fn from_session(session: &TypingSession, stopwatch: &Stopwatch, now: Instant) -> Self {
        Self::compute(
            stopwatch.elapsed_secs(now),
            session.current_index(),
            session.error_count(),
        )
    }

    pub fn clock(&self) -> String {
        format_clock(self.elapsed_secs)
    }
}

/// Five characters make a word.
pub fn wpm(index: usize, elapsed_secs: u64) -> u32 {
    if elapsed_secs == 0 {
        return 0;
    }
    let words = index as f64 / 5.0;
    let minutes = elapsed_secs as f64 / 60.0;
    (words / minutes).round() as u32
}

pub fn accuracy(index: usize, error_count: usize) -> u32 {
    if index == 0 {
        return 100;
    }
    let error_rate = error_count as f64 / index as f64;
    ((1.0 - error_rate) * 100.0).round().clamp(0.0, 100.0) as u32
}

/// `m:ss`
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
