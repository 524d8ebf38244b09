use std::time::Instant;

use crate::engine::key_stats::{KeyCount, ProblematicKeyTally};
use crate::engine::stats::SessionStats;
use crate::engine::stopwatch::Stopwatch;
use crate::generator::practice::DEFAULT_PRACTICE_KEYS;
use crate::mode::Mode;
use crate::session::drill::TypingSession;

pub const PROBLEM_KEYS_SHOWN: usize = 5;

/// Frozen summary of a finished round, shown on the results screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundResult {
    pub mode: Mode,
    pub stats: SessionStats,
    pub total_chars: usize,
    pub errors: usize,
    pub problem_keys: Vec<KeyCount>,
}

impl RoundResult {
    pub fn from_session(
        mode: Mode,
        session: &TypingSession,
        stopwatch: &Stopwatch,
        tally: &ProblematicKeyTally,
        now: Instant,
    ) -> Self {
        let problem_keys = if mode == Mode::Practice {
            problem_keys(tally, PROBLEM_KEYS_SHOWN)
        } else {
            Vec::new()
        };
        Self {
            mode,
            stats: SessionStats::from_session(session, stopwatch, now),
            total_chars: session.target().len(),
            errors: session.error_count(),
            problem_keys,
        }
    }

    pub fn correct_chars(&self) -> usize {
        self.total_chars.saturating_sub(self.errors)
    }
}

/// Most-missed keys, or the default practice keys at zero when nothing
/// has been missed yet.
pub fn problem_keys(tally: &ProblematicKeyTally, n: usize) -> Vec<KeyCount> {
    if tally.is_empty() {
        return DEFAULT_PRACTICE_KEYS
            .iter()
            .take(n)
            .map(|&key| KeyCount { key, count: 0 })
            .collect();
    }
    tally.top(n)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::session::input::{KeyInput, apply};
    use crate::session::target::TargetText;

    fn finish(text: &str, keys: &str, tally: &mut ProblematicKeyTally) -> (TypingSession, Stopwatch, Instant) {
        let mut session = TypingSession::new(TargetText::from(text));
        let mut stopwatch = Stopwatch::default();
        let t0 = Instant::now();
        for (i, ch) in keys.chars().enumerate() {
            let now = t0 + Duration::from_secs(i as u64);
            if let Some(progress) = apply(&mut session, KeyInput::Char(ch), tally) {
                stopwatch.observe(progress.index, session.is_complete(), now);
            }
        }
        (session, stopwatch, t0 + Duration::from_secs(60))
    }

    #[test]
    fn test_result_counts_errors() {
        let mut tally = ProblematicKeyTally::default();
        let (session, stopwatch, now) = finish("cat", "cxat", &mut tally);
        let result = RoundResult::from_session(Mode::Prose, &session, &stopwatch, &tally, now);
        assert_eq!(result.total_chars, 3);
        assert_eq!(result.errors, 1);
        assert_eq!(result.correct_chars(), 2);
        assert_eq!(result.stats.accuracy, 67);
        assert!(result.problem_keys.is_empty());
    }

    #[test]
    fn test_practice_result_lists_problem_keys() {
        let mut tally = ProblematicKeyTally::default();
        let (session, stopwatch, now) = finish("; ;", ";x x;", &mut tally);
        let result = RoundResult::from_session(Mode::Practice, &session, &stopwatch, &tally, now);
        assert!(session.is_complete());
        assert_eq!(result.problem_keys, vec![KeyCount { key: ' ', count: 1 }, KeyCount { key: ';', count: 1 }]);
    }

    #[test]
    fn test_problem_keys_default_when_nothing_missed() {
        let keys = problem_keys(&ProblematicKeyTally::default(), 5);
        assert_eq!(keys.len(), 5);
        assert_eq!(keys[0], KeyCount { key: '[', count: 0 });
        assert!(keys.iter().all(|k| k.count == 0));
    }
}
