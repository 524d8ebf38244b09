use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::engine::key_stats::ProblematicKeyTally;
use crate::session::target::TargetText;

/// Shifted punctuation most people fumble, used before any mistakes are
/// on record.
pub const DEFAULT_PRACTICE_KEYS: [char; 10] = ['[', ']', '{', '}', '(', ')', ';', ':', '"', '\''];

pub const DEFAULT_LINE_WIDTH: usize = 36;
pub const DEFAULT_LINE_COUNT: usize = 5;
pub const DEFAULT_KEY_COUNT: usize = 10;

/// Builds drill lines out of the keys the user misses most.
pub struct PracticeSetGenerator {
    rng: SmallRng,
    line_width: usize,
    line_count: usize,
    key_count: usize,
}

impl PracticeSetGenerator {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            rng,
            line_width: DEFAULT_LINE_WIDTH,
            line_count: DEFAULT_LINE_COUNT,
            key_count: DEFAULT_KEY_COUNT,
        }
    }

    pub fn with_layout(mut self, line_width: usize, line_count: usize, key_count: usize) -> Self {
        self.line_width = line_width.max(1);
        self.line_count = line_count.max(1);
        self.key_count = key_count.max(1);
        self
    }

    /// Keys to drill: the most-missed ones, or the defaults when nothing
    /// usable has been recorded. Whitespace is skipped since it would
    /// break the line layout.
    pub fn key_set(&self, tally: &ProblematicKeyTally) -> Vec<char> {
        let keys: Vec<char> = tally
            .top(tally.len())
            .into_iter()
            .map(|entry| entry.key)
            .filter(|key| !key.is_whitespace())
            .take(self.key_count)
            .collect();
        if keys.is_empty() {
            DEFAULT_PRACTICE_KEYS.to_vec()
        } else {
            keys
        }
    }

    pub fn generate(&mut self, tally: &ProblematicKeyTally) -> TargetText {
        let keys = self.key_set(tally);
        let lines: Vec<String> = (0..self.line_count)
            .map(|_| self.build_line(&keys))
            .collect();
        TargetText::new(&lines.join("\n"))
    }

    fn build_line(&mut self, keys: &[char]) -> String {
        let mut line = String::with_capacity(self.line_width);
        let mut len = 0usize;
        while len < self.line_width {
            let Some(&key) = keys.choose(&mut self.rng) else {
                break;
            };
            line.push(key);
            len += 1;
            if len < self.line_width {
                line.push(' ');
                len += 1;
            }
        }
        line.trim_end().to_string()
    }
}
