/// One entry of the problematic-key tally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyCount {
    pub key: char,
    pub count: u32,
}

/// Mistakes per expected character, accumulated across rounds until the
/// mode changes. Entries keep the order in which each key was first
/// missed so that ranking ties resolve deterministically.
#[derive(Clone, Debug, Default)]
pub struct ProblematicKeyTally {
    entries: Vec<KeyCount>,
}

impl ProblematicKeyTally {
    pub fn record(&mut self, key: char) {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.count += 1,
            None => self.entries.push(KeyCount { key, count: 1 }),
        }
    }

    pub fn count(&self, key: char) -> u32 {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The `n` most-missed keys, highest count first.
    pub fn top(&self, n: usize) -> Vec<KeyCount> {
        let mut ranked = self.entries.clone();
        // stable: equal counts stay in first-missed order
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}
