use std::fmt;

/// The text being typed against. Built once per round and never edited in
/// place; a new round gets a new `TargetText`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetText {
    chars: Vec<char>,
}

impl TargetText {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Lines without their terminating `\n`. An empty text still has one
    /// (empty) line, matching how a cursor at index 0 sits on line 0.
    pub fn lines(&self) -> impl Iterator<Item = &[char]> {
        self.chars.split(|&ch| ch == '\n')
    }

    pub fn line_count(&self) -> usize {
        self.chars.iter().filter(|&&ch| ch == '\n').count() + 1
    }
}

impl From<&str> for TargetText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TargetText {
    fn from(text: String) -> Self {
        Self::new(&text)
    }
}

impl fmt::Display for TargetText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.chars {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
