use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which kind of text is being practised. The mode only selects how raw
/// text is normalised; every mode shares the same typing session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Prose,
    Code,
    Practice,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Prose, Mode::Code, Mode::Practice];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Prose => "prose",
            Mode::Code => "code",
            Mode::Practice => "practice",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Prose => "News",
            Mode::Code => "Code",
            Mode::Practice => "Extra",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Mode::Prose => Mode::Code,
            Mode::Code => Mode::Practice,
            Mode::Practice => Mode::Prose,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Mode::Prose => Mode::Practice,
            Mode::Code => Mode::Prose,
            Mode::Practice => Mode::Code,
        }
    }

    /// Practice text is generated, so there is nothing to import.
    pub fn accepts_import(self) -> bool {
        !matches!(self, Mode::Practice)
    }
}
