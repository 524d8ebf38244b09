use crate::engine::key_stats::ProblematicKeyTally;
use crate::session::drill::TypingSession;

/// A key press as the typing engine sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Enter,
    Backspace,
    /// Shift/Ctrl/Alt/Meta on their own, or chords that emit no character.
    Modifier,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Backspace,
    Matched,
    Completed,
    Mistyped { expected: char, actual: char },
}

/// Snapshot handed to observers after every applied key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub index: usize,
    pub error_count: usize,
    pub step: Step,
}

impl Progress {
    fn of(session: &TypingSession, step: Step) -> Self {
        Self {
            index: session.current_index(),
            error_count: session.error_count(),
            step,
        }
    }
}

/// Apply one key to the session. Returns `None` when the key was ignored
/// (finished session or bare modifier); mistakes are reported through the
/// returned step, never as an error.
pub fn apply(
    session: &mut TypingSession,
    key: KeyInput,
    tally: &mut ProblematicKeyTally,
) -> Option<Progress> {
    if session.is_complete() {
        return None;
    }
    match key {
        KeyInput::Modifier => None,
        KeyInput::Backspace => process_backspace(session),
        KeyInput::Enter => process_char(session, '\n', tally),
        KeyInput::Char(ch) => process_char(session, ch, tally),
    }
}

pub fn process_backspace(session: &mut TypingSession) -> Option<Progress> {
    if session.is_complete() {
        return None;
    }
    session.retreat();
    Some(Progress::of(session, Step::Backspace))
}

pub fn process_char(
    session: &mut TypingSession,
    ch: char,
    tally: &mut ProblematicKeyTally,
) -> Option<Progress> {
    if session.is_complete() {
        return None;
    }
    let expected = session.expected()?;

    // Space at the end of a line stands in for the line break.
    let actual = if ch == ' ' && expected == '\n' { '\n' } else { ch };

    if actual == expected {
        session.advance();
        let step = if session.is_complete() {
            Step::Completed
        } else {
            Step::Matched
        };
        return Some(Progress::of(session, step));
    }

    if session.mark_error() {
        tally.record(expected);
    }
    Some(Progress::of(session, Step::Mistyped { expected, actual }))
}
