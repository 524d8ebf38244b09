use crate::session::target::TargetText;

/// Where the next character to type sits on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

/// Map a linear index into `(line, column)` by looking at the consumed
/// prefix `target[..index]`. Indices past the end are clamped.
pub fn locate(target: &TargetText, index: usize) -> CursorPosition {
    let consumed = &target.chars()[..index.min(target.len())];
    match consumed.iter().rposition(|&ch| ch == '\n') {
        Some(last_break) => CursorPosition {
            line: consumed.iter().filter(|&&ch| ch == '\n').count(),
            column: consumed.len() - last_break - 1,
        },
        None => CursorPosition {
            line: 0,
            column: consumed.len(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_reference(text: &str, index: usize) -> CursorPosition {
        let prefix: String = text.chars().take(index).collect();
        let parts: Vec<&str> = prefix.split('\n').collect();
        CursorPosition {
            line: parts.len() - 1,
            column: parts[parts.len() - 1].chars().count(),
        }
    }

    #[test]
    fn test_start_of_text() {
        let target = TargetText::new("abc\ndef");
        assert_eq!(locate(&target, 0), CursorPosition { line: 0, column: 0 });
    }

    #[test]
    fn test_after_newline_is_next_line_start() {
        let target = TargetText::new("abc\ndef");
        assert_eq!(locate(&target, 4), CursorPosition { line: 1, column: 0 });
        assert_eq!(locate(&target, 3), CursorPosition { line: 0, column: 3 });
    }

    #[test]
    fn test_matches_manual_split_for_every_index() {
        let text = "def f(x):\n    return x\n\n# done";
        let target = TargetText::new(text);
        for i in 0..=target.len() {
            assert_eq!(locate(&target, i), split_reference(text, i), "index {i}");
        }
    }

    #[test]
    fn test_index_past_end_is_clamped() {
        let target = TargetText::new("ab\nc");
        assert_eq!(locate(&target, 99), locate(&target, target.len()));
    }

    #[test]
    fn test_empty_target() {
        let target = TargetText::default();
        assert_eq!(locate(&target, 0), CursorPosition::default());
    }
}
