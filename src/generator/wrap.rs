/// Greedy word wrap: pack whitespace-separated words into lines of at most
/// `width` characters. A word longer than `width` gets a line of its own.
pub fn wrap_words(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len + word_len + 1 <= width {
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        } else {
            if !current.is_empty() {
                lines.push(current.trim_end().to_string());
            }
            current = word.to_string();
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current.trim_end().to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_line() {
        assert_eq!(wrap_words("hello there", 76), "hello there");
    }

    #[test]
    fn test_overflowing_word_starts_new_line() {
        assert_eq!(wrap_words("aaa bbb ccc", 7), "aaa bbb\nccc");
    }

    #[test]
    fn test_line_never_exceeds_width() {
        let text = "My father's family name being Pirrip, and my Christian name Philip, \
                    my infant tongue could make of both names nothing longer or more \
                    explicit than Pip. So, I called myself Pip, and came to be called Pip.";
        let wrapped = wrap_words(text, 76);
        assert!(wrapped.lines().count() > 1);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 76, "too long: {line:?}");
            assert_eq!(line, line.trim_end());
        }
        let rejoined: Vec<&str> = wrapped.split_whitespace().collect();
        let words: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, words);
    }

    #[test]
    fn test_long_word_gets_own_line() {
        assert_eq!(wrap_words("a abcdefghij b", 5), "a\nabcdefghij\nb");
    }

    #[test]
    fn test_collapses_runs_of_whitespace() {
        assert_eq!(wrap_words("  a \n\n b\t c  ", 76), "a b c");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(wrap_words("", 76), "");
        assert_eq!(wrap_words("   ", 76), "");
    }
}
