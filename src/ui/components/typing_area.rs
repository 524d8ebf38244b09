use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::cursor::CursorPosition;
use crate::session::drill::TypingSession;
use crate::ui::theme::Theme;

pub struct TypingArea<'a> {
    session: &'a TypingSession,
    theme: &'a Theme,
    title: Option<&'a str>,
}

impl<'a> TypingArea<'a> {
    pub fn new(session: &'a TypingSession, theme: &'a Theme) -> Self {
        Self {
            session,
            theme,
            title: None,
        }
    }

    pub fn title(mut self, title: Option<&'a str>) -> Self {
        self.title = title;
        self
    }
}

/// A render token maps a single target character to its display representation.
struct RenderToken {
    target_idx: usize,
    display: String,
    is_line_break: bool,
}

fn build_render_tokens(target: &[char]) -> Vec<RenderToken> {
    target
        .iter()
        .enumerate()
        .map(|(i, &ch)| match ch {
            '\n' => RenderToken {
                target_idx: i,
                display: "\u{21b5}".to_string(), // ↵
                is_line_break: true,
            },
            _ => RenderToken {
                target_idx: i,
                display: ch.to_string(),
                is_line_break: false,
            },
        })
        .collect()
}

/// Scroll so the cursor stays on screen: vertically keep it a third of the
/// way down once the text is taller than the view, horizontally only when
/// the line runs past the right edge.
pub fn scroll_offset(cursor: CursorPosition, width: u16, height: u16) -> (u16, u16) {
    let line = u16::try_from(cursor.line).unwrap_or(u16::MAX);
    let column = u16::try_from(cursor.column).unwrap_or(u16::MAX);
    let y = line.saturating_sub(height / 3);
    let x = if width == 0 || column < width {
        0
    } else {
        column - width + 1
    };
    (y, x)
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let tokens = build_render_tokens(self.session.target().chars());
        let cursor = self.session.current_index();
        let complete = self.session.is_complete();

        let correct = Style::default().fg(colors.text_correct());
        let incorrect = Style::default()
            .fg(colors.text_incorrect())
            .bg(colors.text_incorrect_bg())
            .add_modifier(Modifier::UNDERLINED);
        let pending = Style::default().fg(colors.text_pending());
        let at_cursor = Style::default()
            .fg(colors.text_cursor_fg())
            .bg(colors.text_cursor_bg());

        let mut lines: Vec<Line> = vec![Line::default()];
        for token in tokens {
            let idx = token.target_idx;
            let style = if idx < cursor {
                if self.session.is_error(idx) { incorrect } else { correct }
            } else if idx == cursor && !complete {
                if self.session.is_error(idx) {
                    // a wrong key is waiting to be corrected
                    incorrect.bg(colors.text_cursor_bg())
                } else {
                    at_cursor
                }
            } else {
                pending
            };

            if let Some(line) = lines.last_mut() {
                line.push_span(Span::styled(token.display, style));
            }
            if token.is_line_break {
                lines.push(Line::default());
            }
        }

        let mut block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        if let Some(title) = self.title {
            block = block.title(format!(" {title} "));
        }
        let inner = block.inner(area);
        let offset = scroll_offset(self.session.cursor_position(), inner.width, inner.height);

        Paragraph::new(lines)
            .block(block)
            .scroll(offset)
            .render(area, buf);
    }
}
