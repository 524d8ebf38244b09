use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::mode::Mode;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

/// Text entry for importing: pasted prose, or a URL in code mode.
pub struct ImportPrompt<'a> {
    input: &'a LineInput,
    mode: Mode,
    limit: usize,
    theme: &'a Theme,
}

impl<'a> ImportPrompt<'a> {
    pub fn new(input: &'a LineInput, mode: Mode, limit: usize, theme: &'a Theme) -> Self {
        Self {
            input,
            mode,
            limit,
            theme,
        }
    }
}

impl Widget for ImportPrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let (title, hint) = match self.mode {
            Mode::Code => (" Import code ", "URL of a file (GitHub links work)"),
            _ => (" Import text ", "Paste or type the text to practise"),
        };

        Clear.render(area, buf);
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));

        let (before, at, after) = self.input.render_parts();
        let text_style = Style::default().fg(colors.fg());
        let cursor_style = Style::default()
            .fg(colors.text_cursor_fg())
            .bg(colors.text_cursor_bg());
        let cursor = at.map_or_else(|| " ".to_string(), |ch| ch.to_string());

        let mut counter = format!("{}/{}", self.input.len(), self.limit);
        if self.input.is_full() {
            counter.push_str(" (limit)");
        }

        let lines = vec![
            Line::from(Span::styled(hint, Style::default().fg(colors.text_pending()))),
            Line::default(),
            Line::from(vec![
                Span::styled(before, text_style),
                Span::styled(cursor, cursor_style),
                Span::styled(after, text_style),
            ]),
            Line::default(),
            Line::from(vec![
                Span::styled(counter, Style::default().fg(colors.text_pending())),
                Span::styled(
                    "   [Enter] Load  [Esc] Cancel",
                    Style::default().fg(colors.accent()),
                ),
            ]),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

/// Message that has to be acknowledged before typing continues.
pub struct Notice<'a> {
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> Notice<'a> {
    pub fn new(message: &'a str, theme: &'a Theme) -> Self {
        Self { message, theme }
    }
}

impl Widget for Notice<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" Notice ")
            .border_style(Style::default().fg(colors.warning()))
            .style(Style::default().bg(colors.bg()));
        let lines = vec![
            Line::from(Span::styled(
                self.message,
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Press any key to continue",
                Style::default().fg(colors.text_pending()),
            )),
        ];
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
