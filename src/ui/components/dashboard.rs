use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::mode::Mode;
use crate::session::result::RoundResult;
use crate::ui::theme::Theme;

/// Results shown once the last character has been typed.
pub struct Dashboard<'a> {
    pub result: &'a RoundResult,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(result: &'a RoundResult, theme: &'a Theme) -> Self {
        Self { result, theme }
    }
}

/// Spaces and line breaks are invisible on their own.
pub fn key_label(key: char) -> String {
    match key {
        ' ' => "space".to_string(),
        '\n' => "enter".to_string(),
        other => other.to_string(),
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Round Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            format!("{} results", self.result.mode.label()),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let label = Style::default().fg(colors.fg());
        let value = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);
        let acc_color = if self.result.stats.accuracy >= 95 {
            colors.text_correct()
        } else if self.result.stats.accuracy >= 85 {
            colors.warning()
        } else {
            colors.text_incorrect()
        };
        let stats = self.result.stats;
        let lines = vec![
            Line::from(vec![
                Span::styled("  Speed:    ", label),
                Span::styled(format!("{} WPM", stats.wpm), value),
            ]),
            Line::from(vec![
                Span::styled("  Accuracy: ", label),
                Span::styled(format!("{}%", stats.accuracy), value.fg(acc_color)),
                Span::styled(
                    format!(
                        "  ({}/{} clean)",
                        self.result.correct_chars(),
                        self.result.total_chars
                    ),
                    Style::default().fg(colors.text_pending()),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Time:     ", label),
                Span::styled(stats.clock(), label),
            ]),
            Line::from(vec![
                Span::styled("  Errors:   ", label),
                Span::styled(self.result.errors.to_string(), label),
            ]),
        ];
        Paragraph::new(lines).render(layout[1], buf);

        if self.result.mode == Mode::Practice {
            let mut lines = vec![Line::from(Span::styled(
                "  Problem keys",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))];
            for entry in &self.result.problem_keys {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("    {:<6}", key_label(entry.key)),
                        Style::default().fg(colors.text_incorrect()),
                    ),
                    Span::styled(entry.count.to_string(), label),
                ]));
            }
            Paragraph::new(lines).render(layout[2], buf);
        }

        let help = if self.result.mode == Mode::Practice {
            "  [Enter] New set  [Tab] Mode  [Esc] Quit"
        } else {
            "  [Enter] Again  [Tab] Mode  [Esc] Quit"
        };
        Paragraph::new(Line::from(Span::styled(
            help,
            Style::default().fg(colors.text_pending()),
        )))
        .render(layout[3], buf);
    }
}
