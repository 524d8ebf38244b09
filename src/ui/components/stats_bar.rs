use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::stats::SessionStats;
use crate::ui::theme::Theme;

/// Time, WPM and accuracy for the round in progress.
pub struct StatsBar<'a> {
    stats: SessionStats,
    errors: usize,
    theme: &'a Theme,
}

impl<'a> StatsBar<'a> {
    pub fn new(stats: SessionStats, errors: usize, theme: &'a Theme) -> Self {
        Self {
            stats,
            errors,
            theme,
        }
    }
}

impl Widget for StatsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let label = Style::default().fg(colors.text_pending());
        let value = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);
        let error_value = if self.errors == 0 {
            value
        } else {
            value.fg(colors.text_incorrect())
        };

        let line = Line::from(vec![
            Span::styled("Time ", label),
            Span::styled(self.stats.clock(), value),
            Span::styled("   WPM ", label),
            Span::styled(self.stats.wpm.to_string(), value),
            Span::styled("   Accuracy ", label),
            Span::styled(format!("{}%", self.stats.accuracy), value),
            Span::styled("   Errors ", label),
            Span::styled(self.errors.to_string(), error_value),
        ]);

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        Paragraph::new(line)
            .block(block)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_all_numbers() {
        let theme = Theme::default();
        let stats = SessionStats::compute(75, 250, 5);
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        StatsBar::new(stats, 5, &theme).render(area, &mut buf);

        let text = row_text(&buf, 1);
        assert!(text.contains("Time 1:15"), "{text}");
        assert!(text.contains("WPM 40"), "{text}");
        assert!(text.contains("Accuracy 98%"), "{text}");
        assert!(text.contains("Errors 5"), "{text}");
    }
}
