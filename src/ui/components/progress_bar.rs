use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::session::drill::TypingSession;
use crate::ui::theme::Theme;

/// How far through the text the cursor is, as `typed/total`.
pub struct ProgressBar<'a> {
    session: &'a TypingSession,
    theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(session: &'a TypingSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let ratio = self.session.progress().clamp(0.0, 1.0);

        let block = Block::bordered()
            .title(format!(
                " {}/{} ",
                self.session.current_index(),
                self.session.target().len()
            ))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (ratio * inner.width as f64) as u16;
        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label = format!("{:.0}%", ratio * 100.0);
        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}
