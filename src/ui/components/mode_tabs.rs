use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::mode::Mode;
use crate::ui::theme::Theme;

/// Header row: app name, one tab per mode, and the caps-lock warning.
pub struct ModeTabs<'a> {
    current: Mode,
    caps_lock: bool,
    theme: &'a Theme,
}

impl<'a> ModeTabs<'a> {
    pub fn new(current: Mode, caps_lock: bool, theme: &'a Theme) -> Self {
        Self {
            current,
            caps_lock,
            theme,
        }
    }
}

impl Widget for ModeTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let bar = Style::default().bg(colors.bg_light());

        let mut spans = vec![Span::styled(
            " cotype ",
            bar.fg(colors.accent()).add_modifier(Modifier::BOLD),
        )];
        for mode in Mode::ALL {
            let style = if mode == self.current {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                bar.fg(colors.fg())
            };
            spans.push(Span::styled(" ", bar));
            spans.push(Span::styled(format!(" {} ", mode.label()), style));
        }
        if self.caps_lock {
            spans.push(Span::styled(
                "  CAPS LOCK ",
                bar.fg(colors.warning()).add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).style(bar).render(area, buf);
    }
}
