use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Below this height the progress bar is dropped to keep the text visible.
const PROGRESS_MIN_HEIGHT: u16 = 16;

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub stats: Rect,
    pub progress: Option<Rect>,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let show_progress = area.height >= PROGRESS_MIN_HEIGHT;
        let progress_height = if show_progress { 3 } else { 0 };

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(progress_height),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            stats: vertical[2],
            progress: show_progress.then_some(vertical[3]),
            footer: vertical[4],
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
        }
        has_hint = true;
    }

    if has_hint {
        out.push(current);
    }
    out
}

/// A popup of at least `min_w` x `min_h`, shrunk to fit `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, min_w: u16, min_h: u16, area: Rect) -> Rect {
    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(min_w).min(area.width);
    let target_h = requested_h.max(min_h).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}
