use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthStr;

pub struct AppLayout {
    pub header: Rect,
    pub timer: Rect,
    pub cards: Rect,
    pub results: Rect,
    pub controls: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect, option_count: usize) -> AppLayout {
    // Main vertical split: content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let content = main_chunks[0];
    let status_bar = main_chunks[1];

    // Results need one row per option plus the block border and total line
    let results_height = option_count as u16 + 3;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // Title + subtitle
            Constraint::Length(3),              // Timer
            Constraint::Min(5),                 // Vote cards
            Constraint::Length(results_height), // Results
            Constraint::Length(1),              // Host controls
        ])
        .split(content);

    AppLayout {
        header: chunks[0],
        timer: chunks[1],
        cards: chunks[2],
        results: chunks[3],
        controls: chunks[4],
        status_bar,
    }
}

/// Centered popup covering the given share of `area`, with minimum size.
pub fn centered_popup(area: Rect, percent_w: u16, percent_h: u16, min_w: u16, min_h: u16) -> Rect {
    let w = (area.width * percent_w / 100)
        .max(min_w)
        .min(area.width.saturating_sub(2));
    let h = (area.height * percent_h / 100)
        .max(min_h)
        .min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}

/// Cut `text` to at most `width` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Right-pad `text` with spaces to exactly `width` columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let cut = truncate_to_width(text, width);
    let fill = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(fill))
}
