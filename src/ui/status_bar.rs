use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let style = if state.status_message.is_some() {
        theme.status_error()
    } else {
        theme.status_bar()
    };

    let mut parts: Vec<Span> = vec![Span::styled(format!(" {} ", state.status_line()), style)];

    // Language code on the right
    let lang = format!(" [{}] ", state.language.code().to_uppercase());
    let used: usize = parts.iter().map(|s| s.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + lang.len());
    parts.push(Span::styled(" ".repeat(remaining), theme.status_bar()));
    parts.push(Span::styled(lang, theme.status_bar()));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
