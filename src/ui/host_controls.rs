use crate::app::state::AppState;
use crate::i18n::Text;
use crate::poll::session::SessionPhase;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let session = state.poll.session();
    let pause_label = match session.phase() {
        SessionPhase::Paused => Text::ResumeButton,
        _ => Text::PauseButton,
    };

    let controls = [
        ("r", Text::ResetButton, true),
        ("p", pause_label, !session.is_finished()),
        ("e", Text::ExtendButton, true),
        ("s", Text::SettingsButton, true),
        ("q", Text::QuitButton, true),
    ];

    let mut spans: Vec<Span> = Vec::new();
    for (key, label, enabled) in controls {
        if !spans.is_empty() {
            spans.push(Span::styled("  ", theme.base()));
        }
        spans.push(Span::styled(format!(" {} ", key), theme.key_hint()));
        let style = if enabled {
            theme.button()
        } else {
            theme.button_disabled()
        };
        spans.push(Span::styled(format!(" {}", state.t(label)), style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans).centered()).style(theme.base()),
        area,
    );
}
