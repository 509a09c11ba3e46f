use crate::app::state::AppState;
use crate::poll::session::SessionPhase;
use crate::ui::theme::{to_color, Theme};
use ratatui::prelude::*;
use ratatui::widgets::{LineGauge, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    if area.height < 2 {
        return;
    }
    let session = state.poll.session();
    let ending = session.is_ending();

    let mut spans = vec![Span::styled(
        format!(" {:02}s ", session.timer()),
        theme.timer(ending, state.pulse_on),
    )];
    spans.push(Span::styled("  ", theme.base()));
    let phase_style = match session.phase() {
        SessionPhase::Open => theme.base(),
        SessionPhase::Paused | SessionPhase::Expired => theme.title(),
    };
    spans.push(Span::styled(state.t(state.phase_text()), phase_style));

    let timer_area = Rect::new(area.x, area.y, area.width, 1);
    frame.render_widget(Paragraph::new(Line::from(spans).centered()), timer_area);

    // An extend can push the timer past the configured duration
    let ratio = if session.duration() == 0 {
        0.0
    } else {
        (session.timer() as f64 / session.duration() as f64).min(1.0)
    };
    let gauge_w = (area.width / 2).max(10).min(area.width);
    let gauge_area = Rect::new(
        area.x + (area.width - gauge_w) / 2,
        area.y + 1,
        gauge_w,
        1,
    );
    let filled = if ending {
        to_color(state.poll.theme().accent)
    } else {
        to_color(state.poll.theme().primary)
    };
    let gauge = LineGauge::default()
        .ratio(ratio)
        .label("")
        .filled_style(Style::default().fg(filled))
        .unfilled_style(theme.muted())
        .line_set(symbols::line::THICK);
    frame.render_widget(gauge, gauge_area);
}
