use crate::app::state::AppState;
use crate::i18n::Text;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    if area.height == 0 {
        return;
    }

    let title = Line::from(Span::styled(state.t(Text::Title), theme.title())).centered();
    let subtitle = Line::from(Span::styled(state.t(Text::Subtitle), theme.muted())).centered();
    frame.render_widget(
        Paragraph::new(vec![Line::default(), title, subtitle]).style(theme.base()),
        area,
    );

    // Language switch in the top right corner
    let switch = Line::from(vec![
        Span::styled(" l ", theme.key_hint()),
        Span::styled(format!(" {} ", state.language.switch_label()), theme.button()),
    ]);
    let width = switch.width() as u16;
    if area.width > width {
        let corner = Rect::new(area.right() - width - 1, area.y, width, 1);
        frame.render_widget(Paragraph::new(switch), corner);
    }
}
