mod header;
mod host_controls;
mod layout;
mod results;
mod settings_panel;
mod status_bar;
mod theme;
mod timer_display;
mod vote_cards;

use crate::app::state::AppState;
use ratatui::prelude::*;
use ratatui::widgets::Block;

pub fn render(frame: &mut Frame, state: &AppState) {
    let theme = theme::Theme::new(state.poll.theme());
    let area = frame.area();
    frame.render_widget(Block::default().style(theme.base()), area);

    let app_layout = layout::compute_layout(area, state.poll.options().len());

    header::render(frame, app_layout.header, state, &theme);
    timer_display::render(frame, app_layout.timer, state, &theme);
    vote_cards::render(frame, app_layout.cards, state, &theme);
    results::render(frame, app_layout.results, state, &theme);
    host_controls::render(frame, app_layout.controls, state, &theme);
    status_bar::render(frame, app_layout.status_bar, state, &theme);

    // Modal on top
    settings_panel::render(frame, state, &theme);
}
