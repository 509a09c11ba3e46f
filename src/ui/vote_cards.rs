use crate::app::state::AppState;
use crate::i18n::Text;
use crate::ui::layout::truncate_to_width;
use crate::ui::theme::{contrast_text, to_color, Theme};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Only the first nine cards get a number key.
const NUMBERED_CARDS: usize = 9;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let options = state.poll.options();
    if options.is_empty() || area.height < 3 {
        return;
    }

    let count = options.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .horizontal_margin(1)
        .spacing(1)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area);

    let voting = state.poll.session().is_open();

    for (i, (option, &cell)) in options.iter().zip(columns.iter()).enumerate() {
        let selected = i == state.selected;
        let color = to_color(option.color);

        let key_label = if i < NUMBERED_CARDS {
            format!(" {} ", i + 1)
        } else {
            String::new()
        };

        let border_type = if selected {
            Theme::border_type_focused()
        } else {
            Theme::border_type()
        };
        let border_style = Style::default().fg(color).bg(theme.background());

        let block = Block::default()
            .title(Span::styled(
                key_label,
                Style::default()
                    .fg(contrast_text(option.color))
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style)
            .style(theme.base());

        let inner = block.inner(cell);
        frame.render_widget(block, cell);
        if inner.height == 0 || inner.width == 0 {
            continue;
        }

        let name_style = if voting {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };
        let name = truncate_to_width(&option.name, inner.width as usize);
        let votes = format!("{} {}", option.votes, state.t(Text::VotesSuffix));

        // Vertically center the two lines
        let top_pad = inner.height.saturating_sub(2) / 2;
        let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::default()).collect();
        lines.push(Line::from(Span::styled(name, name_style)).centered());
        lines.push(Line::from(Span::styled(votes, theme.base())).centered());

        frame.render_widget(Paragraph::new(lines).style(theme.base()), inner);
    }
}
