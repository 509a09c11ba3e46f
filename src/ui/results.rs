use crate::app::state::AppState;
use crate::i18n::Text;
use crate::poll::OptionResult;
use crate::ui::layout::pad_to_width;
use crate::ui::theme::{to_color, Theme};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

const NAME_COLUMN: usize = 16;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let snapshot = state.poll.snapshot();

    let block = Block::default()
        .title(format!(" {} ", state.t(Text::ResultsTitle)))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(theme.border())
        .style(theme.base());

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let suffix = state.t(Text::VotesSuffix);
    let name_w = NAME_COLUMN.min(inner.width as usize / 3);
    // name + space + bar + " 100.0% (9999 votes)"
    let tail_w = 10 + 6 + unicode_width::UnicodeWidthStr::width(suffix);
    let bar_w = (inner.width as usize).saturating_sub(name_w + 1 + tail_w);

    let selected = state.poll.option_at(state.selected).map(|o| o.id);
    let mut lines: Vec<Line> = snapshot
        .options
        .iter()
        .map(|result| {
            let highlight = Some(result.id) == selected;
            result_line(result, highlight, name_w, bar_w, suffix, theme)
        })
        .collect();

    lines.push(Line::from(vec![
        Span::styled(format!("{}: ", state.t(Text::TotalVotes)), theme.muted()),
        Span::styled(
            format!("{} {}", snapshot.total_votes, suffix),
            theme.base().add_modifier(Modifier::BOLD),
        ),
    ]));

    frame.render_widget(Paragraph::new(lines).style(theme.base()), inner);
}

fn result_line<'a>(
    result: &OptionResult,
    highlight: bool,
    name_w: usize,
    bar_w: usize,
    suffix: &str,
    theme: &Theme,
) -> Line<'a> {
    let color = to_color(result.color);
    let filled = bar_cells(result.percentage, bar_w);
    let name_style = if highlight {
        theme.base().add_modifier(Modifier::BOLD)
    } else {
        theme.base()
    };

    Line::from(vec![
        Span::styled(pad_to_width(&result.name, name_w), name_style),
        Span::raw(" "),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(bar_w - filled), theme.muted()),
        Span::styled(
            format!(" {:>5.1}% ({} {})", result.percentage, result.votes, suffix),
            theme.base(),
        ),
    ])
}

/// Filled cells of a `width`-cell bar for a percentage in 0..=100.
fn bar_cells(percentage: f64, width: usize) -> usize {
    let cells = (percentage / 100.0 * width as f64).round() as usize;
    cells.min(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_cells_scale_and_clamp() {
        assert_eq!(bar_cells(0.0, 20), 0);
        assert_eq!(bar_cells(50.0, 20), 10);
        assert_eq!(bar_cells(61.9, 10), 6);
        assert_eq!(bar_cells(100.0, 7), 7);
        assert_eq!(bar_cells(100.0, 0), 0);
    }
}
