use crate::app::state::*;
use crate::i18n::Text;
use crate::poll::theme::ThemeSlot;
use crate::ui::layout::{centered_popup, pad_to_width};
use crate::ui::theme::{to_color, Theme};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs};
use unicode_width::UnicodeWidthStr;

const SECTIONS: [SettingsSection; 3] = [
    SettingsSection::Options,
    SettingsSection::Appearance,
    SettingsSection::Timer,
];

pub fn render(frame: &mut Frame, state: &AppState, theme: &Theme) {
    if !state.settings.visible {
        return;
    }

    let popup_area = centered_popup(frame.area(), 70, 80, 56, 16);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", state.t(Text::SettingsTitle)))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type_focused())
        .border_style(theme.border())
        .style(theme.base());

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    if inner.height < 6 || inner.width < 20 {
        return;
    }

    // Section tabs
    let titles: Vec<Line> = SECTIONS
        .iter()
        .map(|s| Line::from(format!(" {} ", state.t(s.title()))))
        .collect();
    let selected_tab = SECTIONS
        .iter()
        .position(|s| *s == state.settings.section)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected_tab)
        .style(theme.muted())
        .highlight_style(theme.selected())
        .divider("│");
    frame.render_widget(tabs, Rect::new(inner.x, inner.y, inner.width, 1));

    let sep = Paragraph::new(Line::from(Span::styled(
        "─".repeat(inner.width as usize),
        theme.border(),
    )));
    frame.render_widget(sep, Rect::new(inner.x, inner.y + 1, inner.width, 1));

    // Rows, leaving room for the edit line and help line
    let rows_h = inner.height.saturating_sub(5);
    let rows_area = Rect::new(inner.x, inner.y + 2, inner.width, rows_h);
    let (lines, header_rows) = match state.settings.section {
        SettingsSection::Options => (option_rows(state, theme, inner.width as usize), 1),
        SettingsSection::Appearance => (appearance_rows(state, theme), 0),
        SettingsSection::Timer => (timer_rows(state, theme), 0),
    };
    // Keep the selected row on screen
    let skip = (state.settings.selected + header_rows + 1).saturating_sub(rows_h as usize);
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();
    frame.render_widget(Paragraph::new(visible), rows_area);

    let edit_area = Rect::new(inner.x, inner.y + inner.height - 2, inner.width, 1);
    render_edit_line(frame, edit_area, state, theme);

    let help_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    frame.render_widget(Paragraph::new(help_line(state, theme)), help_area);
}

fn row_style(state: &AppState, theme: &Theme, row: usize) -> Style {
    if row == state.settings.selected {
        theme.selected()
    } else {
        theme.base()
    }
}

fn swatch(color: crate::poll::color::Rgb) -> Span<'static> {
    Span::styled("██", Style::default().fg(to_color(color)))
}

fn option_rows<'a>(state: &AppState, theme: &Theme, width: usize) -> Vec<Line<'a>> {
    let name_w = width.saturating_sub(24).clamp(8, 32);
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "     {}  {}",
            pad_to_width(state.t(Text::OptionNameLabel), name_w),
            state.t(Text::OptionColorLabel)
        ),
        theme.muted(),
    ))];

    for (i, option) in state.poll.options().iter().enumerate() {
        let style = row_style(state, theme, i);
        lines.push(Line::from(vec![
            Span::styled(format!(" {:>2} ", i + 1), style),
            swatch(option.color),
            Span::styled(format!(" {}", pad_to_width(&option.name, name_w)), style),
            Span::styled(format!(" {} ", option.color), style),
            Span::styled(
                format!(" {} {}", option.votes, state.t(Text::VotesSuffix)),
                theme.muted(),
            ),
        ]));
    }
    lines
}

fn appearance_rows<'a>(state: &AppState, theme: &Theme) -> Vec<Line<'a>> {
    let colors = state.poll.theme();
    let label_w = ThemeSlot::ALL
        .iter()
        .map(|&slot| state.t(theme_slot_label(slot)).width())
        .max()
        .unwrap_or(0);

    ThemeSlot::ALL
        .iter()
        .enumerate()
        .map(|(i, &slot)| {
            let style = row_style(state, theme, i);
            let color = colors.get(slot);
            Line::from(vec![
                Span::styled(
                    format!(" {} ", pad_to_width(state.t(theme_slot_label(slot)), label_w)),
                    style,
                ),
                swatch(color),
                Span::styled(format!(" {}", color), theme.base()),
            ])
        })
        .collect()
}

fn timer_rows<'a>(state: &AppState, theme: &Theme) -> Vec<Line<'a>> {
    let session = state.poll.session();
    vec![Line::from(vec![
        Span::styled(
            format!(" {}: ", state.t(Text::TimerDurationLabel)),
            row_style(state, theme, 0),
        ),
        Span::styled(format!("{}s", session.duration()), theme.base()),
    ])]
}

fn render_edit_line(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(target) = state.settings.editing else {
        return;
    };

    let prompt = format!(" {}: ", state.t(target.label()));
    let line = Line::from(vec![
        Span::styled(prompt.clone(), theme.title()),
        Span::styled(state.input.text.as_str(), theme.input_text()),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let cursor_x = area.x + (prompt.width() + state.input.cursor_width()) as u16;
    frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(1)), area.y));
}

fn help_line<'a>(state: &AppState, theme: &Theme) -> Line<'a> {
    let mut keys: Vec<(&str, Text, bool)> = Vec::new();
    if state.settings.editing.is_none() {
        match state.settings.section {
            SettingsSection::Options => {
                keys.push(("a", Text::AddOptionButton, true));
                keys.push(("d", Text::DeleteOptionButton, state.poll.can_delete()));
                keys.push(("Enter", Text::EditNameButton, true));
                keys.push(("c", Text::EditColorButton, true));
            }
            SettingsSection::Appearance => keys.push(("Enter", Text::EditColorButton, true)),
            SettingsSection::Timer => keys.push(("Enter", Text::TimerTitle, true)),
        }
    }
    keys.push(("Esc", Text::CloseButton, true));

    let mut spans = vec![Span::styled(" ←→ ", theme.key_hint())];
    for (key, label, enabled) in keys {
        let style = if enabled {
            theme.button()
        } else {
            theme.button_disabled()
        };
        spans.push(Span::styled("  ", theme.base()));
        spans.push(Span::styled(format!(" {} ", key), theme.key_hint()));
        spans.push(Span::styled(format!(" {}", state.t(label)), style));
    }
    Line::from(spans)
}
