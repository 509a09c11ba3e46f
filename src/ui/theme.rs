use crate::poll::color::Rgb;
use crate::poll::theme::ThemeColors;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Dark or light text, whichever reads better on `background`.
pub fn contrast_text(background: Rgb) -> Color {
    if background.luma() > 140 {
        Color::Rgb(0x1E, 0x1E, 0x24)
    } else {
        Color::Rgb(0xF8, 0xF8, 0xF2)
    }
}

/// Styles for one frame, derived from the host's theme colors.
pub struct Theme {
    colors: ThemeColors,
}

impl Theme {
    pub fn new(colors: ThemeColors) -> Self {
        Self { colors }
    }

    pub fn background(&self) -> Color {
        to_color(self.colors.background)
    }

    pub fn base(&self) -> Style {
        Style::default()
            .fg(to_color(self.colors.text))
            .bg(self.background())
    }

    pub fn title(&self) -> Style {
        self.base()
            .fg(to_color(self.colors.accent))
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        self.base().add_modifier(Modifier::DIM)
    }

    pub fn border(&self) -> Style {
        self.base().fg(to_color(self.colors.primary))
    }

    pub fn border_type() -> BorderType {
        BorderType::Rounded
    }

    pub fn border_type_focused() -> BorderType {
        BorderType::Thick
    }

    /// Key hint in front of a control label, e.g. the `r` in `[r] Reset`.
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(contrast_text(self.colors.primary))
            .bg(to_color(self.colors.primary))
            .add_modifier(Modifier::BOLD)
    }

    pub fn button(&self) -> Style {
        self.base().fg(to_color(self.colors.text))
    }

    pub fn button_disabled(&self) -> Style {
        self.muted().add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn timer(&self, ending: bool, pulse_on: bool) -> Style {
        let accent = self.colors.accent;
        match (ending, pulse_on) {
            (true, true) => Style::default()
                .fg(contrast_text(accent))
                .bg(to_color(accent))
                .add_modifier(Modifier::BOLD),
            (true, false) => self.base().fg(to_color(accent)).add_modifier(Modifier::BOLD),
            _ => self.base().add_modifier(Modifier::BOLD),
        }
    }

    /// Row highlight inside lists (settings rows).
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(contrast_text(self.colors.accent))
            .bg(to_color(self.colors.accent))
            .add_modifier(Modifier::BOLD)
    }

    pub fn input_text(&self) -> Style {
        self.base().add_modifier(Modifier::UNDERLINED)
    }

    pub fn status_bar(&self) -> Style {
        Style::default()
            .fg(contrast_text(self.colors.primary))
            .bg(to_color(self.colors.primary))
    }

    pub fn status_error(&self) -> Style {
        Style::default()
            .fg(contrast_text(self.colors.accent))
            .bg(to_color(self.colors.accent))
            .add_modifier(Modifier::BOLD)
    }
}
