use crate::app::event::TickGeneration;
use crate::config::AppConfig;
use crate::i18n::{Language, Text};
use crate::poll::option::OptionId;
use crate::poll::theme::ThemeSlot;
use crate::poll::{Poll, PollError};

#[derive(Debug)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    /// Replace the contents and put the cursor at the end.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn take_text(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut pos = self.cursor;
        // Skip trailing whitespace
        while pos > 0 && self.text.as_bytes().get(pos - 1) == Some(&b' ') {
            pos -= 1;
        }
        // Skip word characters, stepping whole UTF-8 sequences
        while pos > 0 && self.text.as_bytes().get(pos - 1) != Some(&b' ') {
            pos -= 1;
            while !self.text.is_char_boundary(pos) {
                pos -= 1;
            }
        }
        self.text.drain(pos..self.cursor);
        self.cursor = pos;
    }

    /// Cursor position in terminal columns rather than bytes.
    pub fn cursor_width(&self) -> usize {
        unicode_width::UnicodeWidthStr::width(&self.text[..self.cursor])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSection {
    Options,
    Appearance,
    Timer,
}

impl SettingsSection {
    pub fn next(self) -> Self {
        match self {
            SettingsSection::Options => SettingsSection::Appearance,
            SettingsSection::Appearance => SettingsSection::Timer,
            SettingsSection::Timer => SettingsSection::Options,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SettingsSection::Options => SettingsSection::Timer,
            SettingsSection::Appearance => SettingsSection::Options,
            SettingsSection::Timer => SettingsSection::Appearance,
        }
    }

    pub fn title(self) -> Text {
        match self {
            SettingsSection::Options => Text::VoteOptionsTitle,
            SettingsSection::Appearance => Text::AppearanceTitle,
            SettingsSection::Timer => Text::TimerTitle,
        }
    }
}

/// What the settings input line is currently editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    OptionName(OptionId),
    OptionColor(OptionId),
    Theme(ThemeSlot),
    Duration,
}

impl EditTarget {
    pub fn label(self) -> Text {
        match self {
            EditTarget::OptionName(_) => Text::OptionNameLabel,
            EditTarget::OptionColor(_) => Text::OptionColorLabel,
            EditTarget::Theme(slot) => theme_slot_label(slot),
            EditTarget::Duration => Text::TimerDurationLabel,
        }
    }
}

pub fn theme_slot_label(slot: ThemeSlot) -> Text {
    match slot {
        ThemeSlot::Background => Text::BackgroundColor,
        ThemeSlot::Text => Text::TextColor,
        ThemeSlot::Primary => Text::PrimaryButtonColor,
        ThemeSlot::Accent => Text::AccentColor,
    }
}

#[derive(Debug)]
pub struct SettingsPanel {
    pub visible: bool,
    pub section: SettingsSection,
    pub selected: usize,
    pub editing: Option<EditTarget>,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self {
            visible: false,
            section: SettingsSection::Options,
            selected: 0,
            editing: None,
        }
    }

    pub fn open(&mut self) {
        self.visible = true;
        self.section = SettingsSection::Options;
        self.selected = 0;
        self.editing = None;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.editing = None;
    }

    pub fn switch_section(&mut self, section: SettingsSection) {
        self.section = section;
        self.selected = 0;
    }
}

pub struct AppState {
    pub poll: Poll,
    pub language: Language,
    /// Vote card under the cursor
    pub selected: usize,
    pub settings: SettingsPanel,
    pub input: InputState,
    /// Generation of the currently armed countdown ticker
    pub tick_generation: TickGeneration,
    /// Alternates on every pulse; drives the flashing timer
    pub pulse_on: bool,
    pub should_quit: bool,
    pub dirty: bool,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, PollError> {
        let poll = config.build_poll()?;
        let language = config.ui.language;
        Ok(Self {
            poll,
            language,
            selected: 0,
            settings: SettingsPanel::new(),
            input: InputState::new(),
            tick_generation: 0,
            pulse_on: false,
            should_quit: false,
            dirty: true,
            status_message: None,
        })
    }

    pub fn t(&self, key: Text) -> &'static str {
        self.language.text(key)
    }

    /// Bump the ticker generation; ticks from older armings are then stale.
    pub fn next_tick_generation(&mut self) -> TickGeneration {
        self.tick_generation += 1;
        self.tick_generation
    }

    pub fn set_status(&mut self, key: Text) {
        self.status_message = Some(self.t(key).to_string());
        self.dirty = true;
    }

    /// Keep both selections inside the current option list.
    pub fn clamp_selection(&mut self) {
        let last = self.poll.options().len().saturating_sub(1);
        self.selected = self.selected.min(last);
        if self.settings.section == SettingsSection::Options {
            self.settings.selected = self.settings.selected.min(last);
        }
    }

    pub fn select_next_card(&mut self) {
        let count = self.poll.options().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_prev_card(&mut self) {
        let count = self.poll.options().len();
        if count > 0 {
            self.selected = if self.selected == 0 {
                count - 1
            } else {
                self.selected - 1
            };
        }
    }

    /// Rows in the visible settings section.
    pub fn settings_rows(&self) -> usize {
        match self.settings.section {
            SettingsSection::Options => self.poll.options().len(),
            SettingsSection::Appearance => ThemeSlot::ALL.len(),
            SettingsSection::Timer => 1,
        }
    }

    pub fn phase_text(&self) -> Text {
        use crate::poll::session::SessionPhase;
        match self.poll.phase() {
            SessionPhase::Open => Text::VotingOpen,
            SessionPhase::Paused => Text::VotingPaused,
            SessionPhase::Expired => Text::TimeUp,
        }
    }

    pub fn status_line(&self) -> String {
        if let Some(ref msg) = self.status_message {
            return msg.clone();
        }
        format!(
            "{} | {}: {} {}",
            self.t(self.phase_text()),
            self.t(Text::TotalVotes),
            self.poll.total_votes(),
            self.t(Text::VotesSuffix)
        )
    }
}
