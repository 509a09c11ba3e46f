use crate::app::action::Action;
use crate::app::event::{AppEvent, TickGeneration};
use crate::app::state::*;
use crate::i18n::Text;
use crate::logging::{RoundEnd, RoundRecord};
use crate::poll::color::Rgb;
use crate::poll::option::OptionPatch;
use crate::poll::session::SessionPhase;
use crate::poll::theme::{ThemePatch, ThemeSlot};
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info};

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    let before = state.poll.phase();

    let mut actions = match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::Tick { generation } => {
            handle_tick(state, generation);
            vec![]
        }
        AppEvent::Pulse => {
            handle_pulse(state);
            vec![]
        }
    };

    sync_countdown(state, before, &mut actions);
    actions
}

/// Arm or disarm the ticker when the session enters or leaves `Open`, and
/// record the round when the countdown runs out.
fn sync_countdown(state: &mut AppState, before: SessionPhase, actions: &mut Vec<Action>) {
    let after = state.poll.phase();
    let armed = actions
        .iter()
        .any(|a| matches!(a, Action::StartCountdown { .. }));

    if after == SessionPhase::Open && before != SessionPhase::Open && !armed {
        actions.push(Action::StartCountdown {
            generation: state.next_tick_generation(),
        });
    }
    if after != SessionPhase::Open && before == SessionPhase::Open {
        actions.push(Action::StopCountdown);
    }
    if after == SessionPhase::Expired && before != SessionPhase::Expired {
        actions.push(Action::RecordRound(RoundRecord::new(
            RoundEnd::Expired,
            state.poll.snapshot(),
        )));
    }
}

fn handle_tick(state: &mut AppState, generation: TickGeneration) {
    if generation != state.tick_generation {
        debug!(
            generation,
            current = state.tick_generation,
            "stale countdown tick dropped"
        );
        return;
    }
    if state.poll.tick() {
        state.dirty = true;
    }
}

fn handle_pulse(state: &mut AppState) {
    if state.poll.session().is_ending() {
        state.pulse_on = !state.pulse_on;
        state.dirty = true;
    } else if state.pulse_on {
        state.pulse_on = false;
        state.dirty = true;
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    // Settings panel captures all input when visible
    if state.settings.visible {
        return handle_settings_key(state, key);
    }

    state.status_message = None;

    match key.code {
        KeyCode::Char('q') => vec![Action::Quit],
        KeyCode::Char('s') => {
            state.settings.open();
            vec![]
        }
        KeyCode::Char('l') => {
            toggle_language(state);
            vec![]
        }
        KeyCode::Char('r') => reset(state),
        KeyCode::Char('e') => {
            state.poll.extend();
            vec![]
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.poll.toggle_pause();
            vec![]
        }
        KeyCode::Left | KeyCode::BackTab => {
            state.select_prev_card();
            vec![]
        }
        KeyCode::Right | KeyCode::Tab => {
            state.select_next_card();
            vec![]
        }
        KeyCode::Enter => {
            vote_at(state, state.selected);
            vec![]
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if index < state.poll.options().len() {
                state.selected = index;
                vote_at(state, index);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn vote_at(state: &mut AppState, index: usize) {
    if let Some(id) = state.poll.option_at(index).map(|o| o.id) {
        state.poll.cast_vote(id);
    }
}

fn reset(state: &mut AppState) -> Vec<Action> {
    let mut actions = Vec::new();
    // An expired round was already recorded when it ran out.
    if state.poll.phase() != SessionPhase::Expired && state.poll.total_votes() > 0 {
        actions.push(Action::RecordRound(RoundRecord::new(
            RoundEnd::Reset,
            state.poll.snapshot(),
        )));
    }
    state.poll.reset();
    // A fresh round always gets a full first second.
    actions.push(Action::StartCountdown {
        generation: state.next_tick_generation(),
    });
    actions
}

fn toggle_language(state: &mut AppState) {
    state.language = state.language.toggled();
    info!(language = %state.language, "display language switched");
}

fn handle_settings_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    if state.settings.editing.is_some() {
        handle_edit_key(state, key);
        return vec![];
    }

    state.status_message = None;

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('s') => {
            state.settings.close();
        }
        KeyCode::Tab | KeyCode::Right => {
            let next = state.settings.section.next();
            state.settings.switch_section(next);
        }
        KeyCode::BackTab | KeyCode::Left => {
            let prev = state.settings.section.prev();
            state.settings.switch_section(prev);
        }
        KeyCode::Up => {
            state.settings.selected = state.settings.selected.saturating_sub(1);
        }
        KeyCode::Down => {
            if state.settings.selected + 1 < state.settings_rows() {
                state.settings.selected += 1;
            }
        }
        KeyCode::Char('l') => toggle_language(state),
        KeyCode::Char('a') if state.settings.section == SettingsSection::Options => {
            let name = state.language.new_option_name(state.poll.options().len());
            state.poll.add_option(name);
            state.settings.selected = state.poll.options().len() - 1;
        }
        KeyCode::Char('d') | KeyCode::Delete
            if state.settings.section == SettingsSection::Options =>
        {
            delete_selected_option(state);
        }
        KeyCode::Char('c') if state.settings.section == SettingsSection::Options => {
            if let Some(option) = state.poll.option_at(state.settings.selected) {
                let (id, color) = (option.id, option.color);
                begin_edit(state, EditTarget::OptionColor(id), color.to_string());
            }
        }
        KeyCode::Enter | KeyCode::Char('n') => begin_edit_selected(state),
        _ => {}
    }
    vec![]
}

fn delete_selected_option(state: &mut AppState) {
    if !state.poll.can_delete() {
        state.set_status(Text::MinimumOptions);
        return;
    }
    if let Some(id) = state.poll.option_at(state.settings.selected).map(|o| o.id) {
        state.poll.delete_option(id);
        state.clamp_selection();
    }
}

fn begin_edit_selected(state: &mut AppState) {
    let row = state.settings.selected;
    match state.settings.section {
        SettingsSection::Options => {
            if let Some(option) = state.poll.option_at(row) {
                let (id, name) = (option.id, option.name.clone());
                begin_edit(state, EditTarget::OptionName(id), name);
            }
        }
        SettingsSection::Appearance => {
            if let Some(&slot) = ThemeSlot::ALL.get(row) {
                let current = state.poll.theme().get(slot).to_string();
                begin_edit(state, EditTarget::Theme(slot), current);
            }
        }
        SettingsSection::Timer => {
            let current = state.poll.session().duration().to_string();
            begin_edit(state, EditTarget::Duration, current);
        }
    }
}

fn begin_edit(state: &mut AppState, target: EditTarget, initial: String) {
    state.input.set(initial);
    state.settings.editing = Some(target);
}

fn handle_edit_key(state: &mut AppState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => {
            state.settings.editing = None;
            state.input.clear();
        }
        KeyCode::Enter => commit_edit(state),
        KeyCode::Char('w') if ctrl => state.input.delete_word_back(),
        KeyCode::Char('u') if ctrl => state.input.clear(),
        KeyCode::Backspace => state.input.delete_back(),
        KeyCode::Delete => state.input.delete_forward(),
        KeyCode::Left => state.input.move_left(),
        KeyCode::Right => state.input.move_right(),
        KeyCode::Home => state.input.move_home(),
        KeyCode::End => state.input.move_end(),
        KeyCode::Char(c) if !ctrl => state.input.insert_char(c),
        _ => {}
    }
}

fn commit_edit(state: &mut AppState) {
    let Some(target) = state.settings.editing.take() else {
        return;
    };
    let text = state.input.take_text();

    match target {
        EditTarget::OptionName(id) => {
            let name = text.trim();
            // A blank name keeps the old one
            if !name.is_empty() {
                state.poll.update_option(id, OptionPatch::name(name));
            }
        }
        EditTarget::OptionColor(id) => match text.parse::<Rgb>() {
            Ok(color) => {
                state.poll.update_option(id, OptionPatch::color(color));
            }
            Err(e) => {
                debug!("{}", e);
                state.set_status(Text::InvalidColor);
            }
        },
        EditTarget::Theme(slot) => match text.parse::<Rgb>() {
            Ok(color) => state.poll.update_theme(ThemePatch::slot(slot, color)),
            Err(e) => {
                debug!("{}", e);
                state.set_status(Text::InvalidColor);
            }
        },
        EditTarget::Duration => {
            let accepted = text
                .trim()
                .parse::<u32>()
                .map(|secs| state.poll.set_duration(secs))
                .unwrap_or(false);
            if !accepted {
                state.set_status(Text::InvalidDuration);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::i18n::Language;

    fn state() -> AppState {
        AppState::new(&AppConfig::default()).unwrap()
    }

    fn press(state: &mut AppState, code: KeyCode) -> Vec<Action> {
        let event = CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE));
        handle_event(state, AppEvent::Terminal(event))
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    fn clear_input(state: &mut AppState) {
        let event = CEvent::Key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        handle_event(state, AppEvent::Terminal(event));
    }

    fn tick(state: &mut AppState) -> Vec<Action> {
        let generation = state.tick_generation;
        handle_event(state, AppEvent::Tick { generation })
    }

    fn votes(state: &AppState) -> Vec<u32> {
        state.poll.options().iter().map(|o| o.votes).collect()
    }

    #[test]
    fn digit_keys_vote_while_open() {
        let mut s = state();
        press(&mut s, KeyCode::Char('1'));
        press(&mut s, KeyCode::Char('2'));
        press(&mut s, KeyCode::Char('2'));
        press(&mut s, KeyCode::Char('9'));
        assert_eq!(votes(&s), [13, 10]);
        assert_eq!(s.selected, 1);
    }

    #[test]
    fn enter_votes_for_selected_card() {
        let mut s = state();
        press(&mut s, KeyCode::Right);
        press(&mut s, KeyCode::Enter);
        assert_eq!(votes(&s), [12, 9]);
    }

    #[test]
    fn pause_disarms_and_resume_rearms() {
        let mut s = state();
        let actions = press(&mut s, KeyCode::Char('p'));
        assert!(matches!(actions.as_slice(), [Action::StopCountdown]));
        assert_eq!(s.poll.phase(), SessionPhase::Paused);

        press(&mut s, KeyCode::Char('1'));
        assert_eq!(votes(&s), [12, 8]);

        let old = s.tick_generation;
        let actions = press(&mut s, KeyCode::Char(' '));
        assert_eq!(s.poll.phase(), SessionPhase::Open);
        match actions.as_slice() {
            [Action::StartCountdown { generation }] => {
                assert_eq!(*generation, old + 1);
                assert_eq!(*generation, s.tick_generation);
            }
            other => panic!("unexpected actions: {other:?}"),
        }

        press(&mut s, KeyCode::Char('1'));
        assert_eq!(votes(&s), [13, 8]);
    }

    #[test]
    fn stale_ticks_are_ignored() {
        let mut s = state();
        let stale = s.tick_generation;
        press(&mut s, KeyCode::Char('p'));
        press(&mut s, KeyCode::Char('p'));
        handle_event(&mut s, AppEvent::Tick { generation: stale });
        assert_eq!(s.poll.session().timer(), 30);
        tick(&mut s);
        assert_eq!(s.poll.session().timer(), 29);
    }

    #[test]
    fn expiry_stops_countdown_and_records_round() {
        let mut s = state();
        for _ in 0..29 {
            assert!(tick(&mut s).is_empty());
        }
        let actions = tick(&mut s);
        assert_eq!(s.poll.phase(), SessionPhase::Expired);
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], Action::StopCountdown));
        match &actions[1] {
            Action::RecordRound(record) => {
                assert_eq!(record.reason, RoundEnd::Expired);
                assert_eq!(record.snapshot.total_votes, 20);
            }
            other => panic!("unexpected action: {other:?}"),
        }

        press(&mut s, KeyCode::Char('1'));
        assert_eq!(votes(&s), [12, 8]);
    }

    #[test]
    fn extend_after_expiry_rearms() {
        let mut s = state();
        for _ in 0..30 {
            tick(&mut s);
        }
        let actions = press(&mut s, KeyCode::Char('e'));
        assert!(matches!(actions.as_slice(), [Action::StartCountdown { .. }]));
        assert_eq!(s.poll.session().timer(), 10);
        assert!(s.poll.session().is_open());
    }

    #[test]
    fn extend_while_paused_keeps_ticker_off() {
        let mut s = state();
        press(&mut s, KeyCode::Char('p'));
        let actions = press(&mut s, KeyCode::Char('e'));
        assert!(actions.is_empty());
        assert_eq!(s.poll.phase(), SessionPhase::Paused);
        assert_eq!(s.poll.session().timer(), 40);
    }

    #[test]
    fn reset_records_live_round_and_rearms() {
        let mut s = state();
        tick(&mut s);
        let actions = press(&mut s, KeyCode::Char('r'));
        assert_eq!(votes(&s), [0, 0]);
        assert_eq!(s.poll.session().timer(), 30);
        assert_eq!(actions.len(), 2);
        assert!(matches!(
            &actions[0],
            Action::RecordRound(r) if r.reason == RoundEnd::Reset
        ));
        assert!(matches!(actions[1], Action::StartCountdown { .. }));
    }

    #[test]
    fn reset_after_expiry_does_not_record_twice() {
        let mut s = state();
        for _ in 0..30 {
            tick(&mut s);
        }
        let actions = press(&mut s, KeyCode::Char('r'));
        assert!(matches!(actions.as_slice(), [Action::StartCountdown { .. }]));
    }

    #[test]
    fn pulse_flashes_only_near_the_end() {
        let mut s = state();
        handle_event(&mut s, AppEvent::Pulse);
        assert!(!s.pulse_on);
        for _ in 0..25 {
            tick(&mut s);
        }
        handle_event(&mut s, AppEvent::Pulse);
        assert!(s.pulse_on);
        press(&mut s, KeyCode::Char('p'));
        handle_event(&mut s, AppEvent::Pulse);
        assert!(!s.pulse_on);
    }

    #[test]
    fn settings_add_and_delete_options() {
        let mut s = state();
        press(&mut s, KeyCode::Char('s'));
        assert!(s.settings.visible);

        press(&mut s, KeyCode::Char('d'));
        assert_eq!(s.poll.options().len(), 2);
        assert_eq!(
            s.status_message.as_deref(),
            Some("A poll needs at least two options")
        );

        press(&mut s, KeyCode::Char('a'));
        assert_eq!(s.poll.options().len(), 3);
        assert_eq!(s.poll.options()[2].name, "Option 3");
        assert_eq!(s.settings.selected, 2);

        press(&mut s, KeyCode::Delete);
        assert_eq!(s.poll.options().len(), 2);
        assert_eq!(s.settings.selected, 1);

        press(&mut s, KeyCode::Esc);
        assert!(!s.settings.visible);
    }

    #[test]
    fn settings_keys_do_not_vote() {
        let mut s = state();
        press(&mut s, KeyCode::Char('s'));
        press(&mut s, KeyCode::Char('1'));
        press(&mut s, KeyCode::Char('r'));
        assert_eq!(votes(&s), [12, 8]);
    }

    #[test]
    fn rename_option() {
        let mut s = state();
        press(&mut s, KeyCode::Char('s'));
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.input.text, "Option B");
        clear_input(&mut s);
        type_text(&mut s, "Tea");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.poll.options()[1].name, "Tea");
        assert_eq!(s.poll.options()[1].votes, 8);
        assert!(s.settings.editing.is_none());
    }

    #[test]
    fn escape_cancels_edit() {
        let mut s = state();
        press(&mut s, KeyCode::Char('s'));
        press(&mut s, KeyCode::Enter);
        type_text(&mut s, "xyz");
        press(&mut s, KeyCode::Esc);
        assert_eq!(s.poll.options()[0].name, "Option A");
        assert!(s.settings.visible);
    }

    #[test]
    fn option_color_edit_validates() {
        let mut s = state();
        press(&mut s, KeyCode::Char('s'));
        press(&mut s, KeyCode::Char('c'));
        assert_eq!(s.input.text, "#5F7161");
        for _ in 0..7 {
            press(&mut s, KeyCode::Backspace);
        }
        type_text(&mut s, "#123");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.poll.options()[0].color, Rgb(0x11, 0x22, 0x33));

        press(&mut s, KeyCode::Char('c'));
        type_text(&mut s, "zz");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.poll.options()[0].color, Rgb(0x11, 0x22, 0x33));
        assert_eq!(s.status_message.as_deref(), Some("Invalid color, use #RRGGBB"));
    }

    #[test]
    fn theme_edit_merges_one_color() {
        let mut s = state();
        let before = s.poll.theme();
        press(&mut s, KeyCode::Char('s'));
        press(&mut s, KeyCode::Tab);
        assert_eq!(s.settings.section, SettingsSection::Appearance);
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.settings.editing, Some(EditTarget::Theme(ThemeSlot::Primary)));
        clear_input(&mut s);
        type_text(&mut s, "#000000");
        press(&mut s, KeyCode::Enter);
        let after = s.poll.theme();
        assert_eq!(after.primary, Rgb(0, 0, 0));
        assert_eq!(after.background, before.background);
        assert_eq!(after.accent, before.accent);
    }

    #[test]
    fn duration_edit_applies_on_next_reset() {
        let mut s = state();
        press(&mut s, KeyCode::Char('s'));
        press(&mut s, KeyCode::BackTab);
        assert_eq!(s.settings.section, SettingsSection::Timer);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.input.text, "30");
        press(&mut s, KeyCode::Backspace);
        press(&mut s, KeyCode::Backspace);
        type_text(&mut s, "60");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.poll.session().timer(), 30);
        press(&mut s, KeyCode::Esc);
        press(&mut s, KeyCode::Char('r'));
        assert_eq!(s.poll.session().timer(), 60);
    }

    #[test]
    fn zero_duration_is_refused() {
        let mut s = state();
        press(&mut s, KeyCode::Char('s'));
        press(&mut s, KeyCode::BackTab);
        press(&mut s, KeyCode::Enter);
        press(&mut s, KeyCode::Backspace);
        press(&mut s, KeyCode::Backspace);
        type_text(&mut s, "0");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.poll.session().duration(), 30);
        assert!(s.status_message.is_some());
    }

    #[test]
    fn language_switch_changes_new_option_name() {
        let mut s = state();
        press(&mut s, KeyCode::Char('l'));
        assert_eq!(s.language, Language::Chinese);
        press(&mut s, KeyCode::Char('s'));
        press(&mut s, KeyCode::Char('a'));
        assert_eq!(s.poll.options()[2].name, "选项 3");
        assert_eq!(votes(&s), [12, 8, 0]);
    }

    #[test]
    fn quit_keys() {
        let mut s = state();
        assert!(matches!(press(&mut s, KeyCode::Char('q')).as_slice(), [Action::Quit]));
        let ctrl_c = CEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let actions = handle_event(&mut s, AppEvent::Terminal(ctrl_c));
        assert!(matches!(actions.as_slice(), [Action::Quit]));
    }
}
