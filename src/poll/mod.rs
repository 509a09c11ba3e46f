//! Poll core: options, countdown session, tally and theme.
//!
//! [`Poll`] is the single owner of all poll state. Every host or audience
//! intent is a method on it. Intents that are not allowed in the current
//! state are ignored and report `false`; nothing here returns an error once
//! the poll exists.

pub mod color;
pub mod option;
pub mod session;
pub mod tally;
pub mod theme;

use color::Rgb;
use option::{NewOption, OptionId, OptionPatch, OptionRegistry, VoteOption};
use serde::Serialize;
use session::{Session, SessionEvent, SessionPhase};
use theme::{ThemeColors, ThemePatch};
use thiserror::Error;
use tracing::{debug, info};

/// Countdown length used when nothing else is configured.
pub const DEFAULT_TIMER_DURATION: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    #[error("a poll needs at least {min} options, got {got}")]
    TooFewOptions { min: usize, got: usize },
    #[error("timer duration must be at least one second")]
    ZeroDuration,
}

/// The two options every fresh poll starts with.
pub fn default_seed() -> Vec<NewOption> {
    vec![
        NewOption {
            name: "Option A".to_string(),
            votes: 12,
            color: Rgb::from_hex(0x5F7161),
        },
        NewOption {
            name: "Option B".to_string(),
            votes: 8,
            color: Rgb::from_hex(0x4C516D),
        },
    ]
}

#[derive(Debug, Clone)]
pub struct Poll {
    registry: OptionRegistry,
    session: Session,
    theme: ThemeColors,
}

impl Poll {
    pub fn new(seed: Vec<NewOption>, duration: u32, theme: ThemeColors) -> Result<Self, PollError> {
        if duration == 0 {
            return Err(PollError::ZeroDuration);
        }
        Ok(Self {
            registry: OptionRegistry::new(seed)?,
            session: Session::new(duration),
            theme,
        })
    }

    pub fn options(&self) -> &[VoteOption] {
        self.registry.options()
    }

    pub fn option_at(&self, index: usize) -> Option<&VoteOption> {
        self.registry.options().get(index)
    }

    pub fn can_delete(&self) -> bool {
        self.registry.can_delete()
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn theme(&self) -> ThemeColors {
        self.theme
    }

    pub fn total_votes(&self) -> u64 {
        tally::total_votes(self.registry.options())
    }

    pub fn cast_vote(&mut self, id: OptionId) -> bool {
        if !self.session.is_open() {
            debug!(%id, phase = %self.session.phase(), "vote ignored: voting closed");
            return false;
        }
        if !self.registry.record_vote(id) {
            debug!(%id, "vote ignored: unknown option");
            return false;
        }
        if let Some(option) = self.registry.get(id) {
            debug!(%id, votes = option.votes, "vote counted");
        }
        true
    }

    /// One second of countdown. Returns true when the timer moved.
    pub fn tick(&mut self) -> bool {
        self.apply(SessionEvent::Tick)
    }

    pub fn reset(&mut self) {
        self.registry.clear_votes();
        self.apply(SessionEvent::Reset);
    }

    pub fn extend(&mut self) {
        self.apply(SessionEvent::Extend);
    }

    pub fn toggle_pause(&mut self) -> bool {
        let changed = self.apply(SessionEvent::TogglePause);
        if !changed {
            debug!("pause toggle ignored: timer finished");
        }
        changed
    }

    /// Change the countdown length used by the next reset.
    pub fn set_duration(&mut self, secs: u32) -> bool {
        if secs == 0 {
            return false;
        }
        self.session = self.session.with_duration(secs);
        info!(secs, "timer duration changed");
        true
    }

    pub fn add_option(&mut self, name: String) -> OptionId {
        let id = self.registry.add(name);
        info!(%id, count = self.registry.len(), "option added");
        id
    }

    pub fn update_option(&mut self, id: OptionId, patch: OptionPatch) -> bool {
        let updated = self.registry.update(id, patch);
        if !updated {
            debug!(%id, "update ignored: unknown option");
        }
        updated
    }

    pub fn delete_option(&mut self, id: OptionId) -> bool {
        let deleted = self.registry.delete(id);
        if deleted {
            info!(%id, count = self.registry.len(), "option deleted");
        } else {
            debug!(%id, count = self.registry.len(), "delete ignored");
        }
        deleted
    }

    pub fn update_theme(&mut self, patch: ThemePatch) {
        self.theme = self.theme.merge(patch);
    }

    pub fn snapshot(&self) -> PollSnapshot {
        let options = self.registry.options();
        let total = tally::total_votes(options);
        PollSnapshot {
            options: options
                .iter()
                .zip(tally::percentages(options))
                .map(|(o, percentage)| OptionResult {
                    id: o.id,
                    name: o.name.clone(),
                    votes: o.votes,
                    color: o.color,
                    percentage,
                })
                .collect(),
            total_votes: total,
            timer: self.session.timer(),
            duration: self.session.duration(),
            phase: self.session.phase(),
        }
    }

    fn apply(&mut self, event: SessionEvent) -> bool {
        let before = self.session;
        self.session = before.transition(event);
        if before.phase() != self.session.phase() {
            info!(?event, from = %before.phase(), to = %self.session.phase(), "session transition");
        }
        before != self.session
    }
}

impl Default for Poll {
    fn default() -> Self {
        Self {
            registry: OptionRegistry::new(default_seed())
                .unwrap_or_else(|_| unreachable!("default seed has two options")),
            session: Session::new(DEFAULT_TIMER_DURATION),
            theme: ThemeColors::default(),
        }
    }
}

/// Everything the display needs, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollSnapshot {
    pub options: Vec<OptionResult>,
    pub total_votes: u64,
    pub timer: u32,
    pub duration: u32,
    pub phase: SessionPhase,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionResult {
    #[serde(skip)]
    pub id: OptionId,
    pub name: String,
    pub votes: u32,
    pub color: Rgb,
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll() -> Poll {
        Poll::new(default_seed(), 30, ThemeColors::default()).unwrap()
    }

    fn ids(poll: &Poll) -> (OptionId, OptionId) {
        (poll.options()[0].id, poll.options()[1].id)
    }

    #[test]
    fn rejects_zero_duration() {
        let err = Poll::new(default_seed(), 0, ThemeColors::default()).unwrap_err();
        assert_eq!(err, PollError::ZeroDuration);
    }

    #[test]
    fn vote_reset_expire_extend_scenario() {
        let mut poll = poll();
        let (a, b) = ids(&poll);

        assert!(poll.cast_vote(a));
        let snap = poll.snapshot();
        assert_eq!(snap.options[0].votes, 13);
        assert_eq!(snap.total_votes, 21);
        assert_eq!(format!("{:.1}", snap.options[0].percentage), "61.9");
        assert_eq!(format!("{:.1}", snap.options[1].percentage), "38.1");

        poll.reset();
        assert_eq!(poll.options()[0].votes, 0);
        assert_eq!(poll.registry.get(b).unwrap().votes, 0);
        assert_eq!(poll.session().timer(), 30);
        assert_eq!(poll.phase(), SessionPhase::Open);

        for _ in 0..30 {
            poll.tick();
        }
        assert_eq!(poll.phase(), SessionPhase::Expired);
        assert_eq!(poll.session().timer(), 0);

        poll.extend();
        assert_eq!(poll.session().timer(), 10);
        assert_eq!(poll.phase(), SessionPhase::Open);
    }

    #[test]
    fn pause_blocks_votes_until_resume() {
        let mut poll = poll();
        let (a, _) = ids(&poll);
        for _ in 0..15 {
            poll.tick();
        }
        assert_eq!(poll.session().timer(), 15);

        assert!(poll.toggle_pause());
        assert_eq!(poll.phase(), SessionPhase::Paused);
        assert!(!poll.cast_vote(a));
        assert_eq!(poll.options()[0].votes, 12);

        assert!(poll.toggle_pause());
        assert_eq!(poll.phase(), SessionPhase::Open);
        assert!(poll.cast_vote(a));
        assert_eq!(poll.options()[0].votes, 13);
    }

    #[test]
    fn votes_rejected_after_expiry() {
        let mut poll = Poll::new(default_seed(), 1, ThemeColors::default()).unwrap();
        let (a, b) = ids(&poll);
        poll.tick();
        assert_eq!(poll.phase(), SessionPhase::Expired);
        assert!(!poll.cast_vote(a));
        assert!(!poll.cast_vote(b));
        assert_eq!(poll.total_votes(), 20);
        assert!(!poll.toggle_pause());
    }

    #[test]
    fn reset_from_pause_reopens_and_clears() {
        let mut poll = poll();
        poll.tick();
        poll.toggle_pause();
        poll.reset();
        assert_eq!(poll.phase(), SessionPhase::Open);
        assert_eq!(poll.session().timer(), 30);
        assert_eq!(poll.total_votes(), 0);
    }

    #[test]
    fn new_duration_applies_on_reset() {
        let mut poll = poll();
        assert!(!poll.set_duration(0));
        assert!(poll.set_duration(45));
        assert_eq!(poll.session().timer(), 30);
        poll.reset();
        assert_eq!(poll.session().timer(), 45);
    }

    #[test]
    fn edits_are_allowed_in_any_phase() {
        let mut poll = Poll::new(default_seed(), 1, ThemeColors::default()).unwrap();
        poll.tick();
        let id = poll.add_option("Option 3".into());
        assert!(poll.update_option(id, OptionPatch::name("Third")));
        assert_eq!(poll.options()[2].name, "Third");
        assert!(poll.delete_option(id));
        assert!(!poll.delete_option(poll.options()[0].id));
        assert_eq!(poll.options().len(), 2);
    }

    #[test]
    fn theme_merge_through_poll() {
        let mut poll = poll();
        let before = poll.theme();
        poll.update_theme(ThemePatch {
            primary: Some(Rgb(1, 1, 1)),
            ..Default::default()
        });
        assert_eq!(poll.theme().primary, Rgb(1, 1, 1));
        assert_eq!(poll.theme().accent, before.accent);
    }

    #[test]
    fn default_poll_matches_seed() {
        let poll = Poll::default();
        assert_eq!(poll.options().len(), 2);
        assert_eq!(poll.session().duration(), DEFAULT_TIMER_DURATION);
        assert!(poll.session().is_open());
    }
}
