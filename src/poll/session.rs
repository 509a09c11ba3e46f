//! Countdown and voting-open state machine.
//!
//! A [`Session`] is a small `Copy` value; every transition is a pure function
//! from the current value and a [`SessionEvent`] to the next value. Vote
//! counts live in the option registry and are cleared by the caller on reset.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds added by a single extend.
pub const EXTEND_SECS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// Timer running, votes accepted.
    Open,
    /// Timer held by the host, votes rejected.
    Paused,
    /// Timer ran out, votes rejected.
    Expired,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionPhase::Open => "open",
            SessionPhase::Paused => "paused",
            SessionPhase::Expired => "expired",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Tick,
    Reset,
    Extend,
    TogglePause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    timer: u32,
    duration: u32,
    phase: SessionPhase,
}

impl Session {
    /// A fresh, open session. `duration` must be non-zero.
    pub fn new(duration: u32) -> Self {
        debug_assert!(duration > 0);
        Self {
            timer: duration,
            duration,
            phase: SessionPhase::Open,
        }
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == SessionPhase::Open
    }

    pub fn is_finished(&self) -> bool {
        self.timer == 0
    }

    /// Open and close to running out; the display flashes in this window.
    pub fn is_ending(&self) -> bool {
        self.is_open() && self.timer <= 5
    }

    /// Change the length used by the next reset. The live timer is untouched.
    pub fn with_duration(self, duration: u32) -> Self {
        Self {
            duration: duration.max(1),
            ..self
        }
    }

    pub fn transition(self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::Tick => self.tick(),
            SessionEvent::Reset => self.reset(),
            SessionEvent::Extend => self.extend(),
            SessionEvent::TogglePause => self.toggle_pause(),
        }
    }

    fn tick(self) -> Self {
        if self.phase != SessionPhase::Open {
            return self;
        }
        let timer = self.timer.saturating_sub(1);
        let phase = if timer == 0 {
            SessionPhase::Expired
        } else {
            SessionPhase::Open
        };
        Self {
            timer,
            phase,
            ..self
        }
    }

    fn reset(self) -> Self {
        Self::new(self.duration)
    }

    fn extend(self) -> Self {
        let timer = self.timer.saturating_add(EXTEND_SECS);
        // Only an expired countdown reopens; a host pause stays paused.
        let phase = match self.phase {
            SessionPhase::Expired => SessionPhase::Open,
            other => other,
        };
        Self {
            timer,
            phase,
            ..self
        }
    }

    fn toggle_pause(self) -> Self {
        if self.is_finished() {
            return self;
        }
        let phase = match self.phase {
            SessionPhase::Open => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Open,
            SessionPhase::Expired => SessionPhase::Expired,
        };
        Self { phase, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SessionEvent::*;

    fn run(mut session: Session, events: &[SessionEvent]) -> Session {
        for &event in events {
            session = session.transition(event);
        }
        session
    }

    #[test]
    fn starts_open_with_full_timer() {
        let s = Session::new(30);
        assert_eq!(s.timer(), 30);
        assert_eq!(s.duration(), 30);
        assert_eq!(s.phase(), SessionPhase::Open);
    }

    #[test]
    fn ticks_count_down_to_zero_then_expire() {
        let mut s = Session::new(5);
        let mut last = s.timer();
        for _ in 0..4 {
            s = s.transition(Tick);
            assert!(s.timer() < last);
            assert!(s.is_open());
            last = s.timer();
        }
        s = s.transition(Tick);
        assert_eq!(s.timer(), 0);
        assert_eq!(s.phase(), SessionPhase::Expired);
    }

    #[test]
    fn tick_outside_open_is_ignored() {
        let paused = Session::new(10).transition(TogglePause);
        assert_eq!(paused.transition(Tick), paused);

        let expired = run(Session::new(1), &[Tick]);
        assert_eq!(expired.transition(Tick), expired);
    }

    #[test]
    fn reset_reopens_from_every_phase() {
        let base = Session::new(30);
        for s in [
            run(base, &[Tick, Tick]),
            run(base, &[TogglePause]),
            run(Session::new(2), &[Tick, Tick]).with_duration(30),
        ] {
            let r = s.transition(Reset);
            assert_eq!(r.timer(), 30);
            assert_eq!(r.phase(), SessionPhase::Open);
        }
    }

    #[test]
    fn extend_reopens_after_expiry() {
        let s = run(Session::new(2), &[Tick, Tick, Extend]);
        assert_eq!(s.timer(), EXTEND_SECS);
        assert_eq!(s.phase(), SessionPhase::Open);
    }

    #[test]
    fn extend_keeps_pause() {
        let s = run(Session::new(15), &[TogglePause, Extend]);
        assert_eq!(s.timer(), 25);
        assert_eq!(s.phase(), SessionPhase::Paused);
    }

    #[test]
    fn extend_while_open_only_adds_time() {
        let s = run(Session::new(15), &[Tick, Extend]);
        assert_eq!(s.timer(), 24);
        assert!(s.is_open());
    }

    #[test]
    fn toggle_pause_flips_open_and_paused() {
        let s = Session::new(15).transition(TogglePause);
        assert_eq!(s.phase(), SessionPhase::Paused);
        assert_eq!(s.transition(TogglePause).phase(), SessionPhase::Open);
    }

    #[test]
    fn toggle_pause_after_expiry_is_ignored() {
        let expired = run(Session::new(1), &[Tick]);
        assert_eq!(expired.transition(TogglePause), expired);
    }

    #[test]
    fn duration_change_waits_for_reset() {
        let s = run(Session::new(30), &[Tick]).with_duration(60);
        assert_eq!(s.timer(), 29);
        assert_eq!(s.transition(Reset).timer(), 60);
        assert_eq!(Session::new(30).with_duration(0).duration(), 1);
    }

    #[test]
    fn ending_window_only_while_open() {
        let s = run(Session::new(6), &[Tick]);
        assert!(s.is_ending());
        assert!(!s.transition(TogglePause).is_ending());
        assert!(!Session::new(6).is_ending());
    }
}
