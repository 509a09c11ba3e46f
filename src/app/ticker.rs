//! The one-second countdown source.
//!
//! The ticker is armed when the session enters `Open` and disarmed when it
//! leaves. Every arming carries a generation number so ticks that were
//! already queued when the ticker was disarmed can be told apart.

use crate::app::event::{AppEvent, TickGeneration};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Animation frame for the flashing timer.
pub const PULSE_PERIOD: Duration = Duration::from_millis(500);

pub struct Countdown {
    tx: mpsc::UnboundedSender<AppEvent>,
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl Countdown {
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>, period: Duration) -> Self {
        Self {
            tx,
            period,
            task: None,
        }
    }

    /// (Re)arm the ticker. The first tick fires one full period from now.
    pub fn start(&mut self, generation: TickGeneration) {
        self.stop();
        let tx = self.tx.clone();
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(AppEvent::Tick { generation }).is_err() {
                    break;
                }
            }
        }));
        tracing::debug!(generation, "countdown armed");
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("countdown disarmed");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Free-running pulse; stops once the receiver is gone.
pub fn spawn_pulse(tx: mpsc::UnboundedSender<AppEvent>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tx.send(AppEvent::Pulse).is_err() {
                break;
            }
        }
    })
}
