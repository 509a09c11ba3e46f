use crossterm::event::Event as CrosstermEvent;

/// Identifies one arming of the countdown ticker.
pub type TickGeneration = u64;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// One second of countdown, from the ticker armed as `generation`
    Tick { generation: TickGeneration },

    /// UI animation frame (timer flashing near the end)
    Pulse,
}
