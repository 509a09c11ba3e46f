use crate::app::event::TickGeneration;
use crate::logging::RoundRecord;

/// Side effects requested by the handler and carried out by the main loop.
#[derive(Debug)]
pub enum Action {
    StartCountdown { generation: TickGeneration },
    StopCountdown,
    RecordRound(RoundRecord),
    Quit,
}
