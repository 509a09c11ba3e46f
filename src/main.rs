mod app;
mod config;
mod i18n;
mod logging;
mod poll;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::app::ticker::{self, Countdown, COUNTDOWN_PERIOD, PULSE_PERIOD};
use crate::logging::ResultsLogger;
use anyhow::{Context, Result};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Load config and validate the starting poll before touching the terminal
    let cfg = config::load_config()?;
    logging::init_tracing(&cfg.logging)?;
    let state = AppState::new(&cfg).context("Invalid poll configuration")?;
    tracing::info!(
        options = state.poll.options().len(),
        duration = state.poll.session().duration(),
        language = %state.language,
        "pollboard starting"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, state, ResultsLogger::new(&cfg.logging)).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut state: AppState,
    mut results: ResultsLogger,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    tracing::error!("terminal input failed: {}", e);
                    break;
                }
                None => break,
            }
        }
    });

    ticker::spawn_pulse(event_tx.clone(), PULSE_PERIOD);

    let mut countdown = Countdown::new(event_tx.clone(), COUNTDOWN_PERIOD);
    if state.poll.session().is_open() {
        countdown.start(state.next_tick_generation());
    }

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;
    state.dirty = false;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, event);

        // Process actions
        for action in actions {
            match action {
                Action::StartCountdown { generation } => countdown.start(generation),
                Action::StopCountdown => countdown.stop(),
                Action::RecordRound(record) => results.record(&record),
                Action::Quit => state.should_quit = true,
            }
        }

        if state.should_quit {
            tracing::info!(countdown_running = countdown.is_running(), "pollboard exiting");
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}
