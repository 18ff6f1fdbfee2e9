use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ledger_db::Database;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::rc::Rc;

use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::executor;
use crate::config::Settings;
use crate::events::AppCommand;
use crate::input::KeyEvent;
use crate::log_buffer::LogBuffer;
use crate::state::{reducer, AppState, StatusMessage};
use crate::ui::screens::Screen;

/// Executes commands and writes the store to disk after every mutation
pub struct PersistingHandler {
    store: Rc<dyn Database>,
}

impl PersistingHandler {
    pub fn new(store: Rc<dyn Database>) -> Self {
        Self { store }
    }
}

impl DataEventHandler for PersistingHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        // Don't log when on logs screen to avoid feedback loop
        if !matches!(state.current_screen(), Screen::Logs(_)) {
            tracing::debug!("Executing command: {:?}", command);
        }

        let events = executor::execute_command(command, state);
        let mutated = events.iter().any(|event| event.is_mutation());
        for event in events {
            reducer::reduce_data_event(state, event);
        }

        if mutated {
            if let Err(e) = self.store.flush() {
                tracing::error!("Failed to write data file: {}", e);
                state.status = Some(StatusMessage::error(format!("Not written to disk: {}", e)));
            }
        }
    }
}

pub struct App {
    settings: Settings,
    store: Rc<dyn Database>,
    log_buffer: LogBuffer,
}

impl App {
    pub fn new(settings: Settings, store: Rc<dyn Database>, log_buffer: LogBuffer) -> Self {
        Self {
            settings,
            store,
            log_buffer,
        }
    }

    pub async fn run(self) -> Result<()> {
        let mut terminal = Self::init()?;

        let state = AppState::new(Rc::clone(&self.store), self.settings.clone());
        let mut core = AppCore::new(state, PersistingHandler::new(Rc::clone(&self.store)));
        core.execute(AppCommand::LoadBlotter);

        let mut event_stream = EventStream::new();

        tracing::info!("Entering main event loop");

        // Periodic redraw keeps future-dated rows and the log view current
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(500));
        loop {
            let total_entries = self.log_buffer.len();
            if let Screen::Logs(logs_state) = core.state_mut().current_screen_mut() {
                logs_state.total_entries = total_entries;
            }

            terminal.draw(|f| {
                crate::ui::render_app(f, core.state(), &self.log_buffer);
            })?;

            tokio::select! {
                _ = interval.tick() => {}
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if matches!(key.kind, KeyEventKind::Press) => {
                            core.handle_key(KeyEvent::from(key));
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::error!("Terminal event error: {}", e);
                        }
                        None => {
                            tracing::info!("Terminal event stream closed");
                            break;
                        }
                    }
                }
            }

            if core.should_quit() {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");
        if let Err(e) = self.store.flush() {
            tracing::error!("Failed to write data file on exit: {}", e);
        }

        Self::exit(terminal)?;
        Ok(())
    }

    fn init() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn exit(mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}
