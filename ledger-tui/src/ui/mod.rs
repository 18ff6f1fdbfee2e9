pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;

use crate::log_buffer::LogBuffer;
use crate::state::AppState;
use ratatui::Frame;
use screens::*;

/// Pure render dispatcher - routes to appropriate screen renderer
/// This function is read-only and never mutates state
pub fn render_app(f: &mut Frame, state: &AppState, log_buffer: &LogBuffer) {
    let status = state.status.as_ref();

    match state.current_screen() {
        Screen::Blotter(blotter_state) => {
            blotter_screen::render(f, blotter_state, &state.render_context(), status);
        }
        Screen::Editor(editor_state) => {
            editor_screen::render(f, editor_state, status);
        }
        Screen::Logs(logs_state) => {
            logs_screen::render(f, logs_state, log_buffer);
        }
    }

    // Render help popup on top if visible
    if state.help_visible {
        components::help_popup::render_help_popup(f, state.current_screen());
    }
}
