pub mod blotter_screen;
pub mod editor_screen;
pub mod logs_screen;

use crate::state::{BlotterState, EditorState, LogsState};

#[derive(Debug)]
pub enum Screen {
    Blotter(BlotterState),
    Editor(Box<EditorState>),
    Logs(LogsState),
}
