use super::{AppState, LoadingState, StatusMessage};
use crate::events::DataEvent;
use crate::ui::screens::Screen;

/// Pure state transition function for data events.
///
/// The executor produces these after touching the store; nothing here
/// talks to the store again.
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        DataEvent::BlotterLoaded { records } => {
            tracing::debug!("Blotter loaded with {} transactions", records.len());
            // The blotter lives at the bottom of the stack, so this also
            // refreshes it while an editor is on top
            if let Some(blotter) = state.blotter_mut() {
                blotter.replace_records(records);
            }
        }

        DataEvent::TransactionSaved { transaction_id } => {
            // Leave the editor that produced the save. A stale event for
            // another transaction must not pop an unrelated screen.
            if matches!(
                state.current_screen(),
                Screen::Editor(editor) if editor.transaction_id() == transaction_id
            ) {
                state.navigate_back();
            }
            state.status = Some(StatusMessage::info(format!(
                "Transaction {} saved",
                transaction_id
            )));
        }

        DataEvent::TransactionSaveFailed {
            transaction_id,
            error,
        } => {
            // The editor stays open so the user can retry or discard
            tracing::error!("Failed to save transaction {}: {}", transaction_id, error);
            state.status = Some(StatusMessage::error(format!("Save failed: {}", error)));
        }

        DataEvent::CategoryCreated { category_id, title } => {
            // The selector has already selected the new category; only
            // report it here
            tracing::debug!("Category {} created as {}", title, category_id);
            state.status = Some(StatusMessage::info(format!("Category {} created", title)));
        }

        DataEvent::LoadError { error } => {
            tracing::error!("Load error: {}", error);
            if let Some(blotter) = state.blotter_mut() {
                // Keep showing existing rows and report through the status
                // line; only an empty blotter switches to the error view
                if blotter.records.is_empty() {
                    blotter.loading = LoadingState::Error(error.clone());
                }
            }
            state.status = Some(StatusMessage::error(error));
        }
    }
}
