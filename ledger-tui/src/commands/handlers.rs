use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::*;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Priority 1: editor popups and focused attribute rows capture typing
    if let Screen::Editor(editor) = state.current_screen() {
        match &editor.popup {
            Some(EditorPopup::Picker(_)) => return handle_picker_keys(key),
            Some(EditorPopup::CategoryForm(_)) => return handle_category_form_keys(key),
            None => {}
        }

        if event.is_ctrl('s') {
            return Some(AppCommand::SaveTransaction);
        }

        if editor.attribute_focused() {
            return handle_attribute_keys(key);
        }
    }

    // Priority 2: help popup
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Multi-key sequences
    if let Some(pending) = state.pending_key {
        return match (pending, key) {
            ('g', Key::Char('g')) => Some(AppCommand::NavigateToTop),
            ('g', Key::Char('l')) => Some(AppCommand::NavigateToLogs),
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    match (state.current_screen(), key) {
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),
        (_, Key::Char('q')) => Some(AppCommand::Quit),

        (_, Key::Char('g')) => Some(AppCommand::SetPendingKey('g')),
        (_, Key::Char('G') | Key::End) => Some(AppCommand::NavigateToBottom),
        (_, Key::Home) => Some(AppCommand::NavigateToTop),

        // Editor
        (Screen::Editor(_), Key::Char('c') | Key::Enter) => Some(AppCommand::ClickCategory),
        (Screen::Editor(editor), Key::Char('a')) => editor
            .selector
            .node()
            .offers_add()
            .then_some(AppCommand::ClickAddCategory),
        (Screen::Editor(editor), Key::Char('s')) => editor
            .selector
            .node()
            .offers_split()
            .then_some(AppCommand::ClickSplit),
        (Screen::Editor(_), Key::Tab) => Some(AppCommand::FocusAttribute { forward: true }),
        (Screen::Editor(_), Key::BackTab) => Some(AppCommand::FocusAttribute { forward: false }),
        (Screen::Editor(_), Key::Esc | Key::Char('h') | Key::Left) => {
            Some(AppCommand::NavigateBack)
        }

        // Blotter
        (Screen::Blotter(_), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Blotter(_), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Blotter(_), Key::Char('r')) => Some(AppCommand::LoadBlotter),
        (Screen::Blotter(blotter), Key::Enter | Key::Char('e') | Key::Char('l') | Key::Right) => {
            blotter
                .selected_record()
                .map(|record| AppCommand::OpenEditor {
                    transaction_id: record.id,
                })
        }

        // Logs
        (Screen::Logs(_), Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Screen::Logs(_), Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Screen::Logs(_), Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Screen::Logs(_), Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),
        (Screen::Logs(_), Key::Esc | Key::Char('h') | Key::Left) => {
            Some(AppCommand::NavigateBack)
        }

        _ => None,
    }
}

fn handle_attribute_keys(key: Key) -> Option<AppCommand> {
    match key {
        Key::Esc => Some(AppCommand::UnfocusAttributes),
        Key::Enter => Some(AppCommand::SaveTransaction),
        Key::Tab | Key::Down => Some(AppCommand::FocusAttribute { forward: true }),
        Key::BackTab | Key::Up => Some(AppCommand::FocusAttribute { forward: false }),
        Key::Left => Some(AppCommand::CycleAttribute { forward: false }),
        Key::Right => Some(AppCommand::CycleAttribute { forward: true }),
        Key::Backspace => Some(AppCommand::DeleteAttributeChar),
        Key::Char(c) => Some(AppCommand::AppendAttributeChar(c)),
        _ => None,
    }
}

fn handle_picker_keys(key: Key) -> Option<AppCommand> {
    match key {
        Key::Up | Key::Char('k') => Some(AppCommand::PickerSelectPrevious),
        Key::Down | Key::Char('j') => Some(AppCommand::PickerSelectNext),
        Key::Enter => Some(AppCommand::ConfirmPick),
        Key::Esc | Key::Char('q') => Some(AppCommand::CancelPick),
        _ => None,
    }
}

fn handle_category_form_keys(key: Key) -> Option<AppCommand> {
    match key {
        Key::Enter => Some(AppCommand::SubmitCategoryForm),
        Key::Esc => Some(AppCommand::CancelCategoryForm),
        Key::Tab => Some(AppCommand::CycleCategoryParent { forward: true }),
        Key::BackTab => Some(AppCommand::CycleCategoryParent { forward: false }),
        Key::Backspace => Some(AppCommand::DeleteCategoryTitleChar),
        Key::Char(c) => Some(AppCommand::AppendCategoryTitleChar(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::selector::{
        attributes::DefaultAttributeViews, CategorySelector, SelectorSettings,
    };
    use chrono::NaiveDate;
    use ledger_db::entities::{
        attributes::{Attribute, AttributeType},
        categories::Category,
        transactions::BlotterRecord,
    };
    use ledger_db::{Database, MemoryStore, StoreData};
    use std::rc::Rc;
    use std::sync::mpsc::channel;

    fn record(id: i64) -> BlotterRecord {
        let at = NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        BlotterRecord::new(id, at, 1, "Cash")
    }

    fn store() -> Rc<dyn Database> {
        Rc::new(
            MemoryStore::from_data(StoreData {
                categories: vec![Category::new(1, "Travel")],
                attributes: vec![Attribute::new(5, "Seat", AttributeType::Text, 1)],
                ..Default::default()
            })
            .unwrap(),
        )
    }

    /// Helper to create UI state on the blotter with two rows
    fn blotter_state() -> AppState {
        let mut state = AppState::new(store(), Settings::default());
        if let Some(blotter) = state.blotter_mut() {
            blotter.replace_records(vec![record(2), record(1)]);
        }
        state
    }

    /// Helper to create UI state on the editor, optionally with the single
    /// attribute row focused
    fn editor_state(show_split_button: bool, focus_attribute: bool) -> AppState {
        let mut state = blotter_state();
        let (tx, rx) = channel();
        let mut selector = CategorySelector::new(
            Rc::clone(&state.store),
            Box::new(DefaultAttributeViews),
            SelectorSettings::default(),
        );
        selector.set_listener(Box::new(tx));
        selector.create_node(show_split_button);
        selector.create_attributes_layout();
        selector.fetch_categories().unwrap();
        selector.select_category_with(1, focus_attribute);

        let mut editor = EditorState::new(record(1), selector, rx);
        editor.sync_attributes();
        state.navigate_to(Screen::Editor(Box::new(editor)));
        state
    }

    fn key(state: &AppState, key: Key) -> Option<AppCommand> {
        handle_key_input(KeyEvent::new(key), state)
    }

    fn with_popup(mut state: AppState, popup: EditorPopup) -> AppState {
        if let Screen::Editor(editor) = state.current_screen_mut() {
            editor.popup = Some(popup);
        }
        state
    }

    // ============================================================================
    // Global Commands
    // ============================================================================

    #[test]
    fn test_quit_command() {
        let state = blotter_state();
        assert_eq!(key(&state, Key::Char('q')), Some(AppCommand::Quit));
    }

    #[test]
    fn test_help_visible_blocks_other_commands() {
        let mut state = blotter_state();
        state.help_visible = true;

        assert_eq!(key(&state, Key::Char('j')), None);
        assert_eq!(key(&state, Key::Enter), None);
        assert_eq!(key(&state, Key::Esc), Some(AppCommand::ToggleHelp));
        assert_eq!(key(&state, Key::Char('?')), Some(AppCommand::ToggleHelp));
    }

    #[test]
    fn test_multi_key_sequences() {
        let mut state = blotter_state();
        assert_eq!(
            key(&state, Key::Char('g')),
            Some(AppCommand::SetPendingKey('g'))
        );

        state.pending_key = Some('g');
        assert_eq!(key(&state, Key::Char('g')), Some(AppCommand::NavigateToTop));
        assert_eq!(key(&state, Key::Char('l')), Some(AppCommand::NavigateToLogs));
        assert_eq!(key(&state, Key::Char('x')), Some(AppCommand::ClearPendingKey));
    }

    // ============================================================================
    // Blotter
    // ============================================================================

    #[test]
    fn test_blotter_navigation() {
        let state = blotter_state();
        assert_eq!(key(&state, Key::Char('j')), Some(AppCommand::SelectNext));
        assert_eq!(key(&state, Key::Up), Some(AppCommand::SelectPrevious));
        assert_eq!(key(&state, Key::Char('r')), Some(AppCommand::LoadBlotter));
    }

    #[test]
    fn test_blotter_enter_opens_selected_transaction() {
        let state = blotter_state();
        assert_eq!(
            key(&state, Key::Enter),
            Some(AppCommand::OpenEditor { transaction_id: 2 })
        );
    }

    #[test]
    fn test_blotter_enter_without_rows_is_ignored() {
        let state = AppState::new(store(), Settings::default());
        assert_eq!(key(&state, Key::Enter), None);
    }

    // ============================================================================
    // Editor
    // ============================================================================

    #[test]
    fn test_editor_category_node_keys() {
        let state = editor_state(true, false);
        assert_eq!(key(&state, Key::Char('c')), Some(AppCommand::ClickCategory));
        assert_eq!(key(&state, Key::Char('s')), Some(AppCommand::ClickSplit));
        assert_eq!(
            key(&state, Key::Char('a')),
            Some(AppCommand::ClickAddCategory)
        );
        assert_eq!(
            key(&state, Key::Tab),
            Some(AppCommand::FocusAttribute { forward: true })
        );
        assert_eq!(key(&state, Key::Esc), Some(AppCommand::NavigateBack));
    }

    #[test]
    fn test_split_key_requires_split_button() {
        let state = editor_state(false, false);
        assert_eq!(key(&state, Key::Char('s')), None);
        assert_eq!(
            key(&state, Key::Char('a')),
            Some(AppCommand::ClickAddCategory)
        );
    }

    #[test]
    fn test_focused_attribute_captures_typing() {
        let state = editor_state(true, true);
        assert_eq!(
            key(&state, Key::Char('c')),
            Some(AppCommand::AppendAttributeChar('c'))
        );
        assert_eq!(key(&state, Key::Char('q')), Some(AppCommand::AppendAttributeChar('q')));
        assert_eq!(key(&state, Key::Backspace), Some(AppCommand::DeleteAttributeChar));
        assert_eq!(
            key(&state, Key::Right),
            Some(AppCommand::CycleAttribute { forward: true })
        );
        assert_eq!(key(&state, Key::Esc), Some(AppCommand::UnfocusAttributes));
        assert_eq!(key(&state, Key::Enter), Some(AppCommand::SaveTransaction));
    }

    #[test]
    fn test_ctrl_s_saves_from_editor() {
        let state = editor_state(true, false);
        assert_eq!(
            handle_key_input(KeyEvent::with_ctrl(Key::Char('s')), &state),
            Some(AppCommand::SaveTransaction)
        );
    }

    #[test]
    fn test_picker_popup_keys() {
        let state = with_popup(
            editor_state(true, false),
            EditorPopup::Picker(PickerState::new(PickerMode::Tree, Vec::new(), None)),
        );
        assert_eq!(key(&state, Key::Char('j')), Some(AppCommand::PickerSelectNext));
        assert_eq!(key(&state, Key::Enter), Some(AppCommand::ConfirmPick));
        assert_eq!(key(&state, Key::Esc), Some(AppCommand::CancelPick));
        assert_eq!(key(&state, Key::Char('?')), None);
    }

    #[test]
    fn test_category_form_popup_keys() {
        let state = with_popup(
            editor_state(true, false),
            EditorPopup::CategoryForm(CategoryFormState::default()),
        );
        assert_eq!(
            key(&state, Key::Char('q')),
            Some(AppCommand::AppendCategoryTitleChar('q'))
        );
        assert_eq!(
            key(&state, Key::Tab),
            Some(AppCommand::CycleCategoryParent { forward: true })
        );
        assert_eq!(key(&state, Key::Enter), Some(AppCommand::SubmitCategoryForm));
        assert_eq!(key(&state, Key::Esc), Some(AppCommand::CancelCategoryForm));
    }

    // ============================================================================
    // Logs
    // ============================================================================

    #[test]
    fn test_logs_scroll_keys() {
        let mut state = blotter_state();
        state.navigate_to(Screen::Logs(LogsState::default()));
        assert_eq!(key(&state, Key::Char('k')), Some(AppCommand::ScrollLogsUp));
        assert_eq!(key(&state, Key::PageDown), Some(AppCommand::ScrollLogsPageDown));
        assert_eq!(key(&state, Key::Char('h')), Some(AppCommand::NavigateBack));
    }
}
