use crate::events::{AppCommand, DataEvent};
use crate::selector::{
    attributes::DefaultAttributeViews,
    result::{Payload, RequestCode, ResultCode, CATEGORY_ID_KEY, SELECTED_CATEGORY_ID_KEY},
    CategorySelector, ClickTarget, SelectorAction, SelectorSettings,
};
use crate::state::*;
use crate::ui::screens::Screen;
use ledger_db::entities::{categories::NewCategory, TransactionId};
use ledger_db::{BlotterRepository, CategoryRepository, Database};
use std::rc::Rc;
use std::sync::mpsc::channel;

/// Execute a command against the state and the store.
///
/// Store calls are synchronous; their outcome comes back as data events for
/// the reducer.
pub fn execute_command(command: AppCommand, state: &mut AppState) -> Vec<DataEvent> {
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));
    let mut events = Vec::new();

    match command {
        AppCommand::Quit => state.should_quit = true,
        AppCommand::ToggleHelp => state.help_visible = !state.help_visible,
        AppCommand::SetPendingKey(c) => state.pending_key = Some(c),
        AppCommand::ClearPendingKey => state.pending_key = None,

        AppCommand::NavigateBack => {
            state.navigate_back();
        }
        AppCommand::NavigateToTop => match state.current_screen_mut() {
            Screen::Blotter(s) => s.select_first(),
            Screen::Logs(s) => s.scroll_offset = s.total_entries.saturating_sub(1),
            Screen::Editor(_) => {}
        },
        AppCommand::NavigateToBottom => match state.current_screen_mut() {
            Screen::Blotter(s) => s.select_last(),
            Screen::Logs(s) => s.scroll_offset = 0,
            Screen::Editor(_) => {}
        },
        AppCommand::SelectNext => {
            if let Screen::Blotter(s) = state.current_screen_mut() {
                s.select_next();
            }
        }
        AppCommand::SelectPrevious => {
            if let Screen::Blotter(s) = state.current_screen_mut() {
                s.select_prev();
            }
        }

        AppCommand::LoadBlotter => {
            tracing::debug!("Loading blotter");
            events.push(DataEvent::BlotterLoaded {
                records: state.store.blotter(),
            });
        }

        AppCommand::OpenEditor { transaction_id } => {
            match open_editor(state, transaction_id) {
                Ok(editor) => state.navigate_to(Screen::Editor(Box::new(editor))),
                Err(error) => events.push(DataEvent::LoadError { error }),
            }
        }

        AppCommand::SaveTransaction => {
            if let Screen::Editor(editor) = state.current_screen() {
                events.extend(save_transaction(&state.store, editor));
            }
        }

        AppCommand::NavigateToLogs => {
            state.navigate_to(Screen::Logs(LogsState::default()));
        }
        AppCommand::ScrollLogsUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                if s.scroll_offset < s.total_entries.saturating_sub(1) {
                    s.scroll_offset += 1;
                }
            }
        }
        AppCommand::ScrollLogsDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(1);
            }
        }
        AppCommand::ScrollLogsPageUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = (s.scroll_offset + 20).min(s.total_entries.saturating_sub(1));
            }
        }
        AppCommand::ScrollLogsPageDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(20);
            }
        }
        AppCommand::ScrollLogsToTop => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.total_entries.saturating_sub(1);
            }
        }
        AppCommand::ScrollLogsToBottom => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = 0;
            }
        }

        // Everything else happens inside the editor
        editor_command => {
            let store = Rc::clone(&state.store);
            if let Screen::Editor(editor) = state.current_screen_mut() {
                if let Err(error) =
                    execute_editor_command(editor_command, editor, store.as_ref(), &mut events)
                {
                    events.push(DataEvent::LoadError { error });
                }
                editor.sync_attributes();
            }
        }
    }

    // Clear pending key after any command except SetPendingKey
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }

    events
}

fn open_editor(state: &AppState, transaction_id: TransactionId) -> Result<EditorState, String> {
    let record = state
        .store
        .transaction(transaction_id)
        .ok_or_else(|| format!("Transaction {} not found", transaction_id))?;

    let (tx, rx) = channel();
    let mut selector = CategorySelector::new(
        Rc::clone(&state.store),
        Box::new(DefaultAttributeViews),
        SelectorSettings::from(&state.settings),
    );
    selector.set_listener(Box::new(tx));

    // Transfers cannot be split
    if record.is_transfer() {
        selector.do_not_show_split_category();
        selector.create_node(false);
    } else {
        selector.create_node(true);
    }
    selector.create_attributes_layout();
    selector.fetch_categories().map_err(|e| e.to_string())?;
    selector.select_category_with(record.category_id, false);

    tracing::info!("Editing transaction {}", transaction_id);
    let mut editor = EditorState::new(record, selector, rx);
    editor.sync_attributes();
    Ok(editor)
}

fn save_transaction(store: &Rc<dyn Database>, editor: &EditorState) -> Vec<DataEvent> {
    let transaction_id = editor.transaction_id();
    let category_id = editor.selector.selected_category_id();
    let attributes = editor.selector.attributes();

    match store.save_transaction_category(transaction_id, category_id, &attributes) {
        Ok(()) => {
            tracing::info!(
                "Saved transaction {} with category {} and {} attributes",
                transaction_id,
                category_id,
                attributes.len()
            );
            vec![
                DataEvent::TransactionSaved { transaction_id },
                DataEvent::BlotterLoaded {
                    records: store.blotter(),
                },
            ]
        }
        Err(e) => vec![DataEvent::TransactionSaveFailed {
            transaction_id,
            error: e.to_string(),
        }],
    }
}

fn execute_editor_command(
    command: AppCommand,
    editor: &mut EditorState,
    store: &dyn Database,
    events: &mut Vec<DataEvent>,
) -> Result<(), String> {
    match command {
        AppCommand::ClickCategory => {
            let action = editor.selector.on_click(ClickTarget::Category);
            open_action(editor, action);
        }
        AppCommand::ClickAddCategory => {
            let action = editor.selector.on_click(ClickTarget::AddCategory);
            open_action(editor, action);
        }
        AppCommand::ClickSplit => {
            let action = editor.selector.on_click(ClickTarget::Split);
            open_action(editor, action);
        }

        AppCommand::FocusAttribute { forward } => {
            if let Some(panel) = editor.selector.attributes_panel_mut() {
                panel.focus_next(forward);
            }
        }
        AppCommand::UnfocusAttributes => {
            if let Some(panel) = editor.selector.attributes_panel_mut() {
                panel.unfocus();
            }
        }
        AppCommand::AppendAttributeChar(c) => {
            if let Some(view) = focused_view(editor) {
                view.input_char(c);
            }
        }
        AppCommand::DeleteAttributeChar => {
            if let Some(view) = focused_view(editor) {
                view.delete_char();
            }
        }
        AppCommand::CycleAttribute { forward } => {
            if let Some(view) = focused_view(editor) {
                view.cycle(forward);
            }
        }

        AppCommand::PickerSelectNext => {
            if let Some(EditorPopup::Picker(picker)) = editor.popup.as_mut() {
                picker.select_next();
            }
        }
        AppCommand::PickerSelectPrevious => {
            if let Some(EditorPopup::Picker(picker)) = editor.popup.as_mut() {
                picker.select_prev();
            }
        }
        AppCommand::ConfirmPick => {
            if let Some(EditorPopup::Picker(picker)) = editor.popup.take() {
                let picked = picker.highlighted().map(|item| item.id());
                match (picker.mode, picked) {
                    (PickerMode::Tree, Some(id)) => editor
                        .selector
                        .on_screen_result(
                            RequestCode::CategoryPick,
                            ResultCode::Ok,
                            &Payload::new().with(SELECTED_CATEGORY_ID_KEY, id),
                        )
                        .map_err(|e| e.to_string())?,
                    (PickerMode::QuickList, Some(id)) => {
                        editor.selector.on_selected_id(ClickTarget::Category, id)
                    }
                    (_, None) => {}
                }
            }
        }
        AppCommand::CancelPick => {
            if let Some(EditorPopup::Picker(picker)) = editor.popup.take() {
                if picker.mode == PickerMode::Tree {
                    editor
                        .selector
                        .on_screen_result(
                            RequestCode::CategoryPick,
                            ResultCode::Canceled,
                            &Payload::new(),
                        )
                        .map_err(|e| e.to_string())?;
                }
            }
        }

        AppCommand::AppendCategoryTitleChar(c) => {
            if let Some(EditorPopup::CategoryForm(form)) = editor.popup.as_mut() {
                form.title.push(c);
                form.error = None;
            }
        }
        AppCommand::DeleteCategoryTitleChar => {
            if let Some(EditorPopup::CategoryForm(form)) = editor.popup.as_mut() {
                form.title.pop();
                form.error = None;
            }
        }
        AppCommand::CycleCategoryParent { forward } => {
            if let Some(EditorPopup::CategoryForm(form)) = editor.popup.as_mut() {
                form.cycle_parent(forward);
            }
        }
        AppCommand::SubmitCategoryForm => {
            if let Some(EditorPopup::CategoryForm(form)) = editor.popup.as_mut() {
                let new_category = NewCategory {
                    title: form.title.trim().to_string(),
                    parent_id: form.parent_id(),
                };
                let title = new_category.title.clone();
                match store.insert_category(new_category) {
                    Ok(category_id) => {
                        editor.popup = None;
                        events.push(DataEvent::CategoryCreated { category_id, title });
                        editor
                            .selector
                            .on_screen_result(
                                RequestCode::CategoryAdd,
                                ResultCode::Ok,
                                &Payload::new().with(CATEGORY_ID_KEY, category_id),
                            )
                            .map_err(|e| e.to_string())?;
                    }
                    Err(e) => {
                        tracing::warn!("Category not created: {}", e);
                        form.error = Some(e.to_string());
                    }
                }
            }
        }
        AppCommand::CancelCategoryForm => {
            if let Some(EditorPopup::CategoryForm(_)) = editor.popup.take() {
                editor
                    .selector
                    .on_screen_result(RequestCode::CategoryAdd, ResultCode::Canceled, &Payload::new())
                    .map_err(|e| e.to_string())?;
            }
        }

        other => {
            tracing::debug!("Ignoring {:?} outside its screen", other);
        }
    }
    Ok(())
}

fn focused_view(
    editor: &mut EditorState,
) -> Option<&mut Box<dyn crate::selector::attributes::AttributeView>> {
    editor
        .selector
        .attributes_panel_mut()
        .and_then(|panel| panel.focused_view_mut())
}

/// Turn a selector action into the matching popup
fn open_action(editor: &mut EditorState, action: Option<SelectorAction>) {
    let Some(action) = action else {
        return;
    };
    tracing::debug!("Selector requested {:?}", action);

    let items = editor.selector.items();
    editor.popup = Some(match action {
        SelectorAction::OpenTreePicker {
            selected_id,
            show_split,
        } => {
            let items: Vec<_> = items
                .iter()
                .filter(|item| show_split || !item.is_split())
                .cloned()
                .collect();
            let position = items.iter().position(|item| item.id() == selected_id);
            EditorPopup::Picker(PickerState::new(PickerMode::Tree, items, position))
        }
        SelectorAction::OpenQuickList { position } => {
            EditorPopup::Picker(PickerState::new(PickerMode::QuickList, items.to_vec(), position))
        }
        SelectorAction::OpenCategoryEditor => {
            let parents = items
                .iter()
                .filter(|item| !item.is_sentinel())
                .cloned()
                .collect();
            EditorPopup::CategoryForm(CategoryFormState::new(parents))
        }
    });
}
