use ledger_db::entities::{NO_CATEGORY_ID, SPLIT_CATEGORY_ID};
use ledger_db::{BlotterRepository, CategoryRepository, Database, MemoryStore};
use ledger_tui::app_core::AppCore;
use ledger_tui::config::Settings;
use ledger_tui::events::{AppCommand, DataEvent};
use ledger_tui::input::{Key, KeyEvent};
use ledger_tui::selector::items::CategoryItem;
use ledger_tui::state::{AppState, EditorPopup, LoadingState, PickerMode};
use ledger_tui::testing::{sample_store_data, TestApp};
use ledger_tui::ui::screens::Screen;
use ledger_tui::PersistingHandler;
use std::rc::Rc;

fn blotter_discriminant() -> std::mem::Discriminant<Screen> {
    let app = TestApp::new();
    std::mem::discriminant(app.state().current_screen())
}

fn selected_id(app: &TestApp) -> Option<i64> {
    app.state()
        .blotter()
        .and_then(|b| b.selected_record())
        .map(|r| r.id)
}

/// Move the blotter selection to `id` and open the editor on it
fn open_editor(app: &mut TestApp, id: i64) {
    app.send_key(Key::Home);
    while selected_id(app) != Some(id) {
        app.send_key(Key::Char('j'));
    }
    app.send_key(Key::Enter);
    assert_eq!(app.editor().map(|e| e.transaction_id()), Some(id));
}

#[test]
fn test_quit_flow() {
    let mut app = TestApp::new();

    app.assert_not_quit();
    app.send_key(Key::Char('q'));
    app.assert_should_quit();
}

#[test]
fn test_help_toggle() {
    let mut app = TestApp::new();

    assert!(!app.state().help_visible);

    app.send_key(Key::Char('?'));
    assert!(app.state().help_visible);

    // Help swallows navigation
    app.send_key(Key::Char('j'));
    assert_eq!(selected_id(&app), Some(3));

    app.send_key(Key::Esc);
    assert!(!app.state().help_visible);
}

#[test]
fn test_blotter_loads_newest_first() {
    let app = TestApp::new();

    let blotter = app.state().blotter().unwrap();
    let ids: Vec<i64> = blotter.records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(blotter.loading, LoadingState::Loaded);
    assert_eq!(selected_id(&app), Some(3));
}

#[test]
fn test_blotter_navigation_wraps_and_jumps() {
    let mut app = TestApp::new();

    app.send_key(Key::Char('G'));
    assert_eq!(selected_id(&app), Some(1));

    app.send_key(Key::Char('j'));
    assert_eq!(selected_id(&app), Some(3));

    app.send_keys(&[Key::Char('j'), Key::Char('g'), Key::Char('g')]);
    assert_eq!(selected_id(&app), Some(3));
    assert_eq!(app.state().pending_key, None);
}

#[test]
fn test_open_editor_seeds_category_and_attributes() {
    let mut app = TestApp::new();
    open_editor(&mut app, 1);

    let editor = app.editor().unwrap();
    assert_eq!(editor.selector.selected_category_id(), 2);
    assert_eq!(editor.selector.label(), "-- Bakery");
    assert!(!editor.attribute_focused());

    let panel = editor.selector.attributes_panel().unwrap();
    assert_eq!(panel.view(10).unwrap().value(), "true");
    assert_eq!(panel.view(11).unwrap().value(), "Sourdough");
}

#[test]
fn test_edit_attribute_and_save() {
    let mut app = TestApp::new();
    open_editor(&mut app, 1);

    // Focus the Receipt checkbox and clear it
    app.send_key(Key::Tab);
    app.send_key(Key::Right);
    app.send_key(Key::Enter);

    app.assert_screen_type(blotter_discriminant());
    let status = app.state().status.as_ref().unwrap();
    assert!(!status.is_error);
    assert_eq!(status.text, "Transaction 1 saved");

    let saved = app.store().transaction(1).unwrap();
    assert_eq!(saved.category_id, 2);
    assert_eq!(saved.category_attributes.get(&10).map(String::as_str), Some("false"));
    assert_eq!(
        saved.category_attributes.get(&11).map(String::as_str),
        Some("Sourdough")
    );
}

#[test]
fn test_pick_category_from_tree() {
    let mut app = TestApp::new();
    open_editor(&mut app, 2);
    assert_eq!(app.editor().unwrap().selector.selected_category_id(), NO_CATEGORY_ID);

    app.send_key(Key::Char('c'));
    {
        let editor = app.editor().unwrap();
        let Some(EditorPopup::Picker(ref picker)) = editor.popup else {
            panic!("expected picker popup, got {:?}", editor.popup);
        };
        assert_eq!(picker.mode, PickerMode::Tree);
        assert_eq!(picker.items[0], CategoryItem::Split);
        assert_eq!(picker.highlighted(), Some(&CategoryItem::NoCategory));
    }

    // No category -> Groceries -> Bakery -> Utilities
    app.send_keys(&[Key::Char('j'), Key::Char('j'), Key::Char('j'), Key::Enter]);

    let editor = app.editor().unwrap();
    assert!(editor.popup.is_none());
    assert_eq!(editor.selector.selected_category_id(), 3);
    // Picking focuses the last attribute row
    assert!(editor.attribute_focused());

    app.type_text("42x");
    app.send_key(Key::Enter);

    let saved = app.store().transaction(2).unwrap();
    assert_eq!(saved.category_id, 3);
    assert_eq!(saved.category_title.as_deref(), Some("Utilities"));
    assert_eq!(saved.category_attributes.get(&12).map(String::as_str), Some("42"));

    let row = app
        .state()
        .blotter()
        .unwrap()
        .records
        .iter()
        .find(|r| r.id == 2)
        .cloned()
        .unwrap();
    assert_eq!(row.category_title.as_deref(), Some("Utilities"));
}

#[test]
fn test_cancel_picker_keeps_selection() {
    let mut app = TestApp::new();
    open_editor(&mut app, 1);

    app.send_keys(&[Key::Char('c'), Key::Char('j'), Key::Esc]);

    let editor = app.editor().unwrap();
    assert!(editor.popup.is_none());
    assert_eq!(editor.selector.selected_category_id(), 2);
    assert!(!editor.attribute_focused());
}

#[test]
fn test_quick_list_pick() {
    let settings = Settings {
        use_tree_picker: false,
        ..Settings::default()
    };
    let mut app = TestApp::with_settings(settings);
    open_editor(&mut app, 2);

    app.send_key(Key::Char('c'));
    {
        let editor = app.editor().unwrap();
        let Some(EditorPopup::Picker(ref picker)) = editor.popup else {
            panic!("expected picker popup, got {:?}", editor.popup);
        };
        assert_eq!(picker.mode, PickerMode::QuickList);
    }

    // No category -> Groceries -> Bakery
    app.send_keys(&[Key::Char('j'), Key::Char('j'), Key::Enter]);

    let editor = app.editor().unwrap();
    assert_eq!(editor.selector.selected_category_id(), 2);
    let panel = editor.selector.attributes_panel().unwrap();
    // Loaf falls back to its default
    assert_eq!(panel.view(11).unwrap().value(), "Rye");
    assert_eq!(panel.view(10).unwrap().value(), "false");
}

#[test]
fn test_split_and_save() {
    let mut app = TestApp::new();
    open_editor(&mut app, 1);

    app.send_key(Key::Char('s'));
    {
        let editor = app.editor().unwrap();
        assert!(editor.selector.is_split_category_selected());
        assert!(editor.selector.attributes().is_empty());
    }

    app.send_key_event(KeyEvent::with_ctrl(Key::Char('s')));

    let saved = app.store().transaction(1).unwrap();
    assert_eq!(saved.category_id, SPLIT_CATEGORY_ID);
    assert!(saved.category_attributes.is_empty());
}

#[test]
fn test_transfer_editor_hides_split() {
    let mut app = TestApp::new();
    open_editor(&mut app, 3);

    let node = app.editor().unwrap().selector.node();
    assert!(node.offers_add());
    assert!(!node.offers_split());

    // 's' is not bound for transfers
    app.send_key(Key::Char('s'));
    assert!(!app.editor().unwrap().selector.is_split_category_selected());

    app.send_key(Key::Char('c'));
    let editor = app.editor().unwrap();
    let Some(EditorPopup::Picker(ref picker)) = editor.popup else {
        panic!("expected picker popup, got {:?}", editor.popup);
    };
    assert_eq!(picker.items[0], CategoryItem::NoCategory);
    assert!(!picker.items.iter().any(CategoryItem::is_split));
}

#[test]
fn test_create_category_selects_it() {
    let mut app = TestApp::new();
    open_editor(&mut app, 2);

    app.send_key(Key::Char('a'));
    assert!(matches!(
        app.editor().unwrap().popup,
        Some(EditorPopup::CategoryForm(_))
    ));

    // Letters go to the form, not to editor bindings
    app.type_text("Pets");
    app.send_key(Key::Tab);
    app.send_key(Key::Enter);

    let created = app.store().get_category_by_id(4).unwrap();
    assert_eq!(created.title, "Pets");
    assert_eq!(created.parent_id, Some(1));
    assert_eq!(
        app.state().status.as_ref().map(|s| s.text.as_str()),
        Some("Category Pets created")
    );

    let editor = app.editor().unwrap();
    assert!(editor.popup.is_none());
    assert_eq!(editor.selector.selected_category_id(), 4);
    assert_eq!(editor.selector.label(), "-- Pets");
    assert!(editor.selector.items().iter().any(|item| item.id() == 4));
    // Inherits Receipt from Groceries
    assert!(editor.selector.attributes_panel().unwrap().view(10).is_some());
}

#[test]
fn test_create_category_with_empty_title_keeps_form() {
    let mut app = TestApp::new();
    open_editor(&mut app, 2);

    app.send_key(Key::Char('a'));
    app.send_key(Key::Enter);

    let editor = app.editor().unwrap();
    let Some(EditorPopup::CategoryForm(ref form)) = editor.popup else {
        panic!("expected category form, got {:?}", editor.popup);
    };
    assert!(form.error.is_some());
    assert_eq!(editor.selector.selected_category_id(), NO_CATEGORY_ID);

    app.send_key(Key::Esc);
    assert!(app.editor().unwrap().popup.is_none());
    assert!(app.store().get_category_by_id(4).is_none());
}

#[test]
fn test_navigate_back_discards_changes() {
    let mut app = TestApp::new();
    open_editor(&mut app, 1);

    app.send_key(Key::Char('s'));
    app.send_key(Key::Esc);

    app.assert_screen_type(blotter_discriminant());
    assert_eq!(app.store().transaction(1).unwrap().category_id, 2);
}

#[test]
fn test_unknown_transaction_reports_error() {
    let mut app = TestApp::new();

    app.execute(AppCommand::OpenEditor {
        transaction_id: 999,
    });

    app.assert_screen_type(blotter_discriminant());
    let status = app.state().status.as_ref().unwrap();
    assert!(status.is_error);
    assert!(status.text.contains("999"));
    // Loaded rows stay visible
    assert_eq!(app.state().blotter().unwrap().loading, LoadingState::Loaded);
}

#[test]
fn test_save_failure_keeps_editor() {
    let mut app = TestApp::new();
    open_editor(&mut app, 1);

    app.send_data_event(DataEvent::TransactionSaveFailed {
        transaction_id: 1,
        error: "disk full".to_string(),
    });

    assert!(app.editor().is_some());
    let status = app.state().status.as_ref().unwrap();
    assert!(status.is_error);
    assert_eq!(status.text, "Save failed: disk full");
}

#[test]
fn test_logs_navigation() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('l')]);
    assert!(matches!(app.state().current_screen(), Screen::Logs(_)));

    app.send_key(Key::Char('h'));
    app.assert_screen_type(blotter_discriminant());
}

#[test]
fn test_empty_store_shows_no_rows() {
    let app = TestApp::with_store(MemoryStore::default(), Settings::default());

    let blotter = app.state().blotter().unwrap();
    assert!(blotter.records.is_empty());
    assert!(blotter.selected_record().is_none());
}

#[test]
fn test_persisting_handler_writes_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, serde_json::to_string(&sample_store_data()).unwrap()).unwrap();

    let store: Rc<dyn Database> = Rc::new(MemoryStore::open(&path).unwrap());
    let state = AppState::new(Rc::clone(&store), Settings::default());
    let mut core = AppCore::new(state, PersistingHandler::new(Rc::clone(&store)));
    core.execute(AppCommand::LoadBlotter);

    core.execute(AppCommand::OpenEditor { transaction_id: 2 });
    core.handle_key(KeyEvent::new(Key::Char('s')));
    core.handle_key(KeyEvent::with_ctrl(Key::Char('s')));
    assert!(core.state().status.as_ref().is_some_and(|s| !s.is_error));

    let reopened = MemoryStore::open(&path).unwrap();
    assert_eq!(
        reopened.transaction(2).unwrap().category_id,
        SPLIT_CATEGORY_ID
    );
}
