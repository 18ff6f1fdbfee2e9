use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::executor;
use crate::config::Settings;
use crate::events::{AppCommand, DataEvent};
use crate::input::{Key, KeyEvent};
use crate::state::{reducer, AppState, EditorState};
use crate::ui::screens::Screen;
use ledger_db::{MemoryStore, StoreData};
use std::rc::Rc;

/// Runs commands against the in-memory store without touching disk
#[derive(Debug, Default)]
pub struct MockDataHandler {
    pub executed: Vec<AppCommand>,
}

impl MockDataHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        self.executed.push(command.clone());
        for event in executor::execute_command(command, state) {
            reducer::reduce_data_event(state, event);
        }
    }
}

/// Small ledger used by tests: two top-level categories with one child,
/// attributes on both levels and three transactions.
pub fn sample_store_data() -> StoreData {
    let data = serde_json::json!({
        "categories": [
            { "id": 1, "title": "Groceries" },
            { "id": 2, "title": "Bakery", "parent_id": 1 },
            { "id": 3, "title": "Utilities" }
        ],
        "attributes": [
            { "id": 10, "title": "Receipt", "type": "checkbox", "category_id": 1 },
            { "id": 11, "title": "Loaf", "type": "list", "category_id": 2,
              "list_values": ["Rye", "Sourdough"], "default_value": "Rye" },
            { "id": 12, "title": "Meter", "type": "number", "category_id": 3 }
        ],
        "currencies": [
            { "id": 1, "code": "USD", "symbol": "$", "symbol_format": "left" },
            { "id": 2, "code": "EUR", "symbol": "€" }
        ],
        "transactions": [
            { "id": 1, "datetime": "2024-03-01T09:00:00", "from_account_id": 1,
              "from_account_title": "Checking", "from_account_currency_id": 1,
              "from_amount": -4250, "category_id": 2, "payee": "Corner Bakery",
              "category_attributes": { "10": "true", "11": "Sourdough" } },
            { "id": 2, "datetime": "2024-03-02T18:30:00", "from_account_id": 1,
              "from_account_title": "Checking", "from_account_currency_id": 1,
              "from_amount": 250000, "note": "Salary" },
            { "id": 3, "datetime": "2024-03-03T08:15:00", "from_account_id": 1,
              "from_account_title": "Checking", "from_account_currency_id": 1,
              "from_amount": -10000, "to_account_id": 2, "to_account_title": "Savings",
              "original_currency_id": 2, "original_from_amount": -9200 }
        ]
    });

    match serde_json::from_value(data) {
        Ok(data) => data,
        Err(e) => panic!("sample data does not match the store format: {}", e),
    }
}

pub struct TestApp {
    core: AppCore<MockDataHandler>,
    store: Rc<MemoryStore>,
}

impl TestApp {
    /// Test app over the sample ledger with the blotter loaded
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        match MemoryStore::from_data(sample_store_data()) {
            Ok(store) => Self::with_store(store, settings),
            Err(e) => panic!("sample data rejected: {}", e),
        }
    }

    pub fn with_store(store: MemoryStore, settings: Settings) -> Self {
        let store = Rc::new(store);
        let state = AppState::new(Rc::clone(&store) as Rc<dyn ledger_db::Database>, settings);
        let mut core = AppCore::new(state, MockDataHandler::new());
        core.execute(AppCommand::LoadBlotter);
        Self { core, store }
    }

    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Type a string one character at a time
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(Key::Char(c));
        }
    }

    /// Run a command without going through key handling
    pub fn execute(&mut self, command: AppCommand) {
        self.core.execute(command);
    }

    /// Inject a data event
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn editor(&self) -> Option<&EditorState> {
        match self.state().current_screen() {
            Screen::Editor(editor) => Some(editor),
            _ => None,
        }
    }

    /// Assert that the app is on a specific screen type
    pub fn assert_screen_type(&self, expected_discriminant: std::mem::Discriminant<Screen>) {
        let current = self.state().current_screen();
        assert_eq!(
            std::mem::discriminant(current),
            expected_discriminant,
            "Expected different screen. Current: {:?}",
            current
        );
    }

    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
