pub mod reducer;

use crate::blotter::{CurrencyCache, RenderContext};
use crate::config::Settings;
use crate::selector::{
    items::CategoryItem, CategorySelector, SelectionChanged,
};
use crate::ui::screens::Screen;
use ledger_db::entities::{transactions::BlotterRecord, CategoryId, TransactionId};
use ledger_db::Database;
use ratatui::widgets::TableState;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Receiver;

#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loaded,
    Error(String),
}

/// One-line feedback shown under the screen title
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub store: Rc<dyn Database>,
    pub settings: Settings,

    /// Root screen; never popped
    pub home: Screen,
    /// Screens pushed on top of `home`
    pub history: Vec<Screen>,

    // UI state
    pub help_visible: bool,
    pub pending_key: Option<char>,
    pub status: Option<StatusMessage>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new(store: Rc<dyn Database>, settings: Settings) -> Self {
        let blotter = BlotterState::new(Rc::clone(&store));
        Self {
            store,
            settings,
            home: Screen::Blotter(blotter),
            history: Vec::new(),
            help_visible: false,
            pending_key: None,
            status: None,
            should_quit: false,
        }
    }

    pub fn current_screen(&self) -> &Screen {
        self.history.last().unwrap_or(&self.home)
    }

    pub fn current_screen_mut(&mut self) -> &mut Screen {
        self.history.last_mut().unwrap_or(&mut self.home)
    }

    pub fn blotter(&self) -> Option<&BlotterState> {
        match &self.home {
            Screen::Blotter(blotter) => Some(blotter),
            _ => None,
        }
    }

    pub fn blotter_mut(&mut self) -> Option<&mut BlotterState> {
        match &mut self.home {
            Screen::Blotter(blotter) => Some(blotter),
            _ => None,
        }
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len() + 1,
            self.history.len() + 2
        );
        self.history.push(screen);
    }

    /// Pop the current screen. Returns false when already at home.
    pub fn navigate_back(&mut self) -> bool {
        if self.history.pop().is_some() {
            tracing::debug!("Navigated back, stack depth: {}", self.history.len() + 1);
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::from_settings(&self.settings, chrono::Local::now().naive_local())
    }
}

pub struct BlotterState {
    pub records: Vec<BlotterRecord>,
    pub loading: LoadingState,
    pub table_state: RefCell<TableState>,
    pub currencies: CurrencyCache<dyn Database>,
}

impl BlotterState {
    pub fn new(store: Rc<dyn Database>) -> Self {
        Self {
            records: Vec::new(),
            loading: LoadingState::default(),
            table_state: RefCell::default(),
            currencies: CurrencyCache::new(store),
        }
    }

    pub fn selected_record(&self) -> Option<&BlotterRecord> {
        let index = self.table_state.borrow().selected()?;
        self.records.get(index)
    }

    /// Replace the rows, keeping the selection on the same transaction when
    /// it is still present
    pub fn replace_records(&mut self, records: Vec<BlotterRecord>) {
        let previous = self.selected_record().map(|r| r.id);
        self.records = records;
        self.currencies.clear();

        let index = previous
            .and_then(|id| self.records.iter().position(|r| r.id == id))
            .or(if self.records.is_empty() { None } else { Some(0) });
        self.table_state.borrow_mut().select(index);
        self.loading = LoadingState::Loaded;
    }
}

impl std::fmt::Debug for BlotterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlotterState")
            .field("records", &self.records.len())
            .field("loading", &self.loading)
            .field("selected", &self.table_state.borrow().selected())
            .finish_non_exhaustive()
    }
}

/// How a picked id is handed back to the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    /// Answers as a screen result
    Tree,
    /// Answers through the quick-select callback
    QuickList,
}

#[derive(Debug)]
pub struct PickerState {
    pub mode: PickerMode,
    pub items: Vec<CategoryItem>,
    pub table_state: RefCell<TableState>,
}

impl PickerState {
    pub fn new(mode: PickerMode, items: Vec<CategoryItem>, position: Option<usize>) -> Self {
        let selected = position.or(if items.is_empty() { None } else { Some(0) });
        Self {
            mode,
            items,
            table_state: RefCell::new(TableState::default().with_selected(selected)),
        }
    }

    pub fn highlighted(&self) -> Option<&CategoryItem> {
        let index = self.table_state.borrow().selected()?;
        self.items.get(index)
    }
}

#[derive(Debug, Default)]
pub struct CategoryFormState {
    pub title: String,
    /// Candidate parents (real categories only)
    pub parents: Vec<CategoryItem>,
    pub parent_index: Option<usize>,
    pub error: Option<String>,
}

impl CategoryFormState {
    pub fn new(parents: Vec<CategoryItem>) -> Self {
        Self {
            parents,
            ..Default::default()
        }
    }

    pub fn parent(&self) -> Option<&CategoryItem> {
        self.parents.get(self.parent_index?)
    }

    pub fn parent_id(&self) -> Option<CategoryId> {
        self.parent().map(CategoryItem::id)
    }

    /// Step through "no parent" followed by every candidate
    pub fn cycle_parent(&mut self, forward: bool) {
        let len = self.parents.len();
        if len == 0 {
            return;
        }
        self.parent_index = match (self.parent_index, forward) {
            (None, true) => Some(0),
            (None, false) => Some(len - 1),
            (Some(i), true) if i + 1 < len => Some(i + 1),
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
            (Some(_), true) => None,
        };
    }
}

#[derive(Debug)]
pub enum EditorPopup {
    Picker(PickerState),
    CategoryForm(CategoryFormState),
}

/// Category editor for one transaction
#[derive(Debug)]
pub struct EditorState {
    pub record: BlotterRecord,
    pub selector: CategorySelector<dyn Database>,
    pub selection_rx: Receiver<SelectionChanged>,
    pub popup: Option<EditorPopup>,
}

impl EditorState {
    pub fn new(
        record: BlotterRecord,
        selector: CategorySelector<dyn Database>,
        selection_rx: Receiver<SelectionChanged>,
    ) -> Self {
        Self {
            record,
            selector,
            selection_rx,
            popup: None,
        }
    }

    pub fn transaction_id(&self) -> TransactionId {
        self.record.id
    }

    /// Apply pending selection changes: rebuild the attribute rows and,
    /// when asked to, focus the last one.
    pub fn sync_attributes(&mut self) {
        while let Ok(change) = self.selection_rx.try_recv() {
            tracing::debug!(
                "Category changed to {} on transaction {}",
                change.category.title(),
                self.record.id
            );
            self.selector.add_attributes(&self.record);
            if change.select_last {
                if let Some(panel) = self.selector.attributes_panel_mut() {
                    panel.focus_last();
                }
            }
        }
    }

    pub fn attribute_focused(&self) -> bool {
        self.selector
            .attributes_panel()
            .and_then(|panel| panel.focused())
            .is_some()
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

pub trait Scrollable {
    fn num_items(&self) -> usize;
    fn table_state(&self) -> &RefCell<TableState>;

    fn select_prev(&mut self) {
        let mut table_state = self.table_state().borrow_mut();
        if self.num_items() > 0 {
            if table_state.selected().unwrap_or(0) == 0 {
                table_state.select(Some(self.num_items() - 1));
            } else {
                table_state.scroll_up_by(1)
            }
        }
    }

    fn select_next(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            if table_state.selected().unwrap_or(num_items - 1) == num_items - 1 {
                table_state.select_first();
            } else {
                table_state.scroll_down_by(1)
            }
        }
    }

    fn select_first(&mut self) {
        if self.num_items() > 0 {
            self.table_state().borrow_mut().select(Some(0));
        }
    }

    fn select_last(&mut self) {
        let num_items = self.num_items();
        if num_items > 0 {
            self.table_state().borrow_mut().select(Some(num_items - 1));
        }
    }
}

impl Scrollable for BlotterState {
    fn num_items(&self) -> usize {
        self.records.len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

impl Scrollable for PickerState {
    fn num_items(&self) -> usize {
        self.items.len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}
