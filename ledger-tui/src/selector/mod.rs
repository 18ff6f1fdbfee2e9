//! Category picker for the transaction editor.
//!
//! Holds the flattened category list with its sentinel entries, tracks the
//! selected category and renders the attribute inputs that belong to it.
//! Navigation to child screens is left to the host: clicks return a
//! [`SelectorAction`] and the outcome comes back through
//! [`CategorySelector::on_screen_result`].

pub mod attributes;
pub mod items;
pub mod result;

use attributes::{AttributeViewFactory, AttributesPanel};
use items::{build_items, CategoryItem};
use ledger_db::entities::{
    attributes::TransactionAttribute, transactions::BlotterRecord, CategoryId, NO_CATEGORY_ID,
    SPLIT_CATEGORY_ID,
};
use ledger_db::{AttributeRepository, CategoryRepository, DbError};
use result::{Payload, RequestCode, ResultCode, CATEGORY_ID_KEY, SELECTED_CATEGORY_ID_KEY};
use std::fmt;
use std::rc::Rc;
use std::sync::mpsc::Sender;

/// Notified whenever the selection actually changes
pub trait CategorySelectorListener {
    fn on_category_selected(&mut self, category: &CategoryItem, select_last: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged {
    pub category: CategoryItem,
    pub select_last: bool,
}

impl CategorySelectorListener for Sender<SelectionChanged> {
    fn on_category_selected(&mut self, category: &CategoryItem, select_last: bool) {
        let event = SelectionChanged {
            category: category.clone(),
            select_last,
        };
        if self.send(event).is_err() {
            tracing::debug!("Selection listener dropped, event discarded");
        }
    }
}

/// Clickable parts of the category node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Category,
    AddCategory,
    Split,
}

/// What the host should open in response to a click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorAction {
    /// Hierarchical picker; answers with [`RequestCode::CategoryPick`]
    OpenTreePicker {
        selected_id: CategoryId,
        show_split: bool,
    },
    /// Flat list positioned on the current selection; answers through
    /// [`CategorySelector::on_selected_id`]
    OpenQuickList { position: Option<usize> },
    /// Category creation screen; answers with [`RequestCode::CategoryAdd`]
    OpenCategoryEditor,
}

/// Which affordances the category node shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeKind {
    /// Label is tracked but not displayed
    #[default]
    Hidden,
    WithSplitButton,
    WithAddButton,
}

impl NodeKind {
    pub fn offers_add(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn offers_split(&self) -> bool {
        matches!(self, Self::WithSplitButton)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorSettings {
    pub fetch_all_categories: bool,
    pub show_split_category: bool,
    pub use_tree_picker: bool,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            fetch_all_categories: true,
            show_split_category: true,
            use_tree_picker: true,
        }
    }
}

impl From<&crate::config::Settings> for SelectorSettings {
    fn from(settings: &crate::config::Settings) -> Self {
        Self {
            fetch_all_categories: settings.fetch_all_categories,
            show_split_category: settings.show_split_category,
            use_tree_picker: settings.use_tree_picker,
        }
    }
}

pub struct CategorySelector<R: ?Sized> {
    repository: Rc<R>,
    views: Box<dyn AttributeViewFactory>,
    settings: SelectorSettings,
    node: NodeKind,
    label: String,
    items: Vec<CategoryItem>,
    /// Whether any category has a parent
    nested: bool,
    selected: CategoryItem,
    listener: Option<Box<dyn CategorySelectorListener>>,
    attributes: Option<AttributesPanel>,
}

impl<R> CategorySelector<R>
where
    R: CategoryRepository + AttributeRepository + ?Sized,
{
    pub fn new(
        repository: Rc<R>,
        views: Box<dyn AttributeViewFactory>,
        settings: SelectorSettings,
    ) -> Self {
        Self {
            repository,
            views,
            settings,
            node: NodeKind::Hidden,
            label: CategoryItem::NoCategory.label(),
            items: Vec::new(),
            nested: false,
            selected: CategoryItem::NoCategory,
            listener: None,
            attributes: None,
        }
    }

    pub fn set_listener(&mut self, listener: Box<dyn CategorySelectorListener>) {
        self.listener = Some(listener);
    }

    pub fn do_not_show_split_category(&mut self) {
        self.settings.show_split_category = false;
    }

    /// Rebuild the selectable list from the repository
    pub fn fetch_categories(&mut self) -> Result<(), DbError> {
        let tree = self.repository.load_categories()?;
        self.items = build_items(&tree, self.settings.fetch_all_categories);
        self.nested = tree.is_nested();
        tracing::debug!("Loaded {} category items", self.items.len());
        Ok(())
    }

    pub fn create_node(&mut self, show_split_button: bool) {
        self.node = if show_split_button {
            NodeKind::WithSplitButton
        } else {
            NodeKind::WithAddButton
        };
        self.label = CategoryItem::NoCategory.label();
    }

    pub fn create_dummy_node(&mut self) {
        self.node = NodeKind::Hidden;
    }

    pub fn create_attributes_layout(&mut self) {
        self.attributes = Some(AttributesPanel::new());
    }

    pub fn on_click(&mut self, target: ClickTarget) -> Option<SelectorAction> {
        match target {
            ClickTarget::Category => {
                // A flat list gains nothing from the tree picker
                if self.settings.use_tree_picker && self.nested {
                    Some(SelectorAction::OpenTreePicker {
                        selected_id: self.selected.id(),
                        show_split: self.settings.show_split_category,
                    })
                } else {
                    let selected_id = self.selected.id();
                    let position = self.items.iter().position(|i| i.id() == selected_id);
                    Some(SelectorAction::OpenQuickList { position })
                }
            }
            ClickTarget::AddCategory => Some(SelectorAction::OpenCategoryEditor),
            ClickTarget::Split => {
                self.select_category(SPLIT_CATEGORY_ID);
                None
            }
        }
    }

    /// Quick-list selection callback
    pub fn on_selected_id(&mut self, target: ClickTarget, selected_id: CategoryId) {
        if target == ClickTarget::Category {
            self.select_category(selected_id);
        }
    }

    pub fn on_screen_result(
        &mut self,
        request: RequestCode,
        result: ResultCode,
        payload: &Payload,
    ) -> Result<(), DbError> {
        if result != ResultCode::Ok {
            tracing::debug!("{:?} finished with {:?}, ignoring", request, result);
            return Ok(());
        }

        match request {
            RequestCode::CategoryAdd => {
                self.fetch_categories()?;
                if let Some(category_id) = payload.get(CATEGORY_ID_KEY) {
                    self.select_category(category_id);
                }
            }
            RequestCode::CategoryPick => {
                let category_id = payload.get_or(SELECTED_CATEGORY_ID_KEY, NO_CATEGORY_ID);
                self.select_category(category_id);
            }
        }
        Ok(())
    }

    pub fn select_category(&mut self, category_id: CategoryId) {
        self.select_category_with(category_id, true);
    }

    /// Select by id. Re-selecting the current id and unknown ids are no-ops.
    pub fn select_category_with(&mut self, category_id: CategoryId, select_last: bool) {
        if self.selected.id() == category_id {
            return;
        }

        let Some(category) = self.resolve(category_id) else {
            tracing::debug!("Category {} not found, selection unchanged", category_id);
            return;
        };

        self.label = category.label();
        self.selected = category;
        tracing::debug!("Selected category {} ({})", category_id, self.label);

        if let Some(listener) = self.listener.as_mut() {
            listener.on_category_selected(&self.selected, select_last);
        }
    }

    fn resolve(&self, category_id: CategoryId) -> Option<CategoryItem> {
        match category_id {
            SPLIT_CATEGORY_ID => Some(CategoryItem::Split),
            NO_CATEGORY_ID => Some(CategoryItem::NoCategory),
            id => self
                .repository
                .get_category_by_id(id)
                .map(CategoryItem::Category),
        }
    }

    /// Replace the attribute rows with inputs for the selected category,
    /// seeded from the transaction or each attribute's default.
    pub fn add_attributes(&mut self, transaction: &BlotterRecord) {
        let Some(panel) = self.attributes.as_mut() else {
            tracing::debug!("No attributes layout, skipping attribute rows");
            return;
        };
        panel.clear();

        let category_id = self.selected.id();
        for attribute in self.repository.attributes_for_category(category_id) {
            let value = transaction
                .category_attributes
                .get(&attribute.id)
                .map(String::as_str)
                .or(attribute.default_value.as_deref());
            let view = self.views.create_view(&attribute, value);
            panel.push(view);
        }
    }

    pub fn attributes(&self) -> Vec<TransactionAttribute> {
        self.attributes
            .as_ref()
            .map(AttributesPanel::collect)
            .unwrap_or_default()
    }

    pub fn attributes_panel(&self) -> Option<&AttributesPanel> {
        self.attributes.as_ref()
    }

    pub fn attributes_panel_mut(&mut self) -> Option<&mut AttributesPanel> {
        self.attributes.as_mut()
    }

    pub fn selected_category_id(&self) -> CategoryId {
        self.selected.id()
    }

    pub fn selected_category(&self) -> &CategoryItem {
        &self.selected
    }

    pub fn is_split_category_selected(&self) -> bool {
        self.selected.is_split()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn node(&self) -> NodeKind {
        self.node
    }

    pub fn items(&self) -> &[CategoryItem] {
        &self.items
    }

    pub fn settings(&self) -> SelectorSettings {
        self.settings
    }
}

impl<R: ?Sized> fmt::Debug for CategorySelector<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategorySelector")
            .field("settings", &self.settings)
            .field("node", &self.node)
            .field("label", &self.label)
            .field("items", &self.items.len())
            .field("selected", &self.selected)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::attributes::DefaultAttributeViews;
    use super::*;
    use chrono::NaiveDate;
    use ledger_db::entities::attributes::{Attribute, AttributeType};
    use ledger_db::entities::categories::Category;
    use ledger_db::{MemoryStore, StoreData};
    use std::sync::mpsc::{channel, Receiver};

    fn store() -> Rc<MemoryStore> {
        Rc::new(
            MemoryStore::from_data(StoreData {
                categories: vec![
                    Category::new(1, "Food"),
                    Category::new(2, "Restaurants").with_parent(1),
                    Category::new(3, "Transport"),
                ],
                attributes: vec![
                    Attribute::new(10, "Receipt", AttributeType::Checkbox, 1),
                    Attribute::new(11, "Guests", AttributeType::Number, 2).with_default("2"),
                    Attribute::new(12, "Vehicle", AttributeType::List, 3)
                        .with_list_values(["Bus", "Taxi"]),
                ],
                ..Default::default()
            })
            .unwrap(),
        )
    }

    fn selector_with(
        settings: SelectorSettings,
    ) -> (CategorySelector<MemoryStore>, Receiver<SelectionChanged>) {
        let (tx, rx) = channel();
        let mut selector = CategorySelector::new(store(), Box::new(DefaultAttributeViews), settings);
        selector.set_listener(Box::new(tx));
        selector.create_node(true);
        selector.create_attributes_layout();
        selector.fetch_categories().unwrap();
        (selector, rx)
    }

    fn selector() -> (CategorySelector<MemoryStore>, Receiver<SelectionChanged>) {
        selector_with(SelectorSettings::default())
    }

    fn transaction() -> BlotterRecord {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        BlotterRecord::new(1, at, 1, "Cash")
    }

    #[test]
    fn test_initial_state_is_no_category() {
        let (selector, rx) = selector();
        assert_eq!(selector.selected_category_id(), NO_CATEGORY_ID);
        assert_eq!(selector.label(), "No category");
        assert!(!selector.is_split_category_selected());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_item_positions_follow_fetch_mode() {
        let (all, _) = selector();
        assert_eq!(all.items()[0], CategoryItem::Split);
        assert_eq!(all.items()[1], CategoryItem::NoCategory);

        let (plain, _) = selector_with(SelectorSettings {
            fetch_all_categories: false,
            ..Default::default()
        });
        assert_eq!(plain.items()[0], CategoryItem::NoCategory);
        assert!(!plain.items().iter().any(CategoryItem::is_split));
    }

    #[test]
    fn test_select_updates_label_and_notifies() {
        let (mut selector, rx) = selector();
        selector.select_category(2);

        assert_eq!(selector.selected_category_id(), 2);
        assert_eq!(selector.label(), "-- Restaurants");

        let event = rx.try_recv().unwrap();
        assert_eq!(event.category.id(), 2);
        assert!(event.select_last);
    }

    #[test]
    fn test_select_same_id_twice_notifies_once() {
        let (mut selector, rx) = selector();
        selector.select_category_with(3, false);
        selector.select_category_with(3, true);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert!(!events[0].select_last);
    }

    #[test]
    fn test_select_unknown_id_is_ignored() {
        let (mut selector, rx) = selector();
        selector.select_category(1);
        let _ = rx.try_recv();

        for stale in [4, 99, -7] {
            selector.select_category(stale);
        }

        assert_eq!(selector.selected_category_id(), 1);
        assert_eq!(selector.label(), "Food");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_split_click_selects_split() {
        let (mut selector, rx) = selector();
        assert_eq!(selector.on_click(ClickTarget::Split), None);

        assert!(selector.is_split_category_selected());
        assert_eq!(selector.label(), "Split");
        assert!(rx.try_recv().unwrap().category.is_split());
    }

    #[test]
    fn test_category_click_opens_tree_picker() {
        let (mut selector, _) = selector();
        selector.do_not_show_split_category();
        selector.select_category(3);

        assert_eq!(
            selector.on_click(ClickTarget::Category),
            Some(SelectorAction::OpenTreePicker {
                selected_id: 3,
                show_split: false
            })
        );
    }

    #[test]
    fn test_category_click_opens_quick_list_at_selection() {
        let (mut selector, _) = selector_with(SelectorSettings {
            use_tree_picker: false,
            ..Default::default()
        });
        selector.select_category(3);

        // Split, No category, Food, Restaurants, Transport
        assert_eq!(
            selector.on_click(ClickTarget::Category),
            Some(SelectorAction::OpenQuickList { position: Some(4) })
        );

        selector.on_selected_id(ClickTarget::Category, 1);
        assert_eq!(selector.selected_category_id(), 1);

        selector.on_selected_id(ClickTarget::AddCategory, 2);
        assert_eq!(selector.selected_category_id(), 1);
    }

    #[test]
    fn test_flat_hierarchy_uses_quick_list() {
        let flat = Rc::new(
            MemoryStore::from_data(StoreData {
                categories: vec![Category::new(1, "Food"), Category::new(2, "Transport")],
                ..Default::default()
            })
            .unwrap(),
        );
        let mut selector = CategorySelector::new(
            flat,
            Box::new(DefaultAttributeViews),
            SelectorSettings::default(),
        );
        selector.fetch_categories().unwrap();
        selector.select_category(2);

        // Split, No category, Food, Transport
        assert_eq!(
            selector.on_click(ClickTarget::Category),
            Some(SelectorAction::OpenQuickList { position: Some(3) })
        );
    }

    #[test]
    fn test_add_click_opens_editor() {
        let (mut selector, _) = selector();
        assert_eq!(
            selector.on_click(ClickTarget::AddCategory),
            Some(SelectorAction::OpenCategoryEditor)
        );
    }

    #[test]
    fn test_category_add_result_reloads_and_selects() {
        let (mut selector, rx) = selector();
        let repository = Rc::clone(&selector.repository);
        let new_id = repository
            .insert_category(ledger_db::entities::categories::NewCategory::new("Health"))
            .unwrap();

        selector
            .on_screen_result(
                RequestCode::CategoryAdd,
                ResultCode::Ok,
                &Payload::new().with(CATEGORY_ID_KEY, new_id),
            )
            .unwrap();

        assert!(selector.items().iter().any(|i| i.id() == new_id));
        assert_eq!(selector.selected_category_id(), new_id);
        assert_eq!(rx.try_recv().unwrap().category.title(), "Health");
    }

    #[test]
    fn test_category_add_result_without_id_only_reloads() {
        let (mut selector, rx) = selector();
        selector
            .on_screen_result(RequestCode::CategoryAdd, ResultCode::Ok, &Payload::new())
            .unwrap();
        assert_eq!(selector.selected_category_id(), NO_CATEGORY_ID);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_pick_result_selects_and_cancel_is_ignored() {
        let (mut selector, _) = selector();
        selector
            .on_screen_result(
                RequestCode::CategoryPick,
                ResultCode::Canceled,
                &Payload::new().with(SELECTED_CATEGORY_ID_KEY, 3),
            )
            .unwrap();
        assert_eq!(selector.selected_category_id(), NO_CATEGORY_ID);

        selector
            .on_screen_result(
                RequestCode::CategoryPick,
                ResultCode::Ok,
                &Payload::new().with(SELECTED_CATEGORY_ID_KEY, 3),
            )
            .unwrap();
        assert_eq!(selector.selected_category_id(), 3);

        // Missing key falls back to "no category"
        selector
            .on_screen_result(RequestCode::CategoryPick, ResultCode::Ok, &Payload::new())
            .unwrap();
        assert_eq!(selector.selected_category_id(), NO_CATEGORY_ID);
    }

    #[test]
    fn test_add_attributes_uses_transaction_values_then_defaults() {
        let (mut selector, _) = selector();
        selector.select_category(2);
        selector.add_attributes(&transaction().attribute(10, "true"));

        let panel = selector.attributes_panel().unwrap();
        assert_eq!(panel.len(), 2);
        assert_eq!(panel.view(10).unwrap().value(), "true");
        assert_eq!(panel.view(11).unwrap().value(), "2");
    }

    #[test]
    fn test_add_attributes_replaces_previous_rows() {
        let (mut selector, _) = selector();
        selector.select_category(2);
        selector.add_attributes(&transaction());
        selector.select_category(3);
        selector.add_attributes(&transaction());

        let collected = selector.attributes();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].attribute_id, 12);
        assert_eq!(collected[0].value, "");
    }

    #[test]
    fn test_sentinels_have_no_attributes() {
        let (mut selector, _) = selector();
        selector.on_click(ClickTarget::Split);
        selector.add_attributes(&transaction());
        assert!(selector.attributes().is_empty());
    }

    #[test]
    fn test_attributes_without_layout() {
        let mut selector =
            CategorySelector::new(store(), Box::new(DefaultAttributeViews), SelectorSettings::default());
        selector.select_category(2);
        selector.add_attributes(&transaction());
        assert!(selector.attributes().is_empty());
        assert!(selector.attributes_panel().is_none());
    }

    #[test]
    fn test_dummy_node() {
        let (mut selector, _) = selector();
        assert_eq!(selector.node(), NodeKind::WithSplitButton);
        assert!(selector.node().offers_split());

        selector.create_node(false);
        assert!(selector.node().offers_add());
        assert!(!selector.node().offers_split());

        selector.create_dummy_node();
        assert_eq!(selector.node(), NodeKind::Hidden);
        assert!(!selector.node().offers_add());
        selector.select_category(1);
        assert_eq!(selector.label(), "Food");
    }
}
