//! Input rows for category attributes.

use ledger_db::entities::{
    attributes::{Attribute, AttributeType, TransactionAttribute},
    AttributeId,
};
use std::fmt;

/// Editable input bound to one attribute
pub trait AttributeView: fmt::Debug {
    fn attribute(&self) -> &Attribute;

    /// Current value as stored on the transaction
    fn value(&self) -> String;

    /// Value as shown in the row
    fn display_value(&self) -> String {
        self.value()
    }

    fn input_char(&mut self, _c: char) {}

    fn delete_char(&mut self) {}

    /// Step through choices (list) or toggle (checkbox)
    fn cycle(&mut self, _forward: bool) {}

    fn new_transaction_attribute(&self) -> TransactionAttribute {
        TransactionAttribute {
            attribute_id: self.attribute().id,
            value: self.value(),
        }
    }
}

/// Creates the input matching an attribute's type, seeded with `value`
pub trait AttributeViewFactory {
    fn create_view(&self, attribute: &Attribute, value: Option<&str>) -> Box<dyn AttributeView>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAttributeViews;

impl AttributeViewFactory for DefaultAttributeViews {
    fn create_view(&self, attribute: &Attribute, value: Option<&str>) -> Box<dyn AttributeView> {
        let attribute = attribute.clone();
        match attribute.kind {
            AttributeType::Text => Box::new(TextAttributeView::new(attribute, value)),
            AttributeType::Number => Box::new(NumberAttributeView::new(attribute, value)),
            AttributeType::List => Box::new(ListAttributeView::new(attribute, value)),
            AttributeType::Checkbox => Box::new(CheckboxAttributeView::new(attribute, value)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextAttributeView {
    attribute: Attribute,
    text: String,
}

impl TextAttributeView {
    pub fn new(attribute: Attribute, value: Option<&str>) -> Self {
        Self {
            attribute,
            text: value.unwrap_or_default().to_string(),
        }
    }
}

impl AttributeView for TextAttributeView {
    fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    fn value(&self) -> String {
        self.text.clone()
    }

    fn input_char(&mut self, c: char) {
        self.text.push(c);
    }

    fn delete_char(&mut self) {
        self.text.pop();
    }
}

/// Accepts digits, one decimal point and a leading minus
#[derive(Debug, Clone)]
pub struct NumberAttributeView {
    attribute: Attribute,
    text: String,
}

impl NumberAttributeView {
    pub fn new(attribute: Attribute, value: Option<&str>) -> Self {
        let text = value
            .filter(|v| v.trim().parse::<f64>().is_ok())
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        Self { attribute, text }
    }
}

impl AttributeView for NumberAttributeView {
    fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    fn value(&self) -> String {
        self.text.clone()
    }

    fn input_char(&mut self, c: char) {
        let accepted = c.is_ascii_digit()
            || (c == '.' && !self.text.contains('.'))
            || (c == '-' && self.text.is_empty());
        if accepted {
            self.text.push(c);
        }
    }

    fn delete_char(&mut self) {
        self.text.pop();
    }
}

#[derive(Debug, Clone)]
pub struct ListAttributeView {
    attribute: Attribute,
    selected: Option<usize>,
}

impl ListAttributeView {
    pub fn new(attribute: Attribute, value: Option<&str>) -> Self {
        let selected = value.and_then(|v| attribute.list_values.iter().position(|e| e == v));
        Self {
            attribute,
            selected,
        }
    }
}

impl AttributeView for ListAttributeView {
    fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    fn value(&self) -> String {
        self.selected
            .and_then(|i| self.attribute.list_values.get(i))
            .cloned()
            .unwrap_or_default()
    }

    fn display_value(&self) -> String {
        match self.selected {
            Some(_) => format!("< {} >", self.value()),
            None => "< - >".to_string(),
        }
    }

    fn cycle(&mut self, forward: bool) {
        let len = self.attribute.list_values.len();
        if len == 0 {
            return;
        }
        self.selected = Some(match (self.selected, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        });
    }
}

#[derive(Debug, Clone)]
pub struct CheckboxAttributeView {
    attribute: Attribute,
    checked: bool,
}

impl CheckboxAttributeView {
    pub fn new(attribute: Attribute, value: Option<&str>) -> Self {
        let checked = matches!(value.map(str::trim), Some("true") | Some("1"));
        Self { attribute, checked }
    }
}

impl AttributeView for CheckboxAttributeView {
    fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    fn value(&self) -> String {
        self.checked.to_string()
    }

    fn display_value(&self) -> String {
        let mark = if self.checked { "[x]" } else { "[ ]" };
        mark.to_string()
    }

    fn input_char(&mut self, c: char) {
        if c == ' ' {
            self.checked = !self.checked;
        }
    }

    fn cycle(&mut self, _forward: bool) {
        self.checked = !self.checked;
    }
}

/// Vertical container of attribute inputs with an optional focused row
#[derive(Debug, Default)]
pub struct AttributesPanel {
    rows: Vec<Box<dyn AttributeView>>,
    focused: Option<usize>,
}

impl AttributesPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.focused = None;
    }

    pub fn push(&mut self, view: Box<dyn AttributeView>) {
        self.rows.push(view);
    }

    pub fn rows(&self) -> &[Box<dyn AttributeView>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Move focus to the next (or previous) attribute input, wrapping around
    pub fn focus_next(&mut self, forward: bool) {
        let len = self.rows.len();
        if len == 0 {
            self.focused = None;
            return;
        }

        self.focused = Some(match (self.focused, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        });
    }

    pub fn focus_last(&mut self) {
        self.focused = self.rows.len().checked_sub(1);
    }

    pub fn unfocus(&mut self) {
        self.focused = None;
    }

    pub fn focused_view_mut(&mut self) -> Option<&mut Box<dyn AttributeView>> {
        let index = self.focused?;
        self.rows.get_mut(index)
    }

    pub fn view(&self, attribute_id: AttributeId) -> Option<&dyn AttributeView> {
        self.rows
            .iter()
            .find(|view| view.attribute().id == attribute_id)
            .map(|view| view.as_ref())
    }

    /// One value per attribute input, in row order
    pub fn collect(&self) -> Vec<TransactionAttribute> {
        self.rows
            .iter()
            .map(|view| view.new_transaction_attribute())
            .collect()
    }
}
