//! Results handed back by child screens (category picker, category editor).

use std::collections::HashMap;

/// Key under which the category editor returns the new category id
pub const CATEGORY_ID_KEY: &str = "_id";

/// Key under which the category picker returns the chosen id
pub const SELECTED_CATEGORY_ID_KEY: &str = "selected_category_id";

/// Which child screen produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestCode {
    CategoryAdd,
    CategoryPick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Ok,
    Canceled,
}

/// Key-value extras attached to a result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    values: HashMap<String, i64>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: i64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    pub fn get_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).unwrap_or(default)
    }
}
