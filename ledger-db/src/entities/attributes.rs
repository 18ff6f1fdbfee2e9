use super::{AttributeId, CategoryId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Text,
    Number,
    List,
    Checkbox,
}

/// Custom input attached to a category and inherited by its subcategories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: AttributeId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    #[serde(default)]
    pub list_values: Vec<String>,
    #[serde(default)]
    pub default_value: Option<String>,
    pub category_id: CategoryId,
}

impl Attribute {
    pub fn new(
        id: AttributeId,
        title: impl Into<String>,
        kind: AttributeType,
        category_id: CategoryId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            list_values: Vec::new(),
            default_value: None,
            category_id,
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_list_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// Value of one attribute on one transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAttribute {
    pub attribute_id: AttributeId,
    pub value: String,
}
