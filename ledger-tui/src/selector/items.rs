use ledger_db::entities::{
    categories::{Category, CategoryTree},
    CategoryId, NO_CATEGORY_ID, SPLIT_CATEGORY_ID,
};

pub const SPLIT_CATEGORY_TITLE: &str = "Split";
pub const NO_CATEGORY_TITLE: &str = "No category";

/// One selectable entry of the category list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryItem {
    /// The amount is divided across several categories
    Split,
    NoCategory,
    Category(Category),
}

impl CategoryItem {
    pub fn id(&self) -> CategoryId {
        match self {
            Self::Split => SPLIT_CATEGORY_ID,
            Self::NoCategory => NO_CATEGORY_ID,
            Self::Category(category) => category.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Split => SPLIT_CATEGORY_TITLE,
            Self::NoCategory => NO_CATEGORY_TITLE,
            Self::Category(category) => &category.title,
        }
    }

    pub fn level(&self) -> u32 {
        match self {
            Self::Split | Self::NoCategory => 0,
            Self::Category(category) => category.level,
        }
    }

    /// Title indented by hierarchy level, as shown in the category field
    pub fn label(&self) -> String {
        Category::title_with_level(self.title(), self.level())
    }

    pub fn is_split(&self) -> bool {
        matches!(self, Self::Split)
    }

    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Self::Category(_))
    }
}

/// Flatten the tree and put the sentinels in front: split (only with
/// `include_split`) first, then "no category".
pub fn build_items(tree: &CategoryTree, include_split: bool) -> Vec<CategoryItem> {
    let sentinels = if include_split {
        vec![CategoryItem::Split, CategoryItem::NoCategory]
    } else {
        vec![CategoryItem::NoCategory]
    };

    sentinels
        .into_iter()
        .chain(tree.as_flat_list().into_iter().map(CategoryItem::Category))
        .collect()
}
