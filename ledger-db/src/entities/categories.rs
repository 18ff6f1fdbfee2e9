use super::CategoryId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    /// Depth in the hierarchy, top-level categories are at level 1.
    /// Computed by the store, never read from disk.
    #[serde(skip)]
    pub level: u32,
}

impl Category {
    pub fn new(id: CategoryId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            parent_id: None,
            level: 1,
        }
    }

    pub fn with_parent(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Title prefixed with one `--` per level below the top.
    pub fn title_with_level(title: &str, level: u32) -> String {
        match level {
            0 | 1 => title.to_string(),
            _ => format!("{} {}", "--".repeat(level as usize - 1), title),
        }
    }

    pub fn indented_title(&self) -> String {
        Self::title_with_level(&self.title, self.level)
    }
}

/// Request to create a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub title: String,
    pub parent_id: Option<CategoryId>,
}

impl NewCategory {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            parent_id: None,
        }
    }

    pub fn under(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

/// Parent/child view of the stored categories.
///
/// Siblings are ordered by title (case-insensitive), then id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTree {
    pub roots: Vec<CategoryNode>,
}

impl CategoryTree {
    pub fn build(categories: &[Category]) -> Self {
        let known: HashMap<CategoryId, &Category> =
            categories.iter().map(|c| (c.id, c)).collect();

        let mut by_parent: HashMap<Option<CategoryId>, Vec<&Category>> = HashMap::new();
        for category in categories {
            // Orphans are promoted to roots rather than dropped
            let parent = category.parent_id.filter(|p| known.contains_key(p));
            by_parent.entry(parent).or_default().push(category);
        }
        for siblings in by_parent.values_mut() {
            siblings.sort_by(|a, b| {
                a.title
                    .to_lowercase()
                    .cmp(&b.title.to_lowercase())
                    .then(a.id.cmp(&b.id))
            });
        }

        fn grow(
            parent: Option<CategoryId>,
            level: u32,
            by_parent: &HashMap<Option<CategoryId>, Vec<&Category>>,
        ) -> Vec<CategoryNode> {
            by_parent
                .get(&parent)
                .map(|siblings| {
                    siblings
                        .iter()
                        .map(|c| CategoryNode {
                            category: Category {
                                level,
                                ..(*c).clone()
                            },
                            children: grow(Some(c.id), level + 1, by_parent),
                        })
                        .collect()
                })
                .unwrap_or_default()
        }

        Self {
            roots: grow(None, 1, &by_parent),
        }
    }

    /// Depth-first, parents before their children.
    pub fn as_flat_list(&self) -> Vec<Category> {
        fn walk(nodes: &[CategoryNode], out: &mut Vec<Category>) {
            for node in nodes {
                out.push(node.category.clone());
                walk(&node.children, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.roots, &mut out);
        out
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// True when at least one category has children.
    pub fn is_nested(&self) -> bool {
        self.roots.iter().any(|n| !n.children.is_empty())
    }
}
