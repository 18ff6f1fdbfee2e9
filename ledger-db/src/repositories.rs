use crate::entities::{
    AccountId, Amount, CategoryId, CurrencyId, NO_CATEGORY_ID, SPLIT_CATEGORY_ID, TransactionId,
    attributes::{Attribute, TransactionAttribute},
    categories::{Category, CategoryTree, NewCategory},
    currencies::Currency,
    transactions::BlotterRecord,
};
use crate::error::DbError;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

pub trait CategoryRepository {
    /// Full category hierarchy
    fn load_categories(&self) -> Result<CategoryTree, DbError>;

    /// Real categories only; sentinel ids resolve to `None`.
    fn get_category_by_id(&self, id: CategoryId) -> Option<Category>;

    fn insert_category(&self, category: NewCategory) -> Result<CategoryId, DbError>;
}

pub trait AttributeRepository {
    /// Attributes defined on the category and on all of its ancestors,
    /// closest ancestor last.
    fn attributes_for_category(&self, category_id: CategoryId) -> Vec<Attribute>;
}

pub trait CurrencyRepository {
    fn currency_by_id(&self, id: CurrencyId) -> Option<Currency>;
}

pub trait BlotterRepository {
    /// All transactions, newest first
    fn blotter(&self) -> Vec<BlotterRecord>;

    fn transaction(&self, id: TransactionId) -> Option<BlotterRecord>;

    /// Replace the category and attribute values of a transaction
    fn save_transaction_category(
        &self,
        id: TransactionId,
        category_id: CategoryId,
        attributes: &[TransactionAttribute],
    ) -> Result<(), DbError>;
}

/// Everything the presentation layer reads from
pub trait Database:
    CategoryRepository + AttributeRepository + CurrencyRepository + BlotterRepository + std::fmt::Debug
{
    /// Persist pending changes, if the store is backed by a file
    fn flush(&self) -> Result<(), DbError>;
}

/// On-disk layout of the JSON data file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub currencies: Vec<Currency>,
    #[serde(default)]
    pub transactions: Vec<BlotterRecord>,
}

impl StoreData {
    fn validate(&self) -> Result<(), DbError> {
        let mut ids: HashSet<CategoryId> = HashSet::new();
        for category in &self.categories {
            // Zero and negative ids are reserved for the sentinel entries
            if category.id <= NO_CATEGORY_ID {
                return Err(DbError::ReservedCategoryId(category.id));
            }
            if !ids.insert(category.id) {
                return Err(DbError::DuplicateCategoryId(category.id));
            }
        }
        for category in &self.categories {
            if category.title.trim().is_empty() {
                return Err(DbError::EmptyTitle);
            }
            if let Some(parent) = category.parent_id {
                if !ids.contains(&parent) {
                    return Err(DbError::UnknownParent(category.id, parent));
                }
            }
        }
        Ok(())
    }

    /// Recompute running balances in chronological order. Transfers also
    /// credit the destination account so its later rows stay correct.
    fn recompute_balances(&mut self) {
        let mut order: Vec<usize> = (0..self.transactions.len()).collect();
        order.sort_by_key(|&i| (self.transactions[i].datetime, self.transactions[i].id));

        let mut balances: HashMap<AccountId, Amount> = HashMap::new();
        for i in order {
            let record = &mut self.transactions[i];
            if record.is_template {
                continue;
            }
            let balance = balances.entry(record.from_account_id).or_default();
            *balance += record.from_amount;
            record.from_account_balance = *balance;

            if record.is_transfer() {
                *balances.entry(record.to_account_id).or_default() += record.credited_amount();
            }
        }
    }
}

/// In-memory store, optionally loaded from and flushed to a JSON file
#[derive(Debug, Default)]
pub struct MemoryStore {
    path: Option<PathBuf>,
    data: RefCell<StoreData>,
}

impl MemoryStore {
    pub fn from_data(mut data: StoreData) -> Result<Self, DbError> {
        data.validate()?;
        data.recompute_balances();
        Ok(Self {
            path: None,
            data: RefCell::new(data),
        })
    }

    /// Open a data file. A missing file yields an empty store that will be
    /// created on the first flush.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            tracing::info!("Data file {} not found, starting empty", path.display());
            StoreData::default()
        };

        let mut store = Self::from_data(data)?;
        store.path = Some(path);
        Ok(store)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn snapshot(&self) -> StoreData {
        self.data.borrow().clone()
    }

    fn category_level(data: &StoreData, category: &Category) -> u32 {
        let parents: HashMap<CategoryId, Option<CategoryId>> =
            data.categories.iter().map(|c| (c.id, c.parent_id)).collect();

        let mut level = 1;
        let mut seen = HashSet::from([category.id]);
        let mut current = category.parent_id;
        while let Some(parent) = current {
            if !seen.insert(parent) {
                break;
            }
            match parents.get(&parent) {
                Some(next) => {
                    level += 1;
                    current = *next;
                }
                None => break,
            }
        }
        level
    }
}

impl CategoryRepository for MemoryStore {
    fn load_categories(&self) -> Result<CategoryTree, DbError> {
        Ok(CategoryTree::build(&self.data.borrow().categories))
    }

    fn get_category_by_id(&self, id: CategoryId) -> Option<Category> {
        if id == NO_CATEGORY_ID || id == SPLIT_CATEGORY_ID {
            return None;
        }
        let data = self.data.borrow();
        data.categories.iter().find(|c| c.id == id).map(|c| Category {
            level: Self::category_level(&data, c),
            ..c.clone()
        })
    }

    fn insert_category(&self, category: NewCategory) -> Result<CategoryId, DbError> {
        let title = category.title.trim();
        if title.is_empty() {
            return Err(DbError::EmptyTitle);
        }

        let mut data = self.data.borrow_mut();
        let id = data.categories.iter().map(|c| c.id).max().unwrap_or(0).max(0) + 1;
        if let Some(parent) = category.parent_id {
            if !data.categories.iter().any(|c| c.id == parent) {
                return Err(DbError::UnknownParent(id, parent));
            }
        }

        data.categories.push(Category {
            id,
            title: title.to_string(),
            parent_id: category.parent_id,
            level: 0,
        });
        tracing::info!("Created category {} ({})", id, title);
        Ok(id)
    }
}

impl AttributeRepository for MemoryStore {
    fn attributes_for_category(&self, category_id: CategoryId) -> Vec<Attribute> {
        if category_id == NO_CATEGORY_ID || category_id == SPLIT_CATEGORY_ID {
            return Vec::new();
        }

        let data = self.data.borrow();
        let parents: HashMap<CategoryId, Option<CategoryId>> =
            data.categories.iter().map(|c| (c.id, c.parent_id)).collect();

        // Walk up to the root, then emit root-first
        let mut chain = Vec::new();
        let mut current = Some(category_id);
        while let Some(id) = current {
            if chain.contains(&id) || !parents.contains_key(&id) {
                break;
            }
            chain.push(id);
            current = parents.get(&id).copied().flatten();
        }

        chain
            .iter()
            .rev()
            .flat_map(|id| data.attributes.iter().filter(move |a| a.category_id == *id))
            .cloned()
            .collect()
    }
}

impl CurrencyRepository for MemoryStore {
    fn currency_by_id(&self, id: CurrencyId) -> Option<Currency> {
        self.data
            .borrow()
            .currencies
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }
}

impl BlotterRepository for MemoryStore {
    fn blotter(&self) -> Vec<BlotterRecord> {
        let data = self.data.borrow();
        let titles: HashMap<CategoryId, &str> = data
            .categories
            .iter()
            .map(|c| (c.id, c.title.as_str()))
            .collect();

        let mut records: Vec<BlotterRecord> = data
            .transactions
            .iter()
            .map(|t| {
                let mut record = t.clone();
                if let Some(title) = titles.get(&record.category_id) {
                    record.category_title = Some(title.to_string());
                }
                record
            })
            .collect();
        records.sort_by(|a, b| b.datetime.cmp(&a.datetime).then(b.id.cmp(&a.id)));
        records
    }

    fn transaction(&self, id: TransactionId) -> Option<BlotterRecord> {
        self.blotter().into_iter().find(|t| t.id == id)
    }

    fn save_transaction_category(
        &self,
        id: TransactionId,
        category_id: CategoryId,
        attributes: &[TransactionAttribute],
    ) -> Result<(), DbError> {
        let category_title = self.get_category_by_id(category_id).map(|c| c.title);

        let mut data = self.data.borrow_mut();
        let record = data
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(DbError::UnknownTransaction(id))?;

        record.category_id = category_id;
        record.category_title = category_title;
        record.category_attributes = attributes
            .iter()
            .map(|a| (a.attribute_id, a.value.clone()))
            .collect();
        Ok(())
    }
}

impl Database for MemoryStore {
    fn flush(&self) -> Result<(), DbError> {
        let Some(ref path) = self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&*self.data.borrow())?;
        std::fs::write(path, json)?;
        tracing::debug!("Flushed store to {}", path.display());
        Ok(())
    }
}
