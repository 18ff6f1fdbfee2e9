//! Data layer for the ledger: entities, repository traits and a JSON-backed
//! in-memory store.

pub mod entities;
mod error;
mod macros;
pub mod repositories;

pub use crate::error::DbError;
pub use repositories::{
    AttributeRepository, BlotterRepository, CategoryRepository, CurrencyRepository, Database,
    MemoryStore, StoreData,
};
