use thiserror::Error;

use crate::entities::{CategoryId, TransactionId};

#[derive(Error, Debug)]
pub enum DbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Category {0} refers to unknown parent {1}")]
    UnknownParent(CategoryId, CategoryId),

    #[error("Category id {0} is reserved")]
    ReservedCategoryId(CategoryId),

    #[error("Duplicate category id {0}")]
    DuplicateCategoryId(CategoryId),

    #[error("Category title must not be empty")]
    EmptyTitle,

    #[error("Unknown transaction {0}")]
    UnknownTransaction(TransactionId),
}
