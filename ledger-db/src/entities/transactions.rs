use super::{AccountId, Amount, AttributeId, CategoryId, CurrencyId, TransactionId};
use crate::macros::setter;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Restored,
    Pending,
    #[default]
    Unreconciled,
    Cleared,
    Reconciled,
}

/// One blotter row as read from the store.
///
/// Account ids, currency ids and category ids use `0` for "none".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlotterRecord {
    pub id: TransactionId,
    pub datetime: NaiveDateTime,
    pub from_account_id: AccountId,
    pub from_account_title: String,
    #[serde(default)]
    pub from_account_currency_id: CurrencyId,
    #[serde(default)]
    pub from_amount: Amount,
    #[serde(default)]
    pub to_account_id: AccountId,
    #[serde(default)]
    pub to_account_title: Option<String>,
    /// Amount credited to the destination account. Absent means the
    /// negated `from_amount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_amount: Option<Amount>,
    #[serde(default)]
    pub original_currency_id: CurrencyId,
    #[serde(default)]
    pub original_from_amount: Amount,
    #[serde(default)]
    pub category_id: CategoryId,
    #[serde(default)]
    pub category_title: Option<String>,
    #[serde(default)]
    pub payee: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// Balance of the source account right after this transaction
    #[serde(default)]
    pub from_account_balance: Amount,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub category_attributes: BTreeMap<AttributeId, String>,
}

impl BlotterRecord {
    pub fn new(
        id: TransactionId,
        datetime: NaiveDateTime,
        from_account_id: AccountId,
        from_account_title: impl Into<String>,
    ) -> Self {
        Self {
            id,
            datetime,
            from_account_id,
            from_account_title: from_account_title.into(),
            from_account_currency_id: 0,
            from_amount: Amount::ZERO,
            to_account_id: 0,
            to_account_title: None,
            to_amount: None,
            original_currency_id: 0,
            original_from_amount: Amount::ZERO,
            category_id: 0,
            category_title: None,
            payee: None,
            note: None,
            from_account_balance: Amount::ZERO,
            status: TransactionStatus::default(),
            is_template: false,
            category_attributes: BTreeMap::new(),
        }
    }

    setter!(from_account_currency_id: CurrencyId);
    setter!(from_amount: Amount);
    setter!(original_currency_id: CurrencyId);
    setter!(original_from_amount: Amount);
    setter!(from_account_balance: Amount);
    setter!(status: TransactionStatus);
    setter!(is_template: bool);
    setter!(opt to_amount: Amount);
    setter!(opt payee: String);
    setter!(opt note: String);

    pub fn transfer_to(mut self, account_id: AccountId, title: impl Into<String>) -> Self {
        self.to_account_id = account_id;
        self.to_account_title = Some(title.into());
        self
    }

    pub fn category(mut self, category_id: CategoryId, title: impl Into<String>) -> Self {
        self.category_id = category_id;
        self.category_title = Some(title.into());
        self
    }

    pub fn attribute(mut self, attribute_id: AttributeId, value: impl Into<String>) -> Self {
        self.category_attributes.insert(attribute_id, value.into());
        self
    }

    pub fn is_transfer(&self) -> bool {
        self.to_account_id > 0
    }

    /// What the destination account receives from a transfer
    pub fn credited_amount(&self) -> Amount {
        self.to_amount.unwrap_or(-self.from_amount)
    }
}
