//! Blotter row rendering.
//!
//! [`render_row`] turns one [`BlotterRecord`] into a [`BlotterRow`] value
//! holding display strings and abstract color/icon tokens. The table screen
//! maps those tokens onto terminal styles.

pub mod currency_cache;
pub mod title;

pub use currency_cache::CurrencyCache;
pub use title::transaction_title;

use chrono::NaiveDateTime;
use ledger_db::entities::{
    transactions::{BlotterRecord, TransactionStatus},
    NO_CATEGORY_ID,
};
use ledger_db::CurrencyRepository;

pub const TRANSFER_TITLE: &str = "Transfer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    /// Same color as the title line
    Default,
    Regular,
    Transfer,
    Positive,
    Negative,
    Future,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconToken {
    Income,
    Expense,
}

/// Left-edge marker color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorColor {
    Template,
    Restored,
    Pending,
    Unreconciled,
    Cleared,
    Reconciled,
}

impl IndicatorColor {
    pub fn for_record(record: &BlotterRecord) -> Self {
        if record.is_template {
            return Self::Template;
        }
        match record.status {
            TransactionStatus::Restored => Self::Restored,
            TransactionStatus::Pending => Self::Pending,
            TransactionStatus::Unreconciled => Self::Unreconciled,
            TransactionStatus::Cleared => Self::Cleared,
            TransactionStatus::Reconciled => Self::Reconciled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlotterRow {
    pub title: String,
    pub center: String,
    pub center_color: ColorToken,
    pub amount: String,
    pub icon: Option<IconToken>,
    pub icon_color: Option<ColorToken>,
    pub date: String,
    pub date_color: ColorToken,
    pub balance: Option<String>,
    pub indicator: IndicatorColor,
}

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub now: NaiveDateTime,
    pub date_time_format: String,
    pub show_running_balance: bool,
}

impl RenderContext {
    pub fn new(now: NaiveDateTime, date_time_format: impl Into<String>) -> Self {
        Self {
            now,
            date_time_format: date_time_format.into(),
            show_running_balance: true,
        }
    }

    pub fn from_settings(settings: &crate::config::Settings, now: NaiveDateTime) -> Self {
        Self {
            now,
            date_time_format: settings.date_time_format.clone(),
            show_running_balance: settings.show_running_balance,
        }
    }
}

pub fn render_row<R: CurrencyRepository + ?Sized>(
    record: &BlotterRecord,
    currencies: &CurrencyCache<R>,
    ctx: &RenderContext,
) -> BlotterRow {
    let note = record.note.as_deref().unwrap_or_default();
    let amount = record.from_amount;

    let (title, note, center_color) = match record.to_account_title.as_deref() {
        Some(to_account) if record.is_transfer() => {
            let marker = if amount.is_positive() {
                format!("{} »", to_account)
            } else {
                format!("« {}", to_account)
            };
            (TRANSFER_TITLE.to_string(), marker, ColorToken::Transfer)
        }
        _ if record.is_transfer() => {
            let marker = if amount.is_positive() { "»" } else { "«" };
            (TRANSFER_TITLE.to_string(), marker.to_string(), ColorToken::Transfer)
        }
        _ => (
            record.from_account_title.clone(),
            note.to_string(),
            ColorToken::Regular,
        ),
    };

    let category = if record.category_id != NO_CATEGORY_ID {
        record.category_title.as_deref().unwrap_or_default()
    } else {
        ""
    };
    let center = transaction_title(
        record.payee.as_deref().unwrap_or_default(),
        &note,
        record.category_id,
        category,
    );

    let from_currency = currencies.get(record.from_account_currency_id);
    let converted = from_currency.format_amount(amount, true);
    let amount_text = if record.original_currency_id > 0 {
        let original_currency = currencies.get(record.original_currency_id);
        format!(
            "{} ({})",
            original_currency.format_amount(record.original_from_amount, true),
            converted
        )
    } else {
        converted
    };

    let (icon, icon_color) = if amount.is_positive() {
        (Some(IconToken::Income), Some(ColorToken::Positive))
    } else if amount.is_negative() {
        (Some(IconToken::Expense), Some(ColorToken::Negative))
    } else {
        (None, None)
    };

    let date_color = if record.datetime > ctx.now {
        ColorToken::Future
    } else {
        ColorToken::Default
    };

    // Templates never post, so they have no running balance
    let balance = (ctx.show_running_balance && !record.is_template)
        .then(|| from_currency.format_amount(record.from_account_balance, false));

    BlotterRow {
        title,
        center,
        center_color,
        amount: amount_text,
        icon,
        icon_color,
        date: record.datetime.format(&ctx.date_time_format).to_string(),
        date_color,
        balance,
        indicator: IndicatorColor::for_record(record),
    }
}
