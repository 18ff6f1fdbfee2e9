use itertools::Itertools;
use ledger_db::entities::{CategoryId, SPLIT_CATEGORY_ID};

/// Compose the center line of a blotter row from payee, note and category.
///
/// Regular rows read `Category (Payee: Note)`, dropping whatever is empty.
/// Split rows show the payee in brackets with an ellipsis since the real
/// categories live on the parts.
pub fn transaction_title(
    payee: &str,
    note: &str,
    category_id: CategoryId,
    category: &str,
) -> String {
    if category_id == SPLIT_CATEGORY_ID {
        return split_title(payee, note, category);
    }

    let second = [payee, note]
        .into_iter()
        .filter(|part| !part.is_empty())
        .join(": ");

    match (category.is_empty(), second.is_empty()) {
        (false, false) => format!("{} ({})", category, second),
        (false, true) => category.to_string(),
        (true, _) => second,
    }
}

fn split_title(payee: &str, note: &str, category: &str) -> String {
    match (payee.is_empty(), note.is_empty()) {
        (false, false) => format!("[{}...] {}", payee, note),
        (false, true) => format!("[{}...]", payee),
        (true, false) => format!("[...] {}", note),
        (true, true) => category.to_string(),
    }
}
