use ledger_db::entities::{transactions::BlotterRecord, CategoryId, TransactionId};

/// Commands to execute (user actions → store calls and state changes)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SelectNext,
    SelectPrevious,
    NavigateToTop,
    NavigateToBottom,

    // Navigation
    NavigateBack,

    // Blotter
    LoadBlotter,
    OpenEditor {
        transaction_id: TransactionId,
    },

    // Category node
    ClickCategory,
    ClickAddCategory,
    ClickSplit,

    // Attribute rows
    FocusAttribute {
        forward: bool,
    },
    UnfocusAttributes,
    AppendAttributeChar(char),
    DeleteAttributeChar,
    CycleAttribute {
        forward: bool,
    },

    SaveTransaction,

    // Category picker popup
    PickerSelectNext,
    PickerSelectPrevious,
    ConfirmPick,
    CancelPick,

    // Category creation popup
    AppendCategoryTitleChar(char),
    DeleteCategoryTitleChar,
    CycleCategoryParent {
        forward: bool,
    },
    SubmitCategoryForm,
    CancelCategoryForm,

    ToggleHelp,

    // Log screen
    NavigateToLogs,
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,
    ScrollLogsToTop,
    ScrollLogsToBottom,

    // Key sequence state
    SetPendingKey(char),
    ClearPendingKey,

    // System
    Quit,
}

/// Results of store calls, applied by the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum DataEvent {
    BlotterLoaded {
        records: Vec<BlotterRecord>,
    },

    TransactionSaved {
        transaction_id: TransactionId,
    },
    TransactionSaveFailed {
        transaction_id: TransactionId,
        error: String,
    },

    CategoryCreated {
        category_id: CategoryId,
        title: String,
    },

    LoadError {
        error: String,
    },
}

impl DataEvent {
    /// Whether the store holds changes that should be written out
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::TransactionSaved { .. } | Self::CategoryCreated { .. }
        )
    }
}
