pub mod category_form;
pub mod category_picker;
pub mod empty_state;
pub mod help_bar;
pub mod help_popup;
pub mod popup;
pub mod status_line;
