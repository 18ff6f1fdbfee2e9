use chrono::format::{Item, StrftimeItems};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Prepend the split entry to the category list
    #[serde(default = "default_true")]
    pub fetch_all_categories: bool,

    /// Offer the split entry in the category picker
    #[serde(default = "default_true")]
    pub show_split_category: bool,

    /// Pick categories from the tree popup instead of the quick list
    #[serde(default = "default_true")]
    pub use_tree_picker: bool,

    #[serde(default = "default_true")]
    pub show_running_balance: bool,

    /// chrono format string for the blotter date line
    #[serde(default = "default_date_time_format")]
    pub date_time_format: String,
}

fn default_true() -> bool {
    true
}

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ledger")
        .join("ledger.json")
}

fn default_date_time_format() -> String {
    "%b %-d, %Y %H:%M".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            fetch_all_categories: true,
            show_split_category: true,
            use_tree_picker: true,
            show_running_balance: true,
            date_time_format: default_date_time_format(),
        }
    }
}

impl Settings {
    /// Load from `ledger.toml` (or `$LEDGER_CONFIG`) and `LEDGER__*` variables
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("LEDGER_CONFIG").unwrap_or_else(|_| "ledger.toml".to_string());

        Self::from_sources(
            Config::builder()
                .add_source(File::with_name(&config_path).required(false))
                .add_source(Environment::with_prefix("LEDGER").separator("__")),
        )
    }

    fn from_sources(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate().map_err(ConfigError::Message)?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.data_file.as_os_str().is_empty() {
            return Err("data_file is required".to_string());
        }
        if self.date_time_format.trim().is_empty() {
            return Err("date_time_format must not be empty".to_string());
        }
        // Formatting with an invalid pattern panics at render time
        if StrftimeItems::new(&self.date_time_format).any(|item| matches!(item, Item::Error)) {
            return Err(format!(
                "date_time_format {:?} is not a valid strftime pattern",
                self.date_time_format
            ));
        }
        Ok(())
    }
}
