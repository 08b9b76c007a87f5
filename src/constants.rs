//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Spreadsheet endpoint used when no config file overrides it
pub const DEFAULT_ENDPOINT: &str = "https://sheetdb.io/api/v1/6f6bg2etln98s";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How long a notification stays on screen
pub const NOTIFICATION_TTL_MS: i64 = 3000;

/// Message shown after any successful operation
pub const SUCCESS_MESSAGE: &str = "Operation Successful!";

/// Alert shown when a new entry is submitted with blank fields
pub const MISSING_FIELDS_ALERT: &str = "Please fill out all fields.";

/// Directory (under $HOME) holding the config file
pub const CONFIG_DIR_NAME: &str = ".sheetview";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Log file written in the working directory
pub const LOG_FILE_NAME: &str = "sheetview.log";

/// Application name
pub const APP_NAME: &str = "Sheetview";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
