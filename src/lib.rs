//! # Sheetview
//!
//! A terminal client for a spreadsheet-backed REST endpoint (SheetDB style).
//!
//! ## Features
//! - Table view of every row the service returns
//! - Edit, create and delete rows through a form dialog
//! - Full re-fetch after every successful change
//! - Light and dark colour schemes
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod config;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::Config;
pub use models::{Draft, DraftField, EntryTarget, Operation, Row};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{GatewayError, NetworkActor, SheetClient};
