//! Network layer - spreadsheet gateway calls
//!
//! The Network actor receives gateway commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::{GatewayError, SheetClient};
