//! Network messages - communication between App and Network layers

use crate::models::{Operation, Row};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// Fetch the full row collection
    ListRows { id: u64 },
    /// Append one row
    CreateRow { id: u64, row: Row },
    /// Patch the row addressed by `key`
    UpdateRow { id: u64, key: String, row: Row },
    /// Delete the row addressed by `key`
    DeleteRow { id: u64, key: String },
    /// Shutdown the network actor
    Shutdown,
}

impl NetworkCommand {
    pub fn operation(&self) -> Option<Operation> {
        match self {
            NetworkCommand::ListRows { .. } => Some(Operation::List),
            NetworkCommand::CreateRow { .. } => Some(Operation::Create),
            NetworkCommand::UpdateRow { .. } => Some(Operation::Update),
            NetworkCommand::DeleteRow { .. } => Some(Operation::Delete),
            NetworkCommand::Shutdown => None,
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    /// Full row collection fetched
    RowsLoaded { id: u64, rows: Vec<Row> },
    /// Create accepted by the service
    RowCreated { id: u64 },
    /// Update accepted by the service
    RowUpdated { id: u64, key: String },
    /// Delete accepted by the service
    RowDeleted { id: u64, key: String },
    /// Transport, status or decode failure
    Failed {
        id: u64,
        op: Operation,
        message: String,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::RowsLoaded { id, .. } => *id,
            NetworkResponse::RowCreated { id } => *id,
            NetworkResponse::RowUpdated { id, .. } => *id,
            NetworkResponse::RowDeleted { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }
}
