//! Network actor - runs gateway calls in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::Operation;
use crate::network::client::{GatewayError, SheetClient};

/// Network actor that turns commands into gateway calls.
///
/// Calls run concurrently and are neither ordered nor cancelled; each one
/// reports back on its own when it finishes.
pub struct NetworkActor {
    client: SheetClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: SheetClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => break,
                        Some(cmd) => self.spawn(cmd),
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }

    fn spawn(&mut self, cmd: NetworkCommand) {
        let client = self.client.clone();
        let response_tx = self.response_tx.clone();

        self.active_requests.spawn(async move {
            if let Some(response) = execute(&client, cmd).await {
                let _ = response_tx.send(response);
            }
        });
    }
}

/// Run one command against the gateway and describe the outcome.
/// `Shutdown` is not a gateway call and yields nothing.
pub async fn execute(client: &SheetClient, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let op = cmd.operation()?;
    tracing::info!(op = op.as_str(), "Executing gateway call");

    let (id, op, error) = match cmd {
        NetworkCommand::ListRows { id } => match client.list_rows().await {
            Ok(rows) => return done(NetworkResponse::RowsLoaded { id, rows }),
            Err(e) => (id, Operation::List, e),
        },
        NetworkCommand::CreateRow { id, row } => match client.create_row(&row).await {
            Ok(_) => return done(NetworkResponse::RowCreated { id }),
            Err(e) => (id, Operation::Create, e),
        },
        NetworkCommand::UpdateRow { id, key, row } => match client.update_row(&key, &row).await {
            Ok(_) => return done(NetworkResponse::RowUpdated { id, key }),
            Err(e) => (id, Operation::Update, e),
        },
        NetworkCommand::DeleteRow { id, key } => match client.delete_row(&key).await {
            Ok(_) => return done(NetworkResponse::RowDeleted { id, key }),
            Err(e) => (id, Operation::Delete, e),
        },
        NetworkCommand::Shutdown => return None,
    };

    Some(failed(id, op, error))
}

fn done(response: NetworkResponse) -> Option<NetworkResponse> {
    tracing::info!(id = response.id(), "Gateway call completed");
    Some(response)
}

fn failed(id: u64, op: Operation, error: GatewayError) -> NetworkResponse {
    tracing::debug!(id, op = op.as_str(), error = ?error, "Gateway call returned an error");
    NetworkResponse::Failed {
        id,
        op,
        message: error.summary(),
    }
}
