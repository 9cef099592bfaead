use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;

/// Events emitted after a mutation has committed. Consumers observe the
/// system; they never participate in the write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    JobCreated(String),
    JobUpdated(String),
    JobStatusChanged {
        job_id: String,
        old_status: String,
        new_status: String,
    },
    JobDeleted(String),
    ReceiptPrinted(String),
    LedgerExported {
        rows: usize,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Drains the event channel for the lifetime of the process. Today the
/// consumers are log lines; anything heavier hangs off this loop later.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::JobCreated(job_id) => info!(%job_id, "job created"),
            Event::JobUpdated(job_id) => info!(%job_id, "job updated"),
            Event::JobStatusChanged {
                job_id,
                old_status,
                new_status,
            } => info!(%job_id, %old_status, %new_status, "job status changed"),
            Event::JobDeleted(job_id) => info!(%job_id, "job deleted"),
            Event::ReceiptPrinted(job_id) => info!(%job_id, "receipt printed"),
            Event::LedgerExported { rows } => info!(rows, "ledger exported"),
        }
    }

    info!("Event processing loop stopped");
}
