#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::ClientBox;
use crate::domain::models::Event;

fn send_event(tx: &mpsc::UnboundedSender<Event>, event: Event) {
    if let Err(err) = tx.send(event) {
        tracing::error!(error = ?err, "Chat view stopped listening for events");
    }
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs requested actions against the client until every action sender
    /// has been dropped. Asks run on their own task so the chat view stays
    /// responsive while waiting for an answer.
    pub async fn start(
        client: ClientBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let client = Arc::new(client);

        while let Some(action) = rx.recv().await {
            let worker_tx = tx.clone();
            let worker_client = Arc::clone(&client);

            match action {
                Action::Ask(ask) => {
                    tokio::spawn(async move {
                        tracing::debug!(question = %ask.question, "Asking question");
                        let res = worker_client.ask(&ask.question).await;
                        send_event(&worker_tx, Event::AnswerReceived(ask, res));
                    });
                }
                Action::HealthCheck() => {
                    tokio::spawn(async move {
                        if let Err(err) = worker_client.health_check().await {
                            tracing::warn!(error = ?err, client = %worker_client.name(), "Health check failed");
                            send_event(&worker_tx, Event::HealthCheckFailed(format!("{err}")));
                        }
                    });
                }
            }
        }

        return Ok(());
    }
}
