//! Event-to-email dispatch loop.
//!
//! Delivery is fire-and-forget: a failed send is logged and dropped, never
//! retried and never reported to the request that caused it.

use std::sync::Arc;

use superfix_events::bus::Published;
use superfix_events::{EmailTemplates, Mailer, SuperfixEvent};
use tokio::sync::broadcast;

/// Sends the emails each [`SuperfixEvent`] calls for.
///
/// Without a mailer, events are only logged.
pub struct NotificationDispatcher {
    templates: EmailTemplates,
    mailer: Option<Arc<dyn Mailer>>,
    ops_address: Option<String>,
}

impl NotificationDispatcher {
    pub fn new(
        templates: EmailTemplates,
        mailer: Option<Arc<dyn Mailer>>,
        ops_address: Option<String>,
    ) -> Self {
        Self {
            templates,
            mailer,
            ops_address,
        }
    }

    /// Run the dispatch loop until the [`EventBus`](superfix_events::EventBus)
    /// is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<Published<SuperfixEvent>>) {
        loop {
            match receiver.recv().await {
                Ok(published) => self.handle(&published.event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification dispatcher lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification dispatcher shutting down");
                    break;
                }
            }
        }
    }

    /// Compose and send every email for one event.
    pub async fn handle(&self, event: &SuperfixEvent) {
        let emails = match self.templates.compose(event, self.ops_address.as_deref()) {
            Ok(emails) => emails,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    event_type = event.event_type(),
                    "Failed to render email"
                );
                return;
            }
        };

        let Some(mailer) = &self.mailer else {
            tracing::info!(
                event_type = event.event_type(),
                emails = emails.len(),
                "Email disabled, skipping delivery"
            );
            return;
        };

        for email in &emails {
            match mailer.send(email).await {
                Ok(()) => tracing::debug!(
                    event_type = event.event_type(),
                    to = %email.to,
                    "Email sent"
                ),
                Err(e) => tracing::error!(
                    error = %e,
                    event_type = event.event_type(),
                    to = %email.to,
                    "Failed to send email"
                ),
            }
        }
    }
}
