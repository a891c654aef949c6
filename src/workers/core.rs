//! Core worker utilities

use crate::backend::{Integration, IntegrationStats};
use crate::events::Event;
use crate::logging::LogLevel;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_status(&self, integration: Integration, status: String) {
        self.send_event(Event::status_change(integration, status))
            .await;
    }

    pub async fn send_stats(&self, integration: Integration, stats: IntegrationStats) {
        self.send_event(Event::stats(integration, stats)).await;
    }

    pub async fn send_error(
        &self,
        integration: Integration,
        message: String,
        log_level: LogLevel,
        auth_failure: bool,
    ) {
        self.send_event(Event::error(integration, message, log_level, auth_failure))
            .await;
    }
}
