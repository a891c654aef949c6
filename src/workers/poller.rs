//! Status polling
//!
//! Each integration widget keeps its status label fresh by asking the backend on a fixed
//! interval. The first request goes out as soon as the poller starts. Requests are not
//! deduplicated: every tick spawns its own request, and results reach the event channel in
//! arrival order, so the last response to arrive wins.

use super::core::EventSender;
use crate::backend::{Backend, Integration};
use crate::error_classifier::ErrorClassifier;
use crate::logging::LogLevel;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Clone)]
pub struct StatusPoller {
    integration: Integration,
    backend: Arc<dyn Backend>,
    event_sender: EventSender,
    interval: Duration,
    classifier: ErrorClassifier,
}

impl StatusPoller {
    pub fn new(
        integration: Integration,
        backend: Arc<dyn Backend>,
        event_sender: EventSender,
        interval: Duration,
    ) -> Self {
        Self {
            integration,
            backend,
            event_sender,
            interval,
            classifier: ErrorClassifier::new(),
        }
    }

    /// Starts polling until `shutdown` fires or its sender is dropped.
    pub fn spawn(self, shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        // The first tick of a tokio interval completes immediately.
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.recv() => break,
                _ = ticker.tick() => {
                    let request = self.clone();
                    tokio::spawn(async move { request.poll_once().await });
                }
            }
        }
        log::debug!("{} status poller stopped", self.integration);
    }

    /// Issues one status request and reports the outcome.
    ///
    /// A response without a status label is ignored. A failure is logged and reported as an error
    /// event; it never produces a status change.
    pub async fn poll_once(&self) {
        match self.backend.task_status(self.integration).await {
            Ok(response) => {
                if let Some(status) = response.status {
                    self.event_sender.send_status(self.integration, status).await;
                } else {
                    log::debug!(
                        "{} status response carried no label: {:?}",
                        self.integration,
                        response.message
                    );
                }
            }
            Err(e) => {
                let log_level = self.classifier.classify(&e);
                log::warn!("Failed to fetch {} status: {}", self.integration, e);
                self.event_sender
                    .send_error(
                        self.integration,
                        format!("Failed to fetch {} status: {}", self.integration, e),
                        log_level,
                        e.is_auth_failure(),
                    )
                    .await;
            }
        }
    }
}

/// Fetches an integration's counters once, as the widgets do when they first appear.
pub async fn fetch_stats_once(
    integration: Integration,
    backend: Arc<dyn Backend>,
    event_sender: EventSender,
) {
    match backend.task_stats(integration).await {
        Ok(stats) => event_sender.send_stats(integration, stats).await,
        Err(e) => {
            log::warn!("Failed to fetch {} stats: {}", integration, e);
            event_sender
                .send_error(
                    integration,
                    format!("Failed to fetch {} stats: {}", integration, e),
                    LogLevel::Warn,
                    e.is_auth_failure(),
                )
                .await;
        }
    }
}
