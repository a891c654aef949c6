//! Dashboard session setup
//!
//! Shared by the TUI and headless modes: loads the stored session, builds the backend client and
//! starts one status poller per integration.

use crate::backend::{Backend, BackendClient, Group, Integration};
use crate::commands::CommandError;
use crate::config::Session;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::Event;
use crate::workers::{EventSender, StatusPoller, fetch_stats_once};
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Events from the pollers and task controls
    pub event_receiver: mpsc::Receiver<Event>,
    /// Sender handed to task controls started from the UI
    pub event_sender: EventSender,
    /// Poller tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Fires once to stop every poller
    pub shutdown_sender: broadcast::Sender<()>,
    pub backend: Arc<dyn Backend>,
    /// Groups of the linked account, empty when the listing failed
    pub groups: Vec<Group>,
    pub phone: Option<String>,
}

/// Starts a dashboard session for the stored login.
///
/// Fails with `NotLoggedIn` when no token is stored, so callers can send the user to the login
/// flow before any request is made.
pub async fn setup_session(
    session_path: &Path,
    env: Environment,
    poll_interval: Duration,
) -> Result<SessionData, Box<dyn Error>> {
    let stored = Session::load_or_default(session_path)?;
    let token = stored.token().ok_or(CommandError::NotLoggedIn)?;

    let backend: Arc<dyn Backend> =
        Arc::new(BackendClient::new(env)?.with_token(Some(token)));
    Ok(start_pollers(backend, stored.phone.clone(), poll_interval).await)
}

/// Spawns the pollers and the one-off stats and group requests against `backend`.
pub async fn start_pollers(
    backend: Arc<dyn Backend>,
    phone: Option<String>,
    poll_interval: Duration,
) -> SessionData {
    let (event_tx, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let event_sender = EventSender::new(event_tx);
    let (shutdown_sender, _) = broadcast::channel(1);

    let mut join_handles = Vec::with_capacity(Integration::ALL.len() * 2);
    for integration in Integration::ALL {
        let poller = StatusPoller::new(
            integration,
            backend.clone(),
            event_sender.clone(),
            poll_interval,
        );
        join_handles.push(poller.spawn(shutdown_sender.subscribe()));
        join_handles.push(tokio::spawn(fetch_stats_once(
            integration,
            backend.clone(),
            event_sender.clone(),
        )));
    }

    let groups = match backend.groups(phone.as_deref().unwrap_or_default()).await {
        Ok(response) => response.groups,
        Err(e) => {
            log::warn!("Failed to fetch groups: {}", e);
            Vec::new()
        }
    };

    SessionData {
        event_receiver,
        event_sender,
        join_handles,
        shutdown_sender,
        backend,
        groups,
        phone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::error::BackendError;
    use crate::backend::{GroupsResponse, IntegrationStats, MockBackend, TaskStatus};
    use crate::events::EventType;
    use tempfile::tempdir;

    #[tokio::test]
    async fn setup_without_token_fails_before_any_request() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let result = setup_session(
            &path,
            Environment::Local,
            Duration::from_millis(crate::consts::cli_consts::polling::DEFAULT_POLL_INTERVAL_MS),
        )
        .await;
        let err = result.err().unwrap();
        assert!(matches!(
            err.downcast_ref::<CommandError>(),
            Some(CommandError::NotLoggedIn)
        ));
    }

    #[tokio::test]
    async fn pollers_report_both_integrations() {
        let mut backend = MockBackend::new();
        backend.expect_task_status().returning(|integration| {
            Ok(TaskStatus {
                success: true,
                status: Some(format!("{} running", integration)),
                ..Default::default()
            })
        });
        backend
            .expect_task_stats()
            .returning(|_| Ok(IntegrationStats::default()));
        backend.expect_groups().returning(|_| {
            Err(BackendError::Http {
                status: 500,
                message: String::new(),
            })
        });

        let mut session =
            start_pollers(Arc::new(backend), None, Duration::from_secs(60)).await;
        assert!(session.groups.is_empty());

        let mut statuses = Vec::new();
        while statuses.len() < 2 {
            let event = session.event_receiver.recv().await.unwrap();
            if event.event_type == EventType::StatusChange {
                statuses.push(event.status.unwrap());
            }
        }
        statuses.sort();
        assert_eq!(statuses, vec!["Email running", "Telegram running"]);

        let _ = session.shutdown_sender.send(());
    }

    #[tokio::test]
    async fn groups_are_loaded_once() {
        let mut backend = MockBackend::new();
        backend
            .expect_task_status()
            .returning(|_| Ok(TaskStatus::default()));
        backend
            .expect_task_stats()
            .returning(|_| Ok(IntegrationStats::default()));
        backend
            .expect_groups()
            .times(1)
            .returning(|_| Ok(GroupsResponse::default()));

        let session = start_pollers(
            Arc::new(backend),
            Some("+15550100".to_string()),
            Duration::from_secs(60),
        )
        .await;
        assert_eq!(session.phone.as_deref(), Some("+15550100"));
        let _ = session.shutdown_sender.send(());
    }
}
