//! Start/stop actions triggered from the dashboard.
//!
//! The outcome is reported as events so the widget can update optimistically: a successful start
//! shows "Started" until the next poll says otherwise.

use super::core::EventSender;
use crate::backend::{Backend, Integration, StartTaskRequest};
use crate::commands::tasks::{TaskAction, failure_message};
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub fn spawn_task_action(
    backend: Arc<dyn Backend>,
    integration: Integration,
    action: TaskAction,
    event_sender: EventSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        run_task_action(backend.as_ref(), integration, action, &event_sender).await
    })
}

pub async fn run_task_action(
    backend: &dyn Backend,
    integration: Integration,
    action: TaskAction,
    event_sender: &EventSender,
) {
    let result = match action {
        TaskAction::Start => {
            backend
                .start_task(integration, &StartTaskRequest::default())
                .await
        }
        TaskAction::Stop => backend.stop_task(integration).await,
    };

    match result {
        Ok(response) => {
            let msg = if response.message.is_empty() {
                format!("{} {}", integration, action.past_tense().to_lowercase())
            } else {
                response.message
            };
            event_sender
                .send_event(
                    Event::with_level(integration, msg, EventType::Success, LogLevel::Info)
                        .for_task_control(),
                )
                .await;
            event_sender
                .send_status(integration, action.past_tense().to_string())
                .await;
        }
        Err(e) => {
            log::warn!("{}: {}", failure_message(integration, action), e);
            event_sender
                .send_event(
                    Event::error(
                        integration,
                        failure_message(integration, action),
                        ErrorClassifier::new().classify(&e).max(LogLevel::Warn),
                        e.is_auth_failure(),
                    )
                    .for_task_control(),
                )
                .await;
        }
    }
}
