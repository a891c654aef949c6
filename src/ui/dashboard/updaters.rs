//! Dashboard state updates from worker events

use super::state::DashboardState;
use crate::events::{Event as WorkerEvent, EventType};

impl DashboardState {
    /// Advances the animation tick and applies every queued event in arrival order.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);
            self.add_to_activity_log(event);
        }
    }

    fn process_event(&mut self, event: &WorkerEvent) {
        if event.auth_failure {
            self.auth_failed = true;
        }

        let widget = self.widget_mut(event.integration);
        match event.event_type {
            EventType::StatusChange => {
                if let Some(status) = &event.status {
                    widget.apply_status(status.clone());
                }
            }
            EventType::Stats => {
                if event.stats.is_some() {
                    widget.stats = event.stats.clone();
                }
            }
            // Poll outcomes only reach the activity log
            EventType::Success | EventType::Error if !event.task_control => {}
            EventType::Success => widget.busy = false,
            EventType::Error => {
                widget.busy = false;
                widget.action_error = Some(event.msg.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::{Integration, IntegrationStats};
    use crate::environment::Environment;
    use crate::events::{Event, EventType};
    use crate::logging::LogLevel;
    use crate::ui::app::UIConfig;
    use crate::ui::dashboard::DashboardState;
    use std::time::Instant;

    fn state() -> DashboardState {
        DashboardState::new(Environment::Local, Instant::now(), UIConfig::default())
    }

    #[test]
    fn status_events_update_only_their_widget() {
        let mut state = state();
        state.add_event(Event::status_change(Integration::Email, "running".to_string()));
        state.update();

        assert_eq!(state.email.status.as_deref(), Some("running"));
        assert_eq!(state.chat.status, None);
        assert_eq!(state.chat.status_label(), "no event");
    }

    #[test]
    fn failed_poll_keeps_previous_status() {
        let mut state = state();
        state.add_event(Event::status_change(Integration::Chat, "running".to_string()));
        state.add_event(Event::error(
            Integration::Chat,
            "Failed to fetch Telegram status".to_string(),
            LogLevel::Warn,
            false,
        ));
        state.update();

        assert_eq!(state.chat.status.as_deref(), Some("running"));
        assert_eq!(state.chat.action_error, None);
        assert_eq!(state.activity_logs.len(), 2);
        assert!(!state.auth_failed);
    }

    #[test]
    fn failed_poll_keeps_action_in_flight() {
        let mut state = state();
        assert!(state.chat.begin_action());
        state.add_event(Event::error(
            Integration::Chat,
            "Failed to fetch Telegram status: boom".to_string(),
            LogLevel::Warn,
            false,
        ));
        state.update();

        assert!(state.chat.busy);
        assert!(!state.chat.begin_action());
    }

    #[test]
    fn action_error_survives_later_polls() {
        let mut state = state();
        assert!(state.chat.begin_action());
        state.add_event(
            Event::error(
                Integration::Chat,
                "Failed to start background task".to_string(),
                LogLevel::Warn,
                false,
            )
            .for_task_control(),
        );
        state.add_event(Event::status_change(Integration::Chat, "running".to_string()));
        state.update();

        assert!(!state.chat.busy);
        assert_eq!(state.chat.status.as_deref(), Some("running"));
        assert_eq!(
            state.chat.action_error.as_deref(),
            Some("Failed to start background task")
        );

        assert!(state.chat.begin_action());
        assert_eq!(state.chat.action_error, None);
    }

    #[test]
    fn later_status_wins() {
        let mut state = state();
        state.chat.busy = true;
        state.add_event(
            Event::with_level(
                Integration::Chat,
                "Background task started".to_string(),
                EventType::Success,
                LogLevel::Info,
            )
            .for_task_control(),
        );
        state.add_event(Event::status_change(Integration::Chat, "Started".to_string()));
        state.add_event(Event::status_change(Integration::Chat, "stopped".to_string()));
        state.update();

        assert!(!state.chat.busy);
        assert_eq!(state.chat.status.as_deref(), Some("stopped"));
        assert_eq!(state.activity_logs.len(), 3);
    }

    #[test]
    fn stats_and_auth_failures_are_recorded() {
        let mut state = state();
        let stats = IntegrationStats {
            total_emails: Some(4),
            ..Default::default()
        };
        state.add_event(Event::stats(Integration::Email, stats.clone()));
        state.add_event(Event::error(
            Integration::Email,
            "Failed to fetch Email status".to_string(),
            LogLevel::Error,
            true,
        ));
        state.update();

        assert_eq!(state.email.stats, Some(stats));
        assert!(state.auth_failed);
    }

    #[test]
    fn activity_log_is_bounded() {
        let mut state = state();
        for i in 0..crate::consts::cli_consts::MAX_ACTIVITY_LOGS + 5 {
            state.add_event(Event::status_change(Integration::Chat, i.to_string()));
        }
        state.update();
        assert_eq!(
            state.activity_logs.len(),
            crate::consts::cli_consts::MAX_ACTIVITY_LOGS
        );
    }
}
