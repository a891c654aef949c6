//! Event System
//!
//! Types emitted by the status pollers and task controls, consumed by the dashboard and the
//! headless console.

use crate::backend::{Integration, IntegrationStats};
use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    /// A new status label arrived for an integration.
    StatusChange,
    /// Fresh counters arrived for an integration.
    Stats,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub integration: Integration,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Status label for status change events
    pub status: Option<String>,
    /// Counters for stats events
    pub stats: Option<IntegrationStats>,
    /// Set when the backend rejected the session token
    pub auth_failure: bool,
    /// Outcome of a start or stop triggered from the dashboard, as opposed to a poll
    pub task_control: bool,
}

impl Event {
    fn new(integration: Integration, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            integration,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            status: None,
            stats: None,
            auth_failure: false,
            task_control: false,
        }
    }

    pub fn status_change(integration: Integration, status: String) -> Self {
        let mut event = Self::new(
            integration,
            format!("{} status: {}", integration, status),
            EventType::StatusChange,
            LogLevel::Debug,
        );
        event.status = Some(status);
        event
    }

    pub fn stats(integration: Integration, stats: IntegrationStats) -> Self {
        let mut event = Self::new(
            integration,
            format!("{} stats: {} total", integration, stats.total()),
            EventType::Stats,
            LogLevel::Debug,
        );
        event.stats = Some(stats);
        event
    }

    pub fn with_level(
        integration: Integration,
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(integration, msg, event_type, log_level)
    }

    pub fn error(integration: Integration, msg: String, log_level: LogLevel, auth_failure: bool) -> Self {
        let mut event = Self::new(integration, msg, EventType::Error, log_level);
        event.auth_failure = auth_failure;
        event
    }

    /// Marks this event as the outcome of a start or stop action.
    pub fn for_task_control(mut self) -> Self {
        self.task_control = true;
        self
    }

    pub fn should_display(&self) -> bool {
        // Status and stats updates are rendered in their widgets, not in the log
        if matches!(self.event_type, EventType::StatusChange | EventType::Stats) {
            return should_log_with_env(self.log_level);
        }
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_change_carries_label() {
        let event = Event::status_change(Integration::Email, "running".to_string());
        assert_eq!(event.status.as_deref(), Some("running"));
        assert_eq!(event.event_type, EventType::StatusChange);
        assert!(event.msg.contains("Email status: running"));
    }

    #[test]
    fn errors_are_always_displayed_at_warn() {
        let event = Event::error(Integration::Chat, "boom".into(), LogLevel::Warn, false);
        assert!(event.should_display());
    }
}
