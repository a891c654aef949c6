//! Dashboard state

use crate::backend::{Group, Integration, IntegrationStats};
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::Instant;

/// What one integration widget shows.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationWidget {
    pub integration: Integration,
    /// Last label received, either from a poll or from a successful start/stop.
    /// `None` until the first one arrives.
    pub status: Option<String>,
    pub stats: Option<IntegrationStats>,
    /// A start or stop request is in flight. Only the outcome of that request clears it.
    pub busy: bool,
    /// Failure of the last start or stop, kept until the next one is triggered.
    pub action_error: Option<String>,
}

impl IntegrationWidget {
    pub fn new(integration: Integration) -> Self {
        Self {
            integration,
            status: None,
            stats: None,
            busy: false,
            action_error: None,
        }
    }

    /// Replaces the displayed label. Failures never reach this, so the last good label stays.
    pub fn apply_status(&mut self, status: String) {
        self.status = Some(status);
    }

    /// Marks a start or stop as in flight, returning false if one already is.
    pub fn begin_action(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        self.action_error = None;
        true
    }

    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or("no event")
    }
}

#[derive(Debug)]
pub struct DashboardState {
    pub environment: Environment,
    pub start_time: Instant,
    /// Phone of the linked chat account, if known.
    pub phone: Option<String>,
    pub groups: Vec<Group>,
    pub chat: IntegrationWidget,
    pub email: IntegrationWidget,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,
    /// Set once the backend rejects the session token.
    pub auth_failed: bool,
}

impl DashboardState {
    pub fn new(environment: Environment, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            environment,
            start_time,
            phone: ui_config.phone,
            groups: ui_config.groups,
            chat: IntegrationWidget::new(Integration::Chat),
            email: IntegrationWidget::new(Integration::Email),
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
            auth_failed: false,
        }
    }

    pub fn widget_mut(&mut self, integration: Integration) -> &mut IntegrationWidget {
        match integration {
            Integration::Chat => &mut self.chat,
            Integration::Email => &mut self.email,
        }
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }
}
