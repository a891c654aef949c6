//! Control and inspection of the backend's ingestion jobs, plus the group listing.

use super::{CommandError, require_token};
use crate::backend::{Backend, Group, Integration, IntegrationStats, StartTaskRequest};
use crate::config::Session;
use crate::routes::Route;
use crate::utils::time::format_timestamp;
use crate::{print_cmd_info, print_cmd_success};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TaskAction {
    Start,
    Stop,
}

impl TaskAction {
    fn verb(&self) -> &'static str {
        match self {
            TaskAction::Start => "start",
            TaskAction::Stop => "stop",
        }
    }

    /// The label a widget shows right after the action succeeds.
    pub fn past_tense(&self) -> &'static str {
        match self {
            TaskAction::Start => "Started",
            TaskAction::Stop => "Stopped",
        }
    }
}

/// User-facing text for a failed start/stop, e.g. "Failed to start background task".
pub fn failure_message(integration: Integration, action: TaskAction) -> String {
    format!("Failed to {} {}", action.verb(), integration.task_noun())
}

pub async fn start_task(
    integration: Integration,
    request: &StartTaskRequest,
    session: &Session,
    backend: &dyn Backend,
) -> Result<(), CommandError> {
    require_token(session)?;
    let response = backend
        .start_task(integration, request)
        .await
        .map_err(|e| CommandError::backend(failure_message(integration, TaskAction::Start), e))?;
    if !response.success {
        return Err(CommandError::Rejected(response.message));
    }
    print_cmd_success!(
        TaskAction::Start.past_tense(),
        "{} (task {})",
        response.message,
        response.task_id.as_deref().unwrap_or("-")
    );
    Ok(())
}

pub async fn stop_task(
    integration: Integration,
    session: &Session,
    backend: &dyn Backend,
) -> Result<(), CommandError> {
    require_token(session)?;
    let response = backend
        .stop_task(integration)
        .await
        .map_err(|e| CommandError::backend(failure_message(integration, TaskAction::Stop), e))?;
    if !response.success {
        return Err(CommandError::Rejected(response.message));
    }
    print_cmd_success!(TaskAction::Stop.past_tense(), "{}", response.message);
    Ok(())
}

/// Prints the job's status label, or "Unknown" when the backend reports none.
pub async fn show_status(
    integration: Integration,
    session: &Session,
    backend: &dyn Backend,
) -> Result<Option<String>, CommandError> {
    require_token(session)?;
    let status = backend.task_status(integration).await.map_err(|e| {
        CommandError::backend(format!("Failed to fetch {} status", integration), e)
    })?;

    print_cmd_info!(
        &format!("{} task status:", integration),
        "{}",
        status.status.as_deref().unwrap_or("Unknown")
    );
    if let Some(started_at) = &status.started_at {
        println!("  Started:  {}", format_timestamp(started_at));
    }
    if let Some(stopped_at) = &status.stopped_at {
        println!("  Stopped:  {}", format_timestamp(stopped_at));
    }
    if let Some(address) = &status.email_address {
        println!("  Mailbox:  {}", address);
    }
    if let Some(groups) = &status.allowed_groups {
        println!("  Groups:   {:?}", groups);
    }
    Ok(status.status)
}

pub async fn show_stats(
    integration: Integration,
    session: &Session,
    backend: &dyn Backend,
) -> Result<IntegrationStats, CommandError> {
    require_token(session)?;
    let stats = backend.task_stats(integration).await.map_err(|e| {
        CommandError::backend(format!("Failed to fetch {} stats", integration), e)
    })?;

    let total_label = match integration {
        Integration::Chat => "Total messages",
        Integration::Email => "Total emails",
    };
    print_cmd_info!(&format!("{} stats", integration), "");
    println!("  {:<16}{}", total_label, stats.total());
    println!("  {:<16}{}", "Unique senders", stats.unique_senders);
    println!("  {:<16}{}", "Replies sent", stats.replies_sent);
    if let (Some(start), Some(end)) = (&stats.date_range.start, &stats.date_range.end) {
        println!(
            "  {:<16}{} - {}",
            "Date range",
            format_timestamp(start),
            format_timestamp(end)
        );
    }
    Ok(stats)
}

pub async fn list_tasks(
    integration: Integration,
    session: &Session,
    backend: &dyn Backend,
) -> Result<u64, CommandError> {
    require_token(session)?;
    let list = backend.list_tasks(integration).await.map_err(|e| {
        CommandError::backend(format!("Failed to list {} tasks", integration), e)
    })?;

    print_cmd_info!(
        &format!("Active {} tasks:", integration),
        "{}",
        list.total_active
    );
    for (id, task) in &list.active_tasks {
        println!("  {}  {}", id, task);
    }
    Ok(list.total_active)
}

/// Lists the linked account's groups. A failure sends the user back to organization setup.
pub async fn list_groups(
    session: &Session,
    backend: &dyn Backend,
) -> Result<Vec<Group>, CommandError> {
    require_token(session)?;
    let phone = session.phone.as_deref().unwrap_or_default();
    let response = backend
        .groups(phone)
        .await
        .map_err(|e| CommandError::backend("Failed to fetch groups", e))?;

    if response.groups.is_empty() {
        print_cmd_info!("No groups found.", "{}", response.message);
    }
    for group in &response.groups {
        println!("{}", format_group(group));
    }
    Ok(response.groups)
}

/// Route taken when the group listing fails for a reason other than the token.
pub fn groups_failure_route(err: &CommandError) -> Route {
    err.route().unwrap_or(Route::Organization)
}

pub fn format_group(group: &Group) -> String {
    let handle = group
        .username
        .as_ref()
        .map(|u| format!(" @{}", u))
        .unwrap_or_default();
    format!(
        "{:>16}  {}{} ({} members)",
        group.id, group.title, handle, group.participants_count
    )
}

pub async fn show_analysis(
    group_id: i64,
    session: &Session,
    backend: &dyn Backend,
) -> Result<(), CommandError> {
    require_token(session)?;
    let analysis = backend
        .latest_analysis(group_id)
        .await
        .map_err(|e| CommandError::backend("Failed to fetch the latest analysis", e))?;
    if !analysis.success || analysis.analysis.is_null() {
        print_cmd_info!("No analysis available for this group yet.", "");
        return Ok(());
    }
    let pretty = serde_json::to_string_pretty(&analysis.analysis)
        .unwrap_or_else(|_| analysis.analysis.to_string());
    println!("{}", pretty);
    Ok(())
}
