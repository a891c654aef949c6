//! Session info and the linked account's groups

use crate::commands::tasks::format_group;
use crate::environment::Environment;

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn format_uptime(secs: u64) -> String {
    if secs >= 86400 {
        format!("{}d {}h {}m", secs / 86400, (secs % 86400) / 3600, (secs % 3600) / 60)
    } else if secs >= 3600 {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

pub fn render_info_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut info_lines = Vec::new();

    info_lines.push(Line::from(Span::styled(
        format!("Phone: {}", state.phone.as_deref().unwrap_or("Not linked")),
        Style::default().fg(Color::LightBlue),
    )));

    let env_color = match state.environment {
        Environment::Production => Color::Green,
        Environment::Local => Color::LightYellow,
        Environment::Custom { .. } => Color::Yellow,
    };
    info_lines.push(Line::from(Span::styled(
        format!("Backend: {}", state.environment.backend_url()),
        Style::default().fg(env_color),
    )));

    info_lines.push(Line::from(Span::styled(
        format!(
            "Uptime: {}",
            format_uptime(state.start_time.elapsed().as_secs())
        ),
        Style::default().fg(Color::LightGreen),
    )));

    info_lines.push(Line::from(""));
    if state.groups.is_empty() {
        info_lines.push(Line::from(Span::styled(
            "No groups found",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for group in &state.groups {
        info_lines.push(Line::from(Span::styled(
            format_group(group).trim_start().to_string(),
            Style::default().fg(Color::White),
        )));
    }

    let info_block = Block::default()
        .title(format!("GROUPS ({})", state.groups.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let info_paragraph = Paragraph::new(info_lines)
        .block(info_block)
        .wrap(Wrap { trim: true });
    f.render_widget(info_paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::format_uptime;

    #[test]
    fn uptime_formats() {
        assert_eq!(format_uptime(75), "1m 15s");
        assert_eq!(format_uptime(3_725), "1h 2m 5s");
        assert_eq!(format_uptime(90_060), "1d 1h 1m");
    }
}
