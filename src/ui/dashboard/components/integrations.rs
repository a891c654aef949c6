//! The two integration widgets: status label, counters and last failure

use super::super::state::{DashboardState, IntegrationWidget};
use crate::backend::Integration;
use crate::utils::time::format_timestamp;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_integrations(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_widget(f, chunks[0], &state.chat);
    render_widget(f, chunks[1], &state.email);
}

/// Green while running, blue right after a start, red once stopped, gray otherwise.
pub fn status_color(widget: &IntegrationWidget) -> Color {
    match widget.status.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("running") => Color::Green,
        Some("started") => Color::Blue,
        Some("stopped") => Color::Red,
        _ => Color::Gray,
    }
}

fn render_widget(f: &mut Frame, area: ratatui::layout::Rect, widget: &IntegrationWidget) {
    let mut lines = vec![Line::from(vec![
        Span::styled("Status: ", Style::default().fg(Color::Gray)),
        Span::styled(
            widget.status_label().to_string(),
            Style::default()
                .fg(status_color(widget))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            if widget.busy { "  (working...)" } else { "" },
            Style::default().fg(Color::LightYellow),
        ),
    ])];

    let total_label = match widget.integration {
        Integration::Chat => "Messages: ",
        Integration::Email => "Emails: ",
    };
    match &widget.stats {
        Some(stats) => {
            lines.push(Line::from(vec![
                Span::styled(total_label, Style::default().fg(Color::Gray)),
                Span::styled(stats.total().to_string(), Style::default().fg(Color::White)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Senders: ", Style::default().fg(Color::Gray)),
                Span::raw(stats.unique_senders.to_string()),
                Span::styled("  Replies: ", Style::default().fg(Color::Gray)),
                Span::raw(stats.replies_sent.to_string()),
            ]));
            if let Some(start) = &stats.date_range.start {
                lines.push(Line::from(vec![
                    Span::styled("Since: ", Style::default().fg(Color::Gray)),
                    Span::styled(format_timestamp(start), Style::default().fg(Color::Cyan)),
                ]));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "No stats yet",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    if let Some(error) = &widget.action_error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .title(format!("{} INTEGRATION", widget.integration).to_uppercase())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
