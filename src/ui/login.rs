//! Shown when the backend rejects the stored session.

use crate::routes::Route;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn render_login(f: &mut Frame) {
    let block = Block::default()
        .title("Login required")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = format!(
        "Your session was rejected by the backend and status polling has stopped.\n\n{}\n\nPress any key to exit",
        Route::Login.next_step()
    );
    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(paragraph, f.area());
}
