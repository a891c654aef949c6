//! TUI mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::cli_messages::print_next_step;
use crate::routes::Route;
use crate::ui::{self, UIConfig};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{error::Error, io};

/// Runs the dashboard in the terminal UI until the user quits.
pub async fn run_tui_mode(
    session: SessionData,
    with_background: bool,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("TUI", &session.backend.environment().backend_url());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let app = ui::App::new(
        session.backend.clone(),
        session.event_receiver,
        session.event_sender,
        session.shutdown_sender.clone(),
        UIConfig::new(with_background, session.phone, session.groups),
    );

    let result = ui::run(&mut terminal, app).await;

    // Restore the terminal even when the UI failed.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    let route = result?;

    print_session_shutdown();
    for handle in session.join_handles {
        handle.abort();
    }
    if route == Route::Login {
        print_next_step(Route::Login);
    }
    print_session_exit_success();
    Ok(())
}
