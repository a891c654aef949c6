//! Headless mode: dashboard events printed to the console

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::cli_messages::print_next_step;
use crate::commands::tasks::format_group;
use crate::routes::Route;
use std::error::Error;

/// Prints events until Ctrl+C, or until the backend rejects the session.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.backend.environment().backend_url());
    for group in &session.groups {
        println!("{}", format_group(group));
    }

    let shutdown_sender = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender.send(());
        }
    });
    let mut shutdown_receiver = session.shutdown_sender.subscribe();

    let mut auth_failed = false;
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
                if event.auth_failure {
                    auth_failed = true;
                    let _ = session.shutdown_sender.send(());
                }
            }
            _ = shutdown_receiver.recv() => break,
        }
    }

    print_session_shutdown();
    for handle in session.join_handles {
        handle.abort();
    }
    if auth_failed {
        print_next_step(Route::Login);
    }
    print_session_exit_success();
    Ok(())
}
