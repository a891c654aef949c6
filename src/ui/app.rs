//! Main application state and UI loop

use crate::backend::{Backend as DashboardBackend, Group, Integration};
use crate::commands::tasks::TaskAction;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::routes::Route;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::login::render_login;
use crate::ui::splash::render_splash;
use crate::workers::EventSender;
use crate::workers::controls::spawn_task_action;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// Display options and data loaded before the UI starts.
#[derive(Debug, Clone, Default)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub phone: Option<String>,
    pub groups: Vec<Group>,
}

impl UIConfig {
    pub fn new(with_background_color: bool, phone: Option<String>, groups: Vec<Group>) -> Self {
        Self {
            with_background_color,
            phone,
            groups,
        }
    }
}

#[derive(Debug)]
pub enum Screen {
    Splash,
    /// The backend rejected the session; polling has been stopped.
    Login,
    Dashboard(Box<DashboardState>),
}

pub struct App {
    start_time: Instant,
    environment: Environment,
    current_screen: Screen,
    /// Receives events from the pollers and task controls.
    event_receiver: mpsc::Receiver<WorkerEvent>,
    /// Handed to task controls started from key presses.
    event_sender: EventSender,
    /// Stops the pollers.
    shutdown_sender: broadcast::Sender<()>,
    backend: Arc<dyn DashboardBackend>,
    ui_config: UIConfig,
    /// Events received while the splash screen is up.
    early_events: Vec<WorkerEvent>,
}

impl App {
    pub fn new(
        backend: Arc<dyn DashboardBackend>,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        event_sender: EventSender,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            environment: backend.environment().clone(),
            current_screen: Screen::Splash,
            event_receiver,
            event_sender,
            shutdown_sender,
            backend,
            ui_config,
            early_events: Vec::new(),
        }
    }

    fn show_dashboard(&mut self) {
        let mut state = DashboardState::new(
            self.environment.clone(),
            self.start_time,
            self.ui_config.clone(),
        );
        for event in self.early_events.drain(..) {
            state.add_event(event);
        }
        self.current_screen = Screen::Dashboard(Box::new(state));
    }

    /// Applies queued worker events. An authentication failure stops the pollers and switches to
    /// the login screen.
    fn apply_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match &mut self.current_screen {
                Screen::Dashboard(state) => state.add_event(event),
                Screen::Splash => self.early_events.push(event),
                Screen::Login => {}
            }
        }

        if let Screen::Dashboard(state) = &mut self.current_screen {
            state.update();
            if state.auth_failed {
                let _ = self.shutdown_sender.send(());
                self.current_screen = Screen::Login;
            }
        }
    }

    /// Handles a key press, returning the route to leave with when the UI should exit.
    fn handle_key(&mut self, code: KeyCode) -> Option<Route> {
        if matches!(code, KeyCode::Esc | KeyCode::Char('q')) {
            let _ = self.shutdown_sender.send(());
            return Some(match self.current_screen {
                Screen::Login => Route::Login,
                _ => Route::Dashboard,
            });
        }

        match self.current_screen {
            // Any other key skips the splash screen
            Screen::Splash => self.show_dashboard(),
            Screen::Login => return Some(Route::Login),
            Screen::Dashboard(_) => {
                if let Some((integration, action)) = task_key(code) {
                    self.trigger(integration, action);
                }
            }
        }
        None
    }

    /// Starts or stops a task unless one is already in flight for that integration.
    fn trigger(&mut self, integration: Integration, action: TaskAction) {
        if let Screen::Dashboard(state) = &mut self.current_screen {
            if !state.widget_mut(integration).begin_action() {
                return;
            }
            spawn_task_action(
                self.backend.clone(),
                integration,
                action,
                self.event_sender.clone(),
            );
        }
    }
}

/// Dashboard key bindings for task control.
pub fn task_key(code: KeyCode) -> Option<(Integration, TaskAction)> {
    match code {
        KeyCode::Char('s') => Some((Integration::Chat, TaskAction::Start)),
        KeyCode::Char('x') => Some((Integration::Chat, TaskAction::Stop)),
        KeyCode::Char('e') => Some((Integration::Email, TaskAction::Start)),
        KeyCode::Char('d') => Some((Integration::Email, TaskAction::Stop)),
        _ => None,
    }
}

/// Runs the UI until the user quits, returning the route to continue from.
///
/// Pollers are stopped before this returns. An authentication failure switches to the login
/// screen and the returned route is `Route::Login`.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<Route> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    loop {
        app.apply_events();
        terminal.draw(|f| render(f, &app.current_screen))?;

        if matches!(app.current_screen, Screen::Splash) && splash_start.elapsed() >= splash_duration
        {
            app.show_dashboard();
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                if let Some(route) = app.handle_key(key.code) {
                    return Ok(route);
                }
            }
        }
    }
}

fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Login => render_login(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
