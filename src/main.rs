mod backend;
mod cli_messages;
mod commands;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod routes;
mod session;
mod ui;
mod utils;
mod workers;

use crate::backend::{BackendClient, Credentials, FileType, Integration, OrganizationForm, StartTaskRequest};
use crate::cli_messages::{print_next_step, report_command_error};
use crate::commands::upload::UploadRequest;
use crate::commands::{CommandError, auth, tasks};
use crate::config::{Session, get_log_path, get_session_path};
use crate::consts::cli_consts::polling::poll_interval;
use crate::environment::Environment;
use crate::routes::Route;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Monitor and control Telegram and email sentiment ingestion
struct Args {
    /// Backend to talk to: "production", "local" or a base URL
    #[arg(long, global = true, env = "DASHBOARD_ENVIRONMENT", value_name = "ENV")]
    env: Option<String>,

    /// Backend base URL. Takes precedence over --env
    #[arg(long, global = true, value_name = "URL")]
    backend_url: Option<String>,

    /// Status polling interval in milliseconds
    #[arg(
        long,
        global = true,
        value_name = "MS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    poll_interval_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an organization account
    Signup {
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log out and remove the stored session
    Logout,
    /// Register the organization's Telegram API credentials
    Organization {
        #[arg(long)]
        name: String,
        #[arg(long)]
        api_id: String,
        #[arg(long)]
        api_hash: String,
        /// Mailbox app password, prompted for when omitted
        #[arg(long)]
        app_password: Option<String>,
        #[arg(long)]
        phone: String,
    },
    /// Link a Telegram account. Prompts for the verification code if one is sent
    Link {
        /// Defaults to the phone already stored in the session
        #[arg(long)]
        phone: Option<String>,
    },
    /// List the linked account's groups
    Groups,
    /// Show the latest sentiment analysis of a group
    Analysis {
        #[arg(long, allow_hyphen_values = true)]
        group_id: i64,
    },
    /// Control the Telegram ingestion task
    Chat {
        #[command(subcommand)]
        action: TaskCommand,
    },
    /// Control the email ingestion task
    Email {
        #[command(subcommand)]
        action: TaskCommand,
    },
    /// Upload a file to the retrieval pipeline
    Upload {
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = FileType::Image)]
        file_type: FileType,
        /// Only sent for images
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Open the live dashboard
    Dashboard {
        /// Print events to the console instead of drawing the terminal UI
        #[arg(long, default_value = "false")]
        headless: bool,
        /// Paint the dashboard background
        #[arg(long = "with-background", default_value = "false")]
        with_background: bool,
    },
}

#[derive(Subcommand)]
enum TaskCommand {
    /// Start the task
    Start {
        /// Restrict a Telegram task to these group ids
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        group_ids: Vec<i64>,
        /// Restrict an email task with these filters
        #[arg(long, value_delimiter = ',')]
        filters: Vec<String>,
    },
    /// Stop the task
    Stop,
    /// Show the task status
    Status,
    /// Show the task's counters
    Stats,
    /// List active tasks
    List,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let session_path = get_session_path()?;
    // The terminal UI owns the screen, so its logs go to a file.
    let draws_ui = matches!(args.command, Command::Dashboard { headless: false, .. });
    logging::init(draws_ui.then(|| get_log_path(&session_path)).as_deref());

    let environment = Environment::resolve(args.backend_url, args.env.as_deref());
    log::debug!("{:?}", environment);

    let result = match args.command {
        Command::Dashboard {
            headless,
            with_background,
        } => {
            let interval = poll_interval(args.poll_interval_ms);
            let session = match setup_session(&session_path, environment, interval).await {
                Ok(session) => session,
                Err(e) => match e.downcast_ref::<CommandError>() {
                    Some(command_error) => exit_reported(command_error),
                    None => return Err(e),
                },
            };
            return if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            };
        }
        command => run_command(command, environment, &session_path).await,
    };

    match result {
        Ok(Some(route)) => {
            print_next_step(route);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => exit_reported(&e),
    }
}

/// Reports the error with its next-step hint and exits with a failing status.
fn exit_reported(error: &CommandError) -> ! {
    report_command_error(error);
    std::process::exit(1)
}

/// Runs a one-shot command, returning the route to suggest next.
async fn run_command(
    command: Command,
    environment: Environment,
    session_path: &Path,
) -> Result<Option<Route>, CommandError> {
    let session = Session::load_or_default(session_path)?;
    let backend = BackendClient::new(environment)
        .map_err(|e| CommandError::backend("Failed to create the HTTP client", e))?
        .with_token(session.token());

    match command {
        Command::Signup { email, password } => {
            let credentials = credentials(email, password)?;
            auth::signup(&credentials, session_path, &backend).await.map(Some)
        }
        Command::Login { email, password } => {
            let credentials = credentials(email, password)?;
            auth::login(&credentials, session_path, &backend).await.map(Some)
        }
        Command::Logout => auth::logout(session_path, &backend).await.map(Some),
        Command::Organization {
            name,
            api_id,
            api_hash,
            app_password,
            phone,
        } => {
            let app_password = match app_password {
                Some(p) => p,
                None => prompt("App password: ")?,
            };
            let form = OrganizationForm {
                name,
                api_id,
                api_hash,
                app_password,
                phone,
            };
            auth::register_organization(&form, session_path, &backend)
                .await
                .map(Some)
        }
        Command::Link { phone } => {
            let phone = match phone {
                Some(phone) => phone,
                None => {
                    if let Some(route) = auth::check_existing_link(&session, &backend).await {
                        return Ok(Some(route));
                    }
                    prompt("Telegram phone number: ")?
                }
            };
            auth::link_account(&phone, session_path, &backend, |message| {
                if !message.is_empty() {
                    println!("{}", message);
                }
                prompt("Verification code: ")
            })
            .await
            .map(Some)
        }
        Command::Groups => match tasks::list_groups(&session, &backend).await {
            Ok(_) => Ok(None),
            // Token problems go to login; anything else back to organization setup.
            Err(e) if e.route().is_some() => Err(e),
            Err(e) => {
                report_command_error(&e);
                Ok(Some(tasks::groups_failure_route(&e)))
            }
        },
        Command::Analysis { group_id } => tasks::show_analysis(group_id, &session, &backend)
            .await
            .map(|_| None),
        Command::Chat { action } => {
            run_task_command(Integration::Chat, action, &session, &backend).await
        }
        Command::Email { action } => {
            run_task_command(Integration::Email, action, &session, &backend).await
        }
        Command::Upload {
            file,
            file_type,
            description,
        } => {
            let request = UploadRequest {
                file,
                file_type,
                description,
            };
            commands::upload::upload(&request, &session, &backend)
                .await
                .map(|_| None)
        }
        Command::Dashboard { .. } => Ok(Some(Route::Dashboard)),
    }
}

async fn run_task_command(
    integration: Integration,
    action: TaskCommand,
    session: &Session,
    backend: &BackendClient,
) -> Result<Option<Route>, CommandError> {
    match action {
        TaskCommand::Start { group_ids, filters } => {
            let request = StartTaskRequest {
                group_ids: (!group_ids.is_empty()).then_some(group_ids),
                filters: (!filters.is_empty()).then_some(filters),
            };
            tasks::start_task(integration, &request, session, backend).await?;
        }
        TaskCommand::Stop => tasks::stop_task(integration, session, backend).await?,
        TaskCommand::Status => {
            tasks::show_status(integration, session, backend).await?;
        }
        TaskCommand::Stats => {
            tasks::show_stats(integration, session, backend).await?;
        }
        TaskCommand::List => {
            tasks::list_tasks(integration, session, backend).await?;
        }
    }
    Ok(None)
}

fn credentials(email: String, password: Option<String>) -> io::Result<Credentials> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };
    Ok(Credentials { email, password })
}

/// Reads one trimmed line from stdin after printing `label`.
fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
