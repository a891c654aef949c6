//! Tagged terminal output for the one-shot commands (login, task control, uploads).
//!
//! Every line carries a colored tag so outcomes stand out when commands are chained in scripts.

use crate::commands::CommandError;
use crate::routes::Route;

const INFO: &str = "\x1b[1;33m[INFO]\x1b[0m";
const WARN: &str = "\x1b[1;91m[WARN]\x1b[0m";
const ERROR: &str = "\x1b[1;31m[ERROR]\x1b[0m";
const SUCCESS: &str = "\x1b[1;32m[SUCCESS]\x1b[0m";
const NEXT: &str = "\x1b[1;36m[NEXT]\x1b[0m";

fn print_tagged(tag: &str, title: &str, details: &str) {
    if details.is_empty() {
        println!("{} {}", tag, title);
    } else {
        println!("{} {}\t {}", tag, title, details);
    }
}

pub fn print_info(title: &str, details: &str) {
    print_tagged(INFO, title, details);
}

pub fn print_warn(title: &str, details: &str) {
    print_tagged(WARN, title, details);
}

/// Errors go to stderr so scripted callers can separate them from results.
pub fn print_error(title: &str, details: Option<&str>) {
    eprintln!("{} {}", ERROR, title);
    if let Some(details) = details {
        eprintln!("{} Details: {}", ERROR, details);
    }
}

pub fn print_success(title: &str, details: &str) {
    print_tagged(SUCCESS, title, details);
}

/// Points the user at the command that continues from `route`.
pub fn print_next_step(route: Route) {
    println!("{} {}", NEXT, route.next_step());
}

/// Reports a failed command, with backend details and the follow-up route when there is one.
pub fn report_command_error(err: &CommandError) {
    match err {
        CommandError::NoFileSelected => print_warn(&err.to_string(), ""),
        _ => print_error(&err.to_string(), err.details().as_deref()),
    }
    if let Some(route) = err.route() {
        print_next_step(route);
    }
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}
