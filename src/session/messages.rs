//! Start and exit notices printed around a dashboard session

pub const COLOR_INFO: &str = "\x1b[1;36m";
pub const COLOR_SUCCESS: &str = "\x1b[1;32m";
pub const COLOR_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone)]
pub enum SessionMessage {
    Info(String),
    Success(String),
}

impl SessionMessage {
    pub fn print(&self) {
        match self {
            Self::Info(msg) => println!("{}[INFO]{} {}", COLOR_INFO, COLOR_RESET, msg),
            Self::Success(msg) => println!("{}[SUCCESS]{} {}", COLOR_SUCCESS, COLOR_RESET, msg),
        }
    }
}

pub fn print_session_starting(mode: &str, backend_url: &str) {
    SessionMessage::Info(format!(
        "Starting {} dashboard against {}",
        mode, backend_url
    ))
    .print();
}

pub fn print_session_shutdown() {
    SessionMessage::Info("Stopping status polling...".to_string()).print();
}

pub fn print_session_exit_success() {
    SessionMessage::Success("Dashboard closed".to_string()).print();
}
