pub mod controls;
pub mod core;
pub mod poller;

pub use core::EventSender;
pub use poller::{StatusPoller, fetch_stats_once};
