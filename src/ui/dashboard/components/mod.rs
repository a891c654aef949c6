//! Dashboard panels

pub mod footer;
pub mod header;
pub mod info_panel;
pub mod integrations;
pub mod logs;
