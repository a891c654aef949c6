//! Dashboard screen: one widget per integration, the linked groups and an activity log

pub mod components;
pub mod renderer;
pub mod state;
pub mod updaters;

pub use renderer::render_dashboard;
pub use state::DashboardState;
