//! Where a flow lands once it finishes.
//!
//! The TUI switches screens on a route; one-shot commands print the route's next step.

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum Route {
    /// Signed out.
    Home,
    /// The session is missing or was rejected.
    Login,
    /// Integration credentials still need to be registered.
    Organization,
    /// The chat account still needs to be linked.
    LinkAccount,
    /// Monitoring both integrations.
    Dashboard,
    /// Uploading files for the retrieval pipeline.
    Uploads,
}

impl Route {
    /// Command that continues from this route.
    pub fn next_step(&self) -> &'static str {
        match self {
            Route::Home => "Sign in again with: sentiment-dashboard login",
            Route::Login => "Log in with: sentiment-dashboard login",
            Route::Organization => {
                "Register your integration credentials with: sentiment-dashboard organization"
            }
            Route::LinkAccount => "Link your Telegram account with: sentiment-dashboard link",
            Route::Dashboard => "Open the dashboard with: sentiment-dashboard dashboard",
            Route::Uploads => "Upload a file with: sentiment-dashboard upload --file <PATH>",
        }
    }
}
