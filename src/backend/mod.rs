use crate::backend::error::BackendError;
use crate::environment::Environment;

pub(crate) mod client;
pub use client::BackendClient;
pub mod error;
pub mod models;

pub use models::{
    CodeResponse, Credentials, FileType, FileUpload, Group, GroupsResponse, Integration,
    IntegrationStats, LinkResponse, LogoutResponse, OrganizationForm, OrganizationResponse,
    SentimentAnalysis, StartTaskRequest, TaskList, TaskResponse, TaskStatus, TokenResponse,
    UploadResponse,
};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Creates an organization account and returns its bearer token.
    async fn signup(&self, credentials: &Credentials) -> Result<TokenResponse, BackendError>;

    /// Logs an organization in and returns its bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, BackendError>;

    /// Invalidates the linked chat session of an organization.
    async fn logout(
        &self,
        organization_id: &str,
        phone: &str,
    ) -> Result<LogoutResponse, BackendError>;

    /// Registers the organization's integration credentials.
    async fn register_organization(
        &self,
        form: &OrganizationForm,
    ) -> Result<OrganizationResponse, BackendError>;

    /// First linking step: asks the chat platform to send a code to `phone`.
    async fn telegram_login(&self, phone: &str) -> Result<LinkResponse, BackendError>;

    /// Second linking step: submits the code received on `phone`.
    async fn submit_code(&self, phone: &str, code: &str) -> Result<CodeResponse, BackendError>;

    /// Lists the groups of the linked chat account.
    async fn groups(&self, phone: &str) -> Result<GroupsResponse, BackendError>;

    async fn start_task(
        &self,
        integration: Integration,
        request: &StartTaskRequest,
    ) -> Result<TaskResponse, BackendError>;

    async fn stop_task(&self, integration: Integration) -> Result<TaskResponse, BackendError>;

    async fn task_status(&self, integration: Integration) -> Result<TaskStatus, BackendError>;

    async fn task_stats(&self, integration: Integration)
    -> Result<IntegrationStats, BackendError>;

    async fn list_tasks(&self, integration: Integration) -> Result<TaskList, BackendError>;

    /// Submits a file to the retrieval pipeline.
    async fn upload_file(&self, upload: &FileUpload) -> Result<UploadResponse, BackendError>;

    /// Fetches the most recent sentiment analysis of a group.
    async fn latest_analysis(&self, group_id: i64) -> Result<SentimentAnalysis, BackendError>;
}
