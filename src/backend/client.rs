//! Sentiment Backend Client
//!
//! A JSON-over-HTTP client for the analysis backend's `/api/v1` routes.

use crate::backend::error::BackendError;
use crate::backend::models::{
    CodeResponse, Credentials, FileUpload, GroupsResponse, Integration, IntegrationStats,
    LinkResponse, LogoutResponse, OrganizationForm, OrganizationResponse, SentimentAnalysis,
    StartTaskRequest, TaskList, TaskResponse, TaskStatus, TokenResponse, UploadResponse,
};
use crate::backend::Backend;
use crate::consts::cli_consts::http;
use crate::environment::Environment;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("sentiment-dashboard/", env!("CARGO_PKG_VERSION"));

const API_PREFIX: &str = "api/v1";

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    environment: Environment,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(environment: Environment) -> Result<Self, BackendError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::CONNECT_TIMEOUT)
            .timeout(http::REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
            token: None,
        })
    }

    /// Attaches a bearer token to every subsequent request. Empty tokens are ignored.
    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.token = token.filter(|t| !t.is_empty()).map(str::to_string);
        self
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.environment.backend_url().trim_end_matches('/'),
            API_PREFIX,
            endpoint.trim_start_matches('/')
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BackendError> {
        serde_json::from_slice(bytes).map_err(BackendError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, BackendError> {
        if !response.status().is_success() {
            return Err(BackendError::from_response(response).await);
        }
        Ok(response)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, BackendError> {
        let response = self.authorize(request).send().await?;
        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, BackendError> {
        let url = self.build_url(endpoint);
        log::debug!("GET {}", url);
        self.send(self.client.get(&url)).await
    }

    async fn post_request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let url = self.build_url(endpoint);
        log::debug!("POST {}", url);
        self.send(self.client.post(&url).json(body)).await
    }

    async fn delete_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<T, BackendError> {
        let url = self.build_url(endpoint);
        log::debug!("DELETE {}", url);
        self.send(self.client.delete(&url)).await
    }

    fn task_endpoint(integration: Integration, action: &str) -> String {
        format!("{}/{}", integration.tasks_path(), action)
    }
}

#[async_trait::async_trait]
impl Backend for BackendClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn signup(&self, credentials: &Credentials) -> Result<TokenResponse, BackendError> {
        self.post_request("signup", credentials).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, BackendError> {
        self.post_request("login", credentials).await
    }

    async fn logout(
        &self,
        organization_id: &str,
        phone: &str,
    ) -> Result<LogoutResponse, BackendError> {
        let endpoint = format!(
            "logout/{}/{}",
            urlencoding::encode(organization_id),
            urlencoding::encode(phone)
        );
        self.get_request(&endpoint).await
    }

    async fn register_organization(
        &self,
        form: &OrganizationForm,
    ) -> Result<OrganizationResponse, BackendError> {
        self.post_request("organizations", form).await
    }

    async fn telegram_login(&self, phone: &str) -> Result<LinkResponse, BackendError> {
        self.post_request("telegram-login", &serde_json::json!({ "phone": phone }))
            .await
    }

    async fn submit_code(&self, phone: &str, code: &str) -> Result<CodeResponse, BackendError> {
        self.post_request("code", &serde_json::json!({ "phone": phone, "code": code }))
            .await
    }

    async fn groups(&self, phone: &str) -> Result<GroupsResponse, BackendError> {
        self.post_request("groups", &serde_json::json!({ "phone": phone }))
            .await
    }

    async fn start_task(
        &self,
        integration: Integration,
        request: &StartTaskRequest,
    ) -> Result<TaskResponse, BackendError> {
        self.post_request(&Self::task_endpoint(integration, "start"), request)
            .await
    }

    async fn stop_task(&self, integration: Integration) -> Result<TaskResponse, BackendError> {
        self.delete_request(&Self::task_endpoint(integration, "stop"))
            .await
    }

    async fn task_status(&self, integration: Integration) -> Result<TaskStatus, BackendError> {
        self.get_request(&Self::task_endpoint(integration, "status"))
            .await
    }

    async fn task_stats(
        &self,
        integration: Integration,
    ) -> Result<IntegrationStats, BackendError> {
        self.get_request(&Self::task_endpoint(integration, "stats"))
            .await
    }

    async fn list_tasks(&self, integration: Integration) -> Result<TaskList, BackendError> {
        self.get_request(&Self::task_endpoint(integration, "list"))
            .await
    }

    async fn upload_file(&self, upload: &FileUpload) -> Result<UploadResponse, BackendError> {
        let url = self.build_url("uploads/upload-file/");
        log::debug!("POST {} ({} bytes)", url, upload.bytes.len());
        let form = Form::new()
            .part(
                "file",
                Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone()),
            )
            .text("file_type", upload.file_type.to_string())
            .text("description", upload.description.clone());
        self.send(self.client.post(&url).multipart(form)).await
    }

    async fn latest_analysis(&self, group_id: i64) -> Result<SentimentAnalysis, BackendError> {
        self.get_request(&format!("latest-sentiment-analysis?group_id={}", group_id))
            .await
    }
}

#[cfg(test)]
/// These are ignored by default since they require a live backend to run.
mod live_backend_tests {
    use crate::backend::{Backend, Integration};
    use crate::environment::Environment;

    #[tokio::test]
    #[ignore] // This test requires a live backend instance.
    /// Should reject status requests without a token.
    async fn test_status_requires_token() {
        let client = super::BackendClient::new(Environment::Local).unwrap();
        match client.task_status(Integration::Chat).await {
            Ok(status) => panic!("Unexpected status without a token: {:?}", status),
            Err(e) => assert!(e.is_auth_failure(), "unexpected error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_versioned_urls() {
        let client = BackendClient::new(Environment::Custom {
            backend_url: "http://localhost:8000/".to_string(),
        })
        .unwrap();
        assert_eq!(
            client.build_url("/email-tasks/status"),
            "http://localhost:8000/api/v1/email-tasks/status"
        );
        assert_eq!(
            BackendClient::task_endpoint(Integration::Chat, "stats"),
            "background-tasks/stats"
        );
    }

    #[test]
    fn empty_tokens_are_not_attached() {
        let client = BackendClient::new(Environment::Local)
            .unwrap()
            .with_token(Some(""));
        assert!(client.token.is_none());
    }

    #[test]
    fn authorized_requests_carry_only_the_bearer_token() {
        let client = BackendClient::new(Environment::Local)
            .unwrap()
            .with_token(Some("jwt"));
        let request = client
            .authorize(client.client.get(client.build_url("groups")))
            .build()
            .unwrap();

        assert_eq!(request.headers()["authorization"], "Bearer jwt");
        assert!(request.headers().get("x-build-timestamp").is_none());
    }

    #[tokio::test]
    /// An unreachable backend surfaces as a transport error, not a panic.
    async fn unreachable_backend_is_a_transport_error() {
        let client = BackendClient::new(Environment::Custom {
            backend_url: "http://127.0.0.1:9".to_string(),
        })
        .unwrap();
        let result = client.task_status(Integration::Email).await;
        assert!(matches!(result, Err(BackendError::Reqwest(_))));
    }
}
