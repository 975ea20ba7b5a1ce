//! Basecamp Classic API client.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::error::{FeedError, Result};
use crate::model::{Event, Project};
use crate::pagination::PageSource;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://basecamp.com";

/// Default `User-Agent`; Basecamp rejects anonymous clients.
pub const DEFAULT_USER_AGENT: &str = "basecamp-hipchat";

/// Credentials and endpoint for one Basecamp login.
#[derive(Debug, Clone)]
pub struct BasecampConfig {
    pub base_url: String,
    pub username: String,
    pub password: SecretString,
    pub user_agent: String,
}

impl BasecampConfig {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: username.into(),
            password,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP client for the account-scoped `/api/v1` endpoints.
#[derive(Clone)]
pub struct BasecampClient {
    http: Client,
    config: BasecampConfig,
}

impl BasecampClient {
    pub fn new(config: BasecampConfig) -> Result<Self> {
        let http = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self { http, config })
    }

    fn url(&self, account: u64, path: &str) -> String {
        format!(
            "{}/{account}/api/v1{path}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        account: u64,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .http
            .get(self.url(account, path))
            .basic_auth(
                &self.config.username,
                Some(self.config.password.expose_secret()),
            )
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FeedError::Status { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// List the projects visible to this login.
    pub async fn list_projects(&self, account: u64) -> Result<Vec<Project>> {
        self.get_json(account, "/projects.json", &[]).await
    }
}

#[async_trait]
impl PageSource for BasecampClient {
    async fn events_page(
        &self,
        account: u64,
        since: DateTime<Utc>,
        page: u32,
    ) -> Result<Vec<Event>> {
        let query = [
            ("page", page.to_string()),
            ("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ];
        self.get_json(account, "/events.json", &query).await
    }
}
