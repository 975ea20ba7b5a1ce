//! HipChat v1 REST client.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{ChatError, Result};
use crate::model::{MessageRequest, Room, RoomList};

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.hipchat.com";

/// The two HipChat calls the relay needs.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn list_rooms(&self) -> Result<Vec<Room>>;

    async fn post_message(&self, request: &MessageRequest) -> Result<()>;
}

/// Client authenticated with a v1 admin or notification token.
#[derive(Clone)]
pub struct HipchatClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

impl HipchatClient {
    pub fn new(api_key: SecretString) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: SecretString) -> Result<Self> {
        Ok(Self {
            http: Client::builder().build()?,
            base_url: base_url.into(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1{path}", self.base_url.trim_end_matches('/'))
    }

    fn auth(&self) -> [(&'static str, &str); 2] {
        [
            ("auth_token", self.api_key.expose_secret()),
            ("format", "json"),
        ]
    }

    async fn read_body(response: Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ChatError::from_response(status, body))
        }
    }
}

#[async_trait]
impl ChatApi for HipchatClient {
    async fn list_rooms(&self) -> Result<Vec<Room>> {
        let response = self
            .http
            .get(self.url("/rooms/list"))
            .query(&self.auth())
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        let list: RoomList = serde_json::from_str(&body)?;
        Ok(list.rooms)
    }

    async fn post_message(&self, request: &MessageRequest) -> Result<()> {
        let response = self
            .http
            .post(self.url("/rooms/message"))
            .query(&self.auth())
            .form(request)
            .send()
            .await?;

        Self::read_body(response).await?;
        Ok(())
    }
}
