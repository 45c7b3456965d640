use super::{ApiError, ApiResult, ChatBackend};
use crate::config::WidgetConfig;
use crate::types::{Message, Rating};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

const MESSAGES_PATH: &str = "/api/messages";
const MESSAGE_PATH: &str = "/api/message";
const RATING_PATH: &str = "/api/rating";

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.api_base.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct SendMessageResponse {
    response: String,
}

#[derive(Serialize)]
struct RatingRequest {
    rating: Rating,
}

/// Reads the body and turns a non-success status into an error.
async fn success_body(response: Response) -> ApiResult<String> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(ApiError::Status { status, body })
    }
}

/// Keeps every well-formed record; a bad one is logged and skipped.
fn decode_history(records: Vec<serde_json::Value>) -> Vec<Message> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(message) => Some(message),
            Err(err) => {
                tracing::warn!(index, "skipping malformed history record: {err}");
                None
            }
        })
        .collect()
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn fetch_messages(&self) -> ApiResult<Vec<Message>> {
        let response = self.client.get(self.url(MESSAGES_PATH)).send().await?;
        let body = success_body(response).await?;
        let records: Vec<serde_json::Value> = serde_json::from_str(&body)?;
        Ok(decode_history(records))
    }

    async fn send_message(&self, text: &str) -> ApiResult<String> {
        let response = self
            .client
            .post(self.url(MESSAGE_PATH))
            .json(&SendMessageRequest { message: text })
            .send()
            .await?;
        let body = success_body(response).await?;
        let parsed: SendMessageResponse = serde_json::from_str(&body)?;
        Ok(parsed.response)
    }

    async fn submit_rating(&self, rating: Rating) -> ApiResult<()> {
        let response = self
            .client
            .post(self.url(RATING_PATH))
            .json(&RatingRequest { rating })
            .send()
            .await?;
        success_body(response).await?;
        Ok(())
    }
}
