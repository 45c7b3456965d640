/// Backend access for the chat widget
///
/// The widget talks to three endpoints: history on mount, one call per user
/// message, and one per submitted rating. `ChatBackend` is the seam between
/// the view and the transport so the conversation flow can run against a
/// scripted backend in tests.
///
/// # Usage
///
/// ```rust,no_run
/// use chat_widget::api::{ChatBackend, HttpBackend};
///
/// # async fn example() -> chat_widget::api::ApiResult<()> {
/// let backend = HttpBackend::new("http://localhost:5000");
/// let reply = backend.send_message("Hi").await?;
/// # Ok(())
/// # }
/// ```
mod http;

pub use http::HttpBackend;

use crate::types::{Message, Rating};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Prior conversation, oldest first.
    async fn fetch_messages(&self) -> ApiResult<Vec<Message>>;

    /// Sends one user message and returns the assistant's reply text.
    async fn send_message(&self, text: &str) -> ApiResult<String>;

    async fn submit_rating(&self, rating: Rating) -> ApiResult<()>;
}

/// Backend handle shared through the component tree.
pub type SharedBackend = Arc<dyn ChatBackend>;
