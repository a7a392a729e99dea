pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::chat::ChatDto;

pub use self::http::HttpChatClient;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid chat API url '{url}': {source}")] InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to chat API failed: {0}")] Transport(#[from] reqwest::Error),

    #[error("chat API returned {status}: {body}")] Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode chat API response: {0}")] Decode(#[from] serde_json::Error),
}

/// Sends the whole conversation and receives its replacement.
#[async_trait]
pub trait ConversationSync: Send + Sync {
    async fn respond_to(&self, chat: &ChatDto) -> Result<ChatDto, SyncError>;
}
