use async_trait::async_trait;
use log::{ debug, info };
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE } };
use url::Url;

use super::{ ConversationSync, SyncError };
use crate::cli::{ normalize_route, Args };
use crate::models::chat::ChatDto;

#[derive(Debug, Clone)]
pub struct HttpChatClient {
    http: HttpClient,
    endpoint: Url,
}

impl HttpChatClient {
    pub fn new(base_url: &str, route: &str) -> Result<Self, SyncError> {
        let raw = format!("{}{}", base_url.trim_end_matches('/'), normalize_route(route));
        let endpoint = Url::parse(&raw).map_err(|source| SyncError::InvalidUrl {
            url: raw.clone(),
            source,
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self { http, endpoint })
    }

    pub fn from_args(args: &Args) -> Result<Self, SyncError> {
        Self::new(&args.base_url, &args.respond_route)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ConversationSync for HttpChatClient {
    async fn respond_to(&self, chat: &ChatDto) -> Result<ChatDto, SyncError> {
        info!("Syncing {} messages with {}", chat.messages.len(), self.endpoint);
        let resp = self.http.post(self.endpoint.clone()).json(chat).send().await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(SyncError::Status { status, body });
        }
        debug!("Chat API replied with {} bytes", body.len());

        let reply = serde_json::from_str::<ChatDto>(&body)?;
        Ok(reply)
    }
}
