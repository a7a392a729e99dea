use std::error::Error;
use std::net::SocketAddr;
use axum::{ routing::post, Router, extract::State, Json };
use chrono::Utc;
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, error };
use uuid::Uuid;

use crate::cli::parse_route;
use crate::models::chat::{ ChatDto, ChatMessageDto };

pub const THERAPIST_SCRIPT: &[&str] = &[
    "I hear you. Can you tell me more about that?",
    "How does that make you feel?",
    "That sounds hard. What do you think is behind it?",
    "When did you first notice feeling this way?",
    "What would you like to be different?",
    "Let's stay with that for a moment. What comes up for you?",
];

#[derive(Clone)]
struct AppState {
    therapist_name: String,
}

pub fn router(
    therapist_name: &str,
    respond_route: &str
) -> Result<Router, Box<dyn Error + Send + Sync>> {
    let respond_route = parse_route(respond_route)?;
    let app_state = AppState {
        therapist_name: therapist_name.to_string(),
    };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Ok(
        Router::new()
            .route(&respond_route, post(respond_handler))
            .layer(cors)
            .with_state(app_state)
    )
}

pub async fn start_http_server(
    addr: SocketAddr,
    therapist_name: &str,
    respond_route: &str
) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("Starting scripted therapist endpoint on: http://{}{}", addr, respond_route);
    let app = router(therapist_name, respond_route)?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
        e
    })?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Picks the scripted line for a conversation, cycling once the script runs out.
pub fn scripted_reply(chat: &ChatDto, therapist_name: &str) -> &'static str {
    let therapist_name = therapist_name.to_lowercase();
    let user_turns = chat.messages
        .iter()
        .filter(|m| m.author_name.to_lowercase() != therapist_name)
        .count();
    THERAPIST_SCRIPT[user_turns.saturating_sub(1) % THERAPIST_SCRIPT.len()]
}

async fn respond_handler(State(state): State<AppState>, Json(chat): Json<ChatDto>) -> Json<ChatDto> {
    let reply = scripted_reply(&chat, &state.therapist_name);
    info!("Responding to conversation of {} messages", chat.messages.len());

    let mut messages = chat.messages;
    messages.push(ChatMessageDto {
        id: Uuid::new_v4().to_string(),
        author_name: state.therapist_name.clone(),
        content: reply.to_string(),
        created_at: Utc::now().timestamp_millis(),
    });

    Json(ChatDto { messages })
}
