use clap::Parser;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Chat,
    Serve,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseRunModeError {
    message: String,
}

impl fmt::Display for ParseRunModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseRunModeError {}

impl FromStr for RunMode {
    type Err = ParseRunModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chat" => Ok(RunMode::Chat),
            "serve" => Ok(RunMode::Serve),
            _ =>
                Err(ParseRunModeError {
                    message: format!("Invalid run mode: '{}' (expected chat or serve)", s),
                }),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Chat => write!(f, "chat"),
            RunMode::Serve => write!(f, "serve"),
        }
    }
}

/// Gives a route exactly one leading `/`.
pub fn normalize_route(route: &str) -> String {
    format!("/{}", route.trim().trim_start_matches('/'))
}

/// Accepts a literal route only; axum's capture and wildcard syntax is rejected.
pub fn parse_route(route: &str) -> Result<String, String> {
    let route = normalize_route(route);
    if route.contains(['{', '}', '*', '?', '#']) || route.split('/').any(|seg| seg.starts_with(':')) {
        return Err(format!("Invalid respond route: '{}' (expected a literal path)", route));
    }
    Ok(route)
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// What to run: the terminal chat screen (chat) or the scripted therapist endpoint (serve)
    #[arg(long, env = "CHAT_MODE", default_value = "chat")]
    pub mode: RunMode,

    // --- Remote Sync Args ---
    /// Base URL of the chat API (e.g., an ngrok tunnel or http://127.0.0.1:4000)
    #[arg(long, env = "CHAT_API_BASE_URL", default_value = "http://127.0.0.1:4000")]
    pub base_url: String,

    /// Route appended to the base URL for the respond call.
    #[arg(long, env = "CHAT_RESPOND_ROUTE", default_value = "/chat/respond", value_parser = parse_route)]
    pub respond_route: String,

    /// Fixed pause in milliseconds before each remote call. 0 disables it.
    #[arg(long, env = "CHAT_THINK_DELAY_MS", default_value = "0")]
    pub think_delay_ms: u64,

    // --- Participant Args ---
    /// Author name for messages typed locally
    #[arg(long, env = "CHAT_USER_NAME", default_value = "me")]
    pub user_name: String,

    /// Author name of the therapist persona; matched case-insensitively
    #[arg(long, env = "CHAT_THERAPIST_NAME", default_value = "therapist")]
    pub therapist_name: String,

    /// Header shown above the conversation
    #[arg(long, env = "CHAT_PERSONA_TITLE", default_value = "🥸 Thadeus the Therapist")]
    pub persona_title: String,

    /// First message of every new conversation
    #[arg(long, env = "CHAT_GREETING", default_value = "Hello! How are you?")]
    pub greeting: String,

    // --- Server Args ---
    /// Host address and port for the scripted endpoint to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:4000")]
    pub server_addr: String,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}
