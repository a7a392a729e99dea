pub mod adapter;
pub mod cli;
pub mod client;
pub mod error;
pub mod ids;
pub mod models;
pub mod participants;
pub mod server;
pub mod store;
pub mod terminal;
pub mod view;

use cli::{ Args, RunMode };
use log::info;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Mode: {}", args.mode);
    info!("Chat API Base URL: {}", args.base_url);
    info!("Respond Route: {}", args.respond_route);
    info!("Think Delay (ms): {}", args.think_delay_ms);
    info!("Participants: {} / {}", args.user_name, args.therapist_name);
    if args.mode == RunMode::Serve {
        info!("Server Address: {}", args.server_addr);
    }
    info!("-------------------------");

    match args.mode {
        RunMode::Chat => terminal::run_chat(&args).await,
        RunMode::Serve => {
            let server = Server::new(args.server_addr.clone(), args.clone());
            server.run().await
        }
    }
}
