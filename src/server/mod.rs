pub mod api;

use crate::cli::Args;
use std::error::Error;
use std::net::SocketAddr;

pub struct Server {
    addr: String,
    args: Args,
}

impl Server {
    pub fn new(addr: String, args: Args) -> Self {
        Self { addr, args }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.addr.parse::<SocketAddr>()?;
        api::start_http_server(addr, &self.args.therapist_name, &self.args.respond_route).await
    }
}
