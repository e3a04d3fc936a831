pub mod agent;
pub mod models;
pub mod server;
pub mod config;
pub mod llm;
pub mod cli;
pub mod history;
pub mod error;

use agent::AIAgent;
use cli::Args;
use config::GatewayConfig;
use log::info;
use server::Server;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = GatewayConfig::from(&args);

    info!("--- Core Configuration ---");
    info!("Server Address: {}:{}", args.server_addr, args.port);
    info!("Ollama URL: {}", config.ollama_url);
    info!("n8n Workflow: {}", config.webhook_url.as_deref().unwrap_or("disabled"));
    info!("Default Model: {}", config.default_model);
    info!("Chat Timeout: {:?}", config.chat_timeout);
    info!("Webhook Timeout: {:?}", config.webhook_timeout);
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let history_store = history::initialize_history_store();
    let agent = Arc::new(AIAgent::new(&config, history_store)?);
    let addr = format!("{}:{}", args.server_addr, args.port).parse::<SocketAddr>()?;
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, agent, args);
    server.run().await?;

    Ok(())
}
