pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod relay;
pub mod server;
pub mod widget;

use cli::{ Args, Command };
use config::{ EnvSecrets, SecretSource };
use log::info;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    match args.command {
        Some(Command::Chat(chat_args)) => cli::repl::run(chat_args).await,
        Some(Command::Serve) | None => serve(&args.serve).await,
    }
}

async fn serve(args: &cli::ServeArgs) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Relay Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("OpenAI Base URL: {}", args.openai_base_url);
    info!("Zhipu Base URL: {}", args.zhipu_base_url);
    info!("TLS Enabled: {}", args.enable_tls);
    for provider in llm::Provider::ALL {
        let configured = EnvSecrets.non_empty(provider.api_key_var()).is_some();
        info!("{} key present: {}", provider.api_key_var(), configured);
    }
    info!("---------------------------");

    let server = Server::from_args(args)?;
    server.run().await
}
