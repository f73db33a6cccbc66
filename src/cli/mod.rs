pub mod repl;

use clap::{ Args as ClapArgs, Parser, Subcommand };

use crate::llm::{ DEFAULT_OPENAI_BASE_URL, DEFAULT_ZHIPU_BASE_URL };

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the chat relay HTTP server (the default).
    Serve,

    /// Chat with a running relay from the terminal.
    Chat(ChatArgs),
}

/// Relay options. Global, so they are accepted both before and after `serve`.
#[derive(ClapArgs, Debug, Clone)]
pub struct ServeArgs {
    /// Host address and port for the relay to listen on.
    #[arg(long, env = "SERVER_ADDR", global = true, default_value = "127.0.0.1:3000")]
    pub server_addr: String,

    /// Base URL of the OpenAI API; `/chat/completions` is appended.
    #[arg(long, env = "OPENAI_BASE_URL", global = true, default_value = DEFAULT_OPENAI_BASE_URL)]
    pub openai_base_url: String,

    /// Base URL of the Zhipu API; `/chat/completions` is appended.
    #[arg(long, env = "ZHIPU_BASE_URL", global = true, default_value = DEFAULT_ZHIPU_BASE_URL)]
    pub zhipu_base_url: String,

    #[arg(long, env = "ENABLE_TLS", global = true, default_value = "false")]
    pub enable_tls: bool,

    /// Path to the TLS certificate file (PEM). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH", global = true)]
    pub tls_cert_path: Option<String>,

    /// Path to the TLS private key file (PEM). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH", global = true)]
    pub tls_key_path: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ChatArgs {
    /// Base URL of the relay to talk to.
    #[arg(long, env = "RELAY_URL", default_value = "http://127.0.0.1:3000")]
    pub relay_url: String,

    /// Initial provider (openai, zhipu).
    #[arg(long, default_value = "openai")]
    pub provider: String,

    /// Initial Zhipu model (glm-4, glm-4-flash, chatglm_turbo, chatglm_std, chatglm_lite).
    #[arg(long, default_value = "glm-4")]
    pub model: String,
}
