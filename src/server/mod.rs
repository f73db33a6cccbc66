pub mod api;

use crate::cli::ServeArgs;
use crate::llm::LlmConfig;
use crate::relay::Relay;
use api::TlsPaths;
use log::error;
use std::error::Error;
use std::net::SocketAddr;

pub struct Server {
    addr: SocketAddr,
    relay: Relay,
    tls: Option<TlsPaths>,
}

impl Server {
    pub fn new(addr: SocketAddr, relay: Relay, tls: Option<TlsPaths>) -> Self {
        Self { addr, relay, tls }
    }

    pub fn from_args(args: &ServeArgs) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let addr = args.server_addr.parse::<SocketAddr>()
            .map_err(|e| format!("Invalid server address '{}': {}", args.server_addr, e))?;

        let tls = if args.enable_tls {
            match (&args.tls_cert_path, &args.tls_key_path) {
                (Some(cert_path), Some(key_path)) =>
                    Some(TlsPaths {
                        cert_path: cert_path.clone(),
                        key_path: key_path.clone(),
                    }),
                _ => {
                    error!(
                        "Both --tls-cert-path and --tls-key-path must be provided to enable TLS."
                    );
                    return Err("Missing TLS certificate or key path".into());
                }
            }
        } else {
            None
        };

        let config = LlmConfig {
            openai_base_url: args.openai_base_url.clone(),
            zhipu_base_url: args.zhipu_base_url.clone(),
        };

        Ok(Self::new(addr, Relay::from_env(config), tls))
    }

    pub async fn run(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(self.addr, self.relay, self.tls).await
    }
}
