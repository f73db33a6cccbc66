use crate::models::chat::{ ChatRequest, ChatResponse };
use crate::relay::Relay;
use std::error::Error;
use std::net::SocketAddr;
use axum::{
    routing::{ get, post },
    Router,
    extract::{ rejection::JsonRejection, State },
    response::IntoResponse,
    http::StatusCode,
    Json,
};
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, error };

#[derive(Clone)]
pub struct AppState {
    relay: Relay,
}

#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub cert_path: String,
    pub key_path: String,
}

pub fn router(relay: Relay) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/health", get(health_handler))
        .layer(cors)
        .with_state(AppState { relay })
}

pub async fn start_http_server(
    addr: SocketAddr,
    relay: Relay,
    tls: Option<TlsPaths>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let app = router(relay);

    match tls {
        Some(paths) => {
            info!(
                "TLS enabled. Loading certificate from '{}' and key from '{}'",
                paths.cert_path,
                paths.key_path
            );
            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                &paths.cert_path,
                &paths.key_path
            ).await?;

            info!("HTTPS chat relay listening on: https://{}", addr);
            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
                error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
                e
            })?;
            info!("HTTP chat relay listening on: http://{}", addr);
            axum::serve(listener, app.into_make_service()).await?;
        }
    }

    Ok(())
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(e) => {
            error!("Chat API error: invalid request body: {}", e);
            return failure();
        }
    };

    match state.relay.relay(&request).await {
        Ok(message) => (StatusCode::OK, Json(ChatResponse::Message { message })).into_response(),
        Err(e) => {
            error!("Chat API error: {}", e);
            failure()
        }
    }
}

fn failure() -> axum::response::Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ChatResponse::failure())).into_response()
}

async fn health_handler() -> &'static str {
    "ok"
}
