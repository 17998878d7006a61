use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use domain::recording::Recordings;
use log::*;
use service::config::Config;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

mod controller;
mod error;
mod router;

pub use self::error::{Error, Result};

// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub recordings: Arc<dyn Recordings>,
}

impl AppState {
    pub fn new(app_config: Config, recordings: Arc<dyn Recordings>) -> Self {
        Self {
            config: app_config,
            recordings,
        }
    }
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let listen_addr = app_state.config.listen_addr();
    let cors_layer = cors_layer(&app_state.config.allowed_origins);

    info!("Server starting... listening for connections on http://{listen_addr}");

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, router::define_routes(app_state).layer(cors_layer)).await
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {origin}: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(origins)
}
