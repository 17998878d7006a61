use domain::recording::Manager;
use log::{error, info};
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
        std::process::exit(1);
    }

    info!(
        "Starting Zoom recordings manager for account {}",
        config.zoom_account_id()
    );

    let recordings = match Manager::from_config(&config) {
        Ok(manager) => Arc::new(manager),
        Err(e) => {
            error!("Failed to initialize the Zoom client: {e}");
            std::process::exit(1);
        }
    };

    let app_state = web::AppState::new(config, recordings);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server stopped: {e}");
        std::process::exit(1);
    }
}
