use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sptrans_server::config::ServerConfig;
use sptrans_server::sptrans::SptransClient;
use sptrans_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match SptransClient::new(config.sptrans.clone()) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to create SPTrans client: {e}");
            return ExitCode::FAILURE;
        }
    };

    // A refused credential stops the process before it binds
    if let Err(e) = client.session().authenticate().await {
        error!("failed to authenticate with SPTrans API: {e}");
        return ExitCode::FAILURE;
    }

    let state = AppState::new(client, config.request_deadline);
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {}: {e}", config.bind_addr);
            return ExitCode::FAILURE;
        }
    };

    info!("SPTrans gateway listening on http://{}", config.bind_addr);
    info!("  GET /lines/search?term=            - Search bus lines");
    info!("  GET /lines/search-by-direction     - Search a line in one direction");
    info!("  GET /stops/search?term=            - Search bus stops");
    info!("  GET /stops/by-line?line_code=      - Stops served by a line");
    info!("  GET /stops/by-corridor             - Stops in a corridor");
    info!("  GET /corridors, /companies         - Reference data");
    info!("  GET /positions[/by-line|/garage]   - Vehicle positions");
    info!("  GET /predictions[/by-line|/by-stop] - Arrival predictions");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
