use axum::http::Method;
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inspiration_board_server::{build_router, open_database, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inspiration_board_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Inspiration Board Server...");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Environment: {}, Server: {}",
        config.environment,
        config.server_address()
    );

    let db = open_database(&config.database_path)?;

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(&config))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);

    let log_requests = config.log_requests;
    let addr: SocketAddr = config.server_address().parse()?;

    let mut app = build_router(AppState::new(db, config)).layer(cors);
    if log_requests {
        app = app.layer(TraceLayer::new_for_http());
    }

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `*` opens the API to every origin
fn allowed_origins(config: &Config) -> AllowOrigin {
    if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(config.origin_headers())
    }
}
