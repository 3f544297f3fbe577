use axum::{
    Server,
    http::{HeaderName, HeaderValue},
};
use mveledziso_backend::{
    AppState,
    config::Config,
    db::build_pool,
    error::{AppError, AppResult},
    init_tracing,
    middleware::REQUEST_ID_HEADER,
    routes::create_router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("mveledziso-backend failed: {}", e.chain_message());
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let config = Config::from_env()?;
    init_tracing(&config.logging());

    let db = build_pool(&config.database())?;
    let server = config.server();
    let addr: SocketAddr = config
        .server_address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

    let state = Arc::new(AppState::new(db, config));
    let app = create_router(state).layer(cors_layer(&server.cors_origins)?);

    tracing::info!(address = %addr, "Server listening");
    Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))
}

/// `*` allows any origin; otherwise only the listed origins.
fn cors_layer(origins: &[String]) -> AppResult<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)]);

    if origins.iter().any(|o| o == "*") {
        return Ok(layer.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o)
                .map_err(|e| AppError::Config(format!("Invalid CORS origin '{}': {}", o, e)))
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(layer.allow_origin(origins))
}
