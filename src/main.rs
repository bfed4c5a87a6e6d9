use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flightboard::{create_router_with_origins, load_store, AppState, Config};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: FLIGHTBOARD_LISTEN_ADDR (default: 0.0.0.0:3000)");
            eprintln!("Optional: FLIGHTBOARD_SEED_PATH, FLIGHTBOARD_CORS_ORIGINS");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting Flightboard server");
    tracing::info!("Listen address: {}", config.listen_addr);
    match &config.seed_path {
        Some(path) => tracing::info!("Seed file: {}", path.display()),
        None => tracing::info!("Seed file: built-in dataset"),
    }

    // Seed the in-memory store
    let store = load_store(config.seed_path.as_deref());
    tracing::info!("Loaded {} flights", store.len());

    let state = AppState::new(store);
    let app = create_router_with_origins(state, &config.cors_origins);

    // Start server
    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", config.listen_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server running at http://{}", config.listen_addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
