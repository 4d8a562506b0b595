//! Nano Stopwatch - a nanosecond stopwatch served over HTTP
//!
//! This is the main entry point for the nano-stopwatch application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use nano_stopwatch::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::display_ticker_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("nano_stopwatch={},tower_http=info", config.log_level()))
        .init();

    info!("Starting nano-stopwatch v{}", env!("CARGO_PKG_VERSION"));

    let options = config.format_options();
    info!("Configuration: host={}, port={}, tick={:?}, format={}, planck={}",
          config.host, config.port, config.tick_interval(), options.display_format, options.planck_mode);

    // Create application state
    let state = Arc::new(AppState::new(options));

    // Start the display refresh background task
    let ticker_state = Arc::clone(&state);
    let tick = config.tick_interval();
    tokio::spawn(async move {
        display_ticker_task(ticker_state, tick).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start    - Start or resume the stopwatch");
    info!("  POST /stop     - Pause the stopwatch");
    info!("  POST /reset    - Stop and zero the stopwatch");
    info!("  POST /toggle   - Start when stopped, stop when running");
    info!("  GET  /status   - Running flag, elapsed time and display");
    info!("  GET  /display  - Current display text");
    info!("  GET  /settings - Current display options (PUT to change)");
    info!("  GET  /health   - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
