// Doctor Directory - Web Server
// REST API with Axum over the shared filter engine

use anyhow::{Context, Result};
use doctor_directory::api::{router, AppState};
use doctor_directory::{init_tracing, Config, FetchOutcome, HttpDoctorSource};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    println!("🌐 Doctor Directory - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = Config::from_env().context("Invalid configuration")?;
    let source = HttpDoctorSource::new(config.api_url.clone(), config.request_timeout)
        .context("Failed to create HTTP client")?;
    let state = AppState::new(Arc::new(source));

    // Initial load. A failure leaves the collection unloaded; POST /api/reload retries.
    match state.reload().await {
        Ok(FetchOutcome::Applied { count }) => println!("✓ Loaded {} doctors from {}", count, config.api_url),
        Ok(FetchOutcome::Superseded) => {}
        Err(e) => {
            warn!(error = %e, "initial load failed");
            eprintln!("❌ Could not load doctors: {}", e);
            eprintln!("   Serving 503 until POST /api/reload succeeds.");
        }
    }

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server_addr))?;

    info!(addr = %config.server_addr, "server listening");
    println!("\n🚀 Server running on http://{}", config.server_addr);
    println!("   API: http://{}/api/doctors?sort=fees", config.server_addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
