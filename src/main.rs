// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use doctor_directory::{init_tracing, Config, FilterController, HttpDoctorSource};
use std::env;
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    // Logs go to stderr; keep them off the TUI unless explicitly requested
    let tui_mode = !matches!(args.get(1).map(String::as_str), Some("list") | Some("specialties"));
    if !tui_mode || env::var_os("RUST_LOG").is_some() {
        init_tracing();
    }

    let config = Config::from_env().context("Invalid configuration")?;
    let runtime = Runtime::new().context("Failed to start async runtime")?;
    let source = HttpDoctorSource::new(config.api_url.clone(), config.request_timeout)
        .context("Failed to create HTTP client")?;

    match args.get(1).map(String::as_str) {
        Some("list") => run_list(&runtime, &source, args.get(2).map(String::as_str).unwrap_or("")),
        Some("specialties") => run_specialties(&runtime, &source),
        query => run_ui_mode(&runtime, &source, query.unwrap_or("")),
    }
}

/// Print the visible set for a URL query string and exit
fn run_list(runtime: &Runtime, source: &HttpDoctorSource, query: &str) -> Result<()> {
    let mut controller = FilterController::from_query(query);

    runtime
        .block_on(controller.load_from(source))
        .with_context(|| format!("Failed to load doctors from {}", source.url()))?;

    let visible = controller.visible().unwrap_or_default();

    println!("🩺 {} Doctors Found", visible.len());
    if !controller.query_string().is_empty() {
        println!("   ?{}", controller.query_string());
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if visible.is_empty() {
        println!("No doctors match your search criteria.");
        return Ok(());
    }

    for doctor in visible {
        let modes: Vec<&str> = doctor.consultation_modes.iter().map(|m| m.as_str()).collect();
        println!(
            "{:<30} {:<35} {:>3} yrs  ₹{:<6} {}",
            doctor.display_name(),
            doctor.specialties.join(", "),
            doctor.experience_years,
            doctor.fee_amount,
            modes.join(" / "),
        );
    }

    Ok(())
}

fn run_specialties(runtime: &Runtime, source: &HttpDoctorSource) -> Result<()> {
    let mut controller = FilterController::default();

    runtime
        .block_on(controller.load_from(source))
        .with_context(|| format!("Failed to load doctors from {}", source.url()))?;

    for specialty in controller.specialties() {
        println!("{}", specialty);
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(runtime: &Runtime, source: &HttpDoctorSource, query: &str) -> Result<()> {
    println!("🖥️  Loading Doctor Directory UI...\n");

    let mut controller = FilterController::from_query(query);

    // A failed load still opens the UI; the error is shown there with a retry key
    match runtime.block_on(controller.load_from(source)) {
        Ok(_) => println!("✓ Loaded {} doctors\n", controller.doctors().map(<[_]>::len).unwrap_or(0)),
        Err(e) => eprintln!("❌ {}", e),
    }

    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(controller);
    app.sync_notifications();
    ui::run_ui(&mut app, runtime, source)?;

    println!("\n✅ UI closed successfully");
    if !app.controller.query_string().is_empty() {
        println!("   Resume with: doctor-directory '{}'", app.controller.query_string());
    }

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_runtime: &Runtime, _source: &HttpDoctorSource, _query: &str) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: doctor-directory list '<query>'");
    std::process::exit(1);
}
