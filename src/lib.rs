// Doctor Directory - Core Library
// Exposes all modules for use in the TUI, API server, and tests

pub mod model;
pub mod source;       // Record Source Adapter
pub mod specialties;  // Specialty Index
pub mod engine;       // Filter/Sort/Search Engine
pub mod query;        // URL query codec
pub mod controller;   // Filter State Controller
pub mod config;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use model::{ConsultationMode, Doctor, FilterState, FilterUpdate, SortOption};
pub use source::{
    normalize, normalize_all, parse_records,
    DoctorSource, FetchError, HttpDoctorSource, RawDoctor, StaticDoctorSource,
    DEFAULT_API_URL,
};
pub use specialties::list_specialties;
pub use engine::{compute_visible, suggestions, SUGGESTION_LIMIT};
pub use query::{parse_query, to_query};
pub use controller::{
    Collection, ControllerEvent, FetchOutcome, FetchTicket, FilterController,
    Notification, Severity, SubscriptionId,
};
pub use config::{Config, ConfigError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the fmt subscriber, filtered by RUST_LOG (default: info)
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
