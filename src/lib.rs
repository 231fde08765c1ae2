// Infrastructure layer (shared components)
pub mod infrastructure;

// Re-export infrastructure modules
pub use infrastructure::postgres;

// Cross-cutting
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;

// Domain layer
pub mod delivery;
pub mod dispatch;
pub mod record;
pub mod template;

// Application layer
pub mod api;
pub mod server;
